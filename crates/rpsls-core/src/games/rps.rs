//! Rock-Paper-Scissors, the three-move subset.

use super::traits::{GameJudge, Move};

/// Rock-Paper-Scissors game
pub struct ClassicGame;

impl GameJudge for ClassicGame {
    fn validate_move(mv: Move) -> bool {
        matches!(mv, Move::Rock | Move::Paper | Move::Scissors)
    }
}

//! Events recorded by accepted engine actions.

use crate::crypto::Commitment;
use crate::games::Move;
use crate::protocol::{Address, GameResult, Seat};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerEnrolled {
        seat: Seat,
        player: Address,
        commitment: Commitment,
    },
    MoveRevealed {
        seat: Seat,
        player: Address,
        mv: Move,
    },
    /// `winner` is the zero address on a draw
    GameResolved { result: GameResult, winner: Address },
}

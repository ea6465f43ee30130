//! Game traits and types.

use crate::protocol::GameResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A move. The discriminant is the wire index used in commitments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
    Lizard = 3,
    Spock = 4,
}

impl Move {
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    /// Wire index, 0 through 4
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Lizard => "Lizard",
            Move::Spock => "Spock",
        }
    }

    /// Check if this move beats the other
    pub fn beats(&self, other: &Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Rock, Move::Lizard)
                | (Move::Paper, Move::Rock)
                | (Move::Paper, Move::Spock)
                | (Move::Scissors, Move::Paper)
                | (Move::Scissors, Move::Lizard)
                | (Move::Lizard, Move::Spock)
                | (Move::Lizard, Move::Paper)
                | (Move::Spock, Move::Rock)
                | (Move::Spock, Move::Scissors)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown move: {0}")]
pub struct UnknownMove(pub String);

impl TryFrom<u8> for Move {
    type Error = UnknownMove;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Move::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| UnknownMove(index.to_string()))
    }
}

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissor" | "scissors" => Ok(Move::Scissors),
            "lizard" => Ok(Move::Lizard),
            "spock" => Ok(Move::Spock),
            _ => Err(UnknownMove(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which move set a game is played with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Rock, Paper, Scissors
    Classic,
    /// Rock, Paper, Scissors, Lizard, Spock
    #[default]
    Extended,
}

impl RuleSet {
    /// Is this move legal under these rules?
    pub fn allows(&self, mv: Move) -> bool {
        match self {
            RuleSet::Classic => super::ClassicGame::validate_move(mv),
            RuleSet::Extended => super::RpslsGame::validate_move(mv),
        }
    }

    /// Legal moves, in wire order
    pub fn moves(&self) -> Vec<Move> {
        Move::ALL.into_iter().filter(|m| self.allows(*m)).collect()
    }

    /// Judge two moves with the judge for these rules
    pub fn judge(&self, first: Move, second: Move) -> GameResult {
        match self {
            RuleSet::Classic => super::ClassicGame::judge(first, second),
            RuleSet::Extended => super::RpslsGame::judge(first, second),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSet::Classic => "classic",
            RuleSet::Extended => "extended",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown rule set: {0} (expected \"classic\" or \"extended\")")]
pub struct UnknownRuleSet(pub String);

impl FromStr for RuleSet {
    type Err = UnknownRuleSet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "rps" => Ok(RuleSet::Classic),
            "extended" | "rpsls" => Ok(RuleSet::Extended),
            _ => Err(UnknownRuleSet(s.to_string())),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for game logic - each rule set implements this
pub trait GameJudge {
    /// Determine the result from the first and second seat's moves.
    ///
    /// Callers validate both moves first; the outcome for a move this judge
    /// does not accept is unspecified.
    fn judge(first: Move, second: Move) -> GameResult {
        if first == second {
            GameResult::Draw
        } else if first.beats(&second) {
            GameResult::FirstWins
        } else {
            GameResult::SecondWins
        }
    }

    /// Validate that a move is legal for this game
    fn validate_move(mv: Move) -> bool;
}

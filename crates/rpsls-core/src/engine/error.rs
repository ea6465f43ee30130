//! Reasons an engine action is rejected.

use crate::games::{Move, RuleSet};
use crate::protocol::Address;
use thiserror::Error;

/// Errors from engine actions. A rejected action never changes engine state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Wrong entry fee: expected {expected}, attached {attached}")]
    WrongFee { expected: u128, attached: u128 },

    #[error("Game is full")]
    GameFull,

    #[error("Player {0} is already enrolled")]
    AlreadyEnrolled(Address),

    #[error("The zero address cannot enroll")]
    ZeroAddress,

    #[error("{0} is not a player in this game")]
    UnknownCaller(Address),

    #[error("Player {0} has already revealed")]
    AlreadyRevealed(Address),

    #[error("Cannot reveal before both players have enrolled")]
    RevealBeforeBothEnrolled,

    #[error("{mv} is not a legal move under {rules} rules")]
    IllegalMove { mv: Move, rules: RuleSet },

    #[error("Revealed move and salt do not match the commitment")]
    CommitmentMismatch,
}

impl EngineError {
    /// Stable identifier for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::WrongFee { .. } => "wrong_fee",
            EngineError::GameFull => "game_full",
            EngineError::AlreadyEnrolled(_) => "already_enrolled",
            EngineError::ZeroAddress => "zero_address",
            EngineError::UnknownCaller(_) => "unknown_caller",
            EngineError::AlreadyRevealed(_) => "already_revealed",
            EngineError::RevealBeforeBothEnrolled => "reveal_before_both_enrolled",
            EngineError::IllegalMove { .. } => "illegal_move",
            EngineError::CommitmentMismatch => "commitment_mismatch",
        }
    }
}

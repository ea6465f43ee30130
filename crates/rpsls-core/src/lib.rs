//! RPSLS Core Library
//!
//! This crate provides the commit-reveal game engine for two-player
//! Rock-Paper-Scissors-Lizard-Spock, together with the move definitions,
//! rule sets, and the identity-bound commitment scheme it relies on.
//!
//! The engine is a plain value: it performs no I/O and holds no global state,
//! so any host (a ledger, a simulator, an HTTP service) can drive it by
//! supplying the caller identity and attached value for each action.

pub mod config;
pub mod crypto;
pub mod engine;
pub mod games;
pub mod protocol;

mod serde_hex;

pub use config::EngineConfig;
pub use crypto::{Commitment, Salt, SealedMove};
pub use engine::{EngineError, GameEngine, GameEvent, GameState, PlayerSlot};
pub use games::{ClassicGame, GameJudge, Move, RpslsGame, RuleSet};
pub use protocol::{Address, GameId, GameResult, Seat};

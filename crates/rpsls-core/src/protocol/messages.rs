//! Protocol messages exchanged between players and a host.

use crate::crypto::{Commitment, Salt};
use crate::games::Move;
use crate::protocol::Address;
use serde::{Deserialize, Serialize};

/// Enrollment: a player commits to a hidden move and pays the entry fee
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayMessage {
    pub player: Address,
    pub commitment: Commitment,
    /// Attached value, must equal the entry fee exactly
    pub value: u128,
}

/// Reveal: a player discloses the move and salt behind their commitment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevealMessage {
    pub player: Address,
    pub mv: Move,
    pub salt: Salt,
}

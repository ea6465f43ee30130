//! Commitment and Salt for the commit-reveal scheme.

use crate::games::Move;
use crate::protocol::Address;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Salt for commitment scheme.
///
/// Any string works; players who just want privacy should use [`Salt::random`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(String);

impl Salt {
    /// Create a new random salt (32 random bytes, hex encoded)
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for Salt {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Salt {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.0.chars().take(8).collect();
        write!(f, "Salt({shown}..)")
    }
}

/// Commitment = H(move || salt || committer)
///
/// Binding the committer into the digest means a commitment copied from
/// another player can never be opened by the copier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "crate::serde_hex")] [u8; 32]);

impl Commitment {
    /// Compute the commitment to `mv` under `salt` for `committer`
    pub fn compute(mv: Move, salt: &Salt, committer: &Address) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([mv.index()]);
        hasher.update(salt.as_bytes());
        hasher.update(committer.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given move, salt, and committer produce this commitment
    pub fn verify(&self, mv: Move, salt: &Salt, committer: &Address) -> bool {
        *self == Self::compute(mv, salt, committer)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A move kept secret by its player until the reveal phase.
#[derive(Clone, Debug)]
pub struct SealedMove {
    pub mv: Move,
    pub salt: Salt,
}

impl SealedMove {
    pub fn new(mv: Move, salt: impl Into<Salt>) -> Self {
        Self {
            mv,
            salt: salt.into(),
        }
    }

    /// Seal `mv` under a fresh random salt
    pub fn random_salt(mv: Move) -> Self {
        Self::new(mv, Salt::random())
    }

    /// The commitment `owner` submits when enrolling
    pub fn commitment(&self, owner: &Address) -> Commitment {
        Commitment::compute(self.mv, &self.salt, owner)
    }
}

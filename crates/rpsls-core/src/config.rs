//! Engine configuration, fixed for the lifetime of a game.

use crate::games::RuleSet;
use serde::{Deserialize, Serialize};

/// Default entry fee: 0.1 of a coin with 18 decimals.
pub const DEFAULT_ENTRY_FEE: u128 = 100_000_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Exact value every player must attach to `play`
    pub entry_fee: u128,
    pub rules: RuleSet,
}

impl EngineConfig {
    pub fn new(entry_fee: u128, rules: RuleSet) -> Self {
        Self { entry_fee, rules }
    }

    pub fn with_entry_fee(mut self, entry_fee: u128) -> Self {
        self.entry_fee = entry_fee;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entry_fee: DEFAULT_ENTRY_FEE,
            rules: RuleSet::Extended,
        }
    }
}

//! Service configuration from environment variables.

use rpsls_core::{EngineConfig, RuleSet};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefereeConfig {
    pub port: u16,
    /// Settings for games created without explicit overrides
    pub engine: EngineConfig,
}

impl RefereeConfig {
    /// Read `PORT`, `ENTRY_FEE`, and `RULES` from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let port = parse_var(&lookup, "PORT", |s| s.parse::<u16>().map_err(|e| e.to_string()))?
            .unwrap_or(DEFAULT_PORT);
        let entry_fee = parse_var(&lookup, "ENTRY_FEE", |s| {
            s.parse::<u128>().map_err(|e| e.to_string())
        })?
        .unwrap_or(defaults.entry_fee);
        let rules = parse_var(&lookup, "RULES", |s| {
            s.parse::<RuleSet>().map_err(|e| e.to_string())
        })?
        .unwrap_or(defaults.rules);

        Ok(Self {
            port,
            engine: EngineConfig::new(entry_fee, rules),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => parse(value.trim())
            .map(Some)
            .map_err(|reason| ConfigError::Invalid { var, value, reason }),
    }
}

//! Move definitions and adjudication.

mod rps;
mod rpsls;
mod traits;

pub use rps::ClassicGame;
pub use rpsls::RpslsGame;
pub use traits::{GameJudge, Move, RuleSet, UnknownMove, UnknownRuleSet};

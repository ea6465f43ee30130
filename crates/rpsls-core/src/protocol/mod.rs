//! Protocol types and messages.

mod messages;
mod types;

pub use messages::{PlayMessage, RevealMessage};
pub use types::{Address, AddressParseError, GameId, GameResult, Seat, ADDRESS_LEN};

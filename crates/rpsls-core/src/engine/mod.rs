//! The commit-reveal game engine.
//!
//! A [`GameEngine`] owns one game between at most two players. Each action is
//! validated completely before anything is written, so a rejected action
//! leaves the engine exactly as it was.
//!
//! Lifecycle:
//!
//! ```text
//! Empty --play--> AwaitingSecondPlayer --play--> AwaitingReveals --reveal x2--> Resolved
//! ```

mod error;
mod events;

pub use error::EngineError;
pub use events::GameEvent;

use crate::config::EngineConfig;
use crate::crypto::{Commitment, Salt};
use crate::games::{Move, RuleSet};
use crate::protocol::{Address, GameResult, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where a game is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Empty,
    AwaitingSecondPlayer,
    AwaitingReveals,
    Resolved,
}

/// One occupied seat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub address: Address,
    pub commitment: Commitment,
    /// `None` until the player reveals
    pub revealed_move: Option<Move>,
    pub stake: u128,
}

impl PlayerSlot {
    fn new(address: Address, commitment: Commitment, stake: u128) -> Self {
        Self {
            address,
            commitment,
            revealed_move: None,
            stake,
        }
    }

    pub fn has_revealed(&self) -> bool {
        self.revealed_move.is_some()
    }
}

/// State machine for a single two-player game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEngine {
    config: EngineConfig,
    slots: [Option<PlayerSlot>; 2],
    outcome: Option<GameResult>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            slots: [None, None],
            outcome: None,
            events: Vec::new(),
        }
    }

    pub fn entry_fee(&self) -> u128 {
        self.config.entry_fee
    }

    pub fn rules(&self) -> RuleSet {
        self.config.rules
    }

    /// Commitment helper: what `player` must submit to commit to `mv` under `salt`
    pub fn get_hash(&self, mv: Move, salt: &Salt, player: &Address) -> Commitment {
        Commitment::compute(mv, salt, player)
    }

    pub fn state(&self) -> GameState {
        match (&self.slots, self.outcome) {
            (_, Some(_)) => GameState::Resolved,
            ([None, _], None) => GameState::Empty,
            ([Some(_), None], None) => GameState::AwaitingSecondPlayer,
            ([Some(_), Some(_)], None) => GameState::AwaitingReveals,
        }
    }

    /// Snapshot of a seat, `None` while it is free
    pub fn player(&self, seat: Seat) -> Option<&PlayerSlot> {
        self.slots[seat.index()].as_ref()
    }

    /// Snapshot by slot index (0 or 1)
    pub fn players(&self, index: usize) -> Option<&PlayerSlot> {
        Seat::try_from(index).ok().and_then(|seat| self.player(seat))
    }

    /// The result once both moves are revealed
    pub fn outcome(&self) -> Option<GameResult> {
        self.outcome
    }

    /// The winner's address, or [`Address::ZERO`] on a draw or while unresolved
    pub fn winner(&self) -> Address {
        self.outcome
            .and_then(|result| result.winning_seat())
            .and_then(|seat| self.player(seat))
            .map(|slot| slot.address)
            .unwrap_or(Address::ZERO)
    }

    /// Total stake held by this game
    pub fn pot(&self) -> u128 {
        self.slots
            .iter()
            .flatten()
            .fold(0u128, |total, slot| total.saturating_add(slot.stake))
    }

    /// Events recorded since the last [`take_events`](Self::take_events)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Seat held by `address`, if any
    pub fn seat_of(&self, address: &Address) -> Option<Seat> {
        Seat::ALL.into_iter().find(|seat| {
            self.player(*seat)
                .is_some_and(|slot| slot.address == *address)
        })
    }

    /// Enroll `player` with a commitment, paying `value`.
    ///
    /// The third enrollment is refused with [`EngineError::GameFull`] whatever
    /// fee it carries.
    pub fn play(
        &mut self,
        commitment: Commitment,
        player: Address,
        value: u128,
    ) -> Result<Seat, EngineError> {
        if player.is_zero() {
            return Err(EngineError::ZeroAddress);
        }

        let seat = Seat::ALL
            .into_iter()
            .find(|seat| self.player(*seat).is_none())
            .ok_or(EngineError::GameFull)?;

        if value != self.config.entry_fee {
            return Err(EngineError::WrongFee {
                expected: self.config.entry_fee,
                attached: value,
            });
        }

        if self.seat_of(&player).is_some() {
            return Err(EngineError::AlreadyEnrolled(player));
        }

        self.slots[seat.index()] = Some(PlayerSlot::new(player, commitment, value));
        self.events.push(GameEvent::PlayerEnrolled {
            seat,
            player,
            commitment,
        });

        info!(%player, %seat, state = ?self.state(), "player enrolled");
        Ok(seat)
    }

    /// Reveal the move behind `caller`'s commitment.
    ///
    /// The second successful reveal resolves the game.
    pub fn reveal(&mut self, mv: Move, salt: &Salt, caller: Address) -> Result<(), EngineError> {
        if self.state() == GameState::Empty || self.state() == GameState::AwaitingSecondPlayer {
            return Err(EngineError::RevealBeforeBothEnrolled);
        }

        let seat = self
            .seat_of(&caller)
            .ok_or(EngineError::UnknownCaller(caller))?;
        let rules = self.config.rules;

        let slot = self.slots[seat.index()]
            .as_mut()
            .ok_or(EngineError::UnknownCaller(caller))?;

        if slot.has_revealed() {
            return Err(EngineError::AlreadyRevealed(caller));
        }
        if !rules.allows(mv) {
            return Err(EngineError::IllegalMove { mv, rules });
        }
        if !slot.commitment.verify(mv, salt, &caller) {
            debug!(player = %caller, "reveal does not match commitment");
            return Err(EngineError::CommitmentMismatch);
        }

        slot.revealed_move = Some(mv);
        self.events.push(GameEvent::MoveRevealed {
            seat,
            player: caller,
            mv,
        });
        info!(player = %caller, %seat, %mv, "move revealed");

        self.try_resolve();
        Ok(())
    }

    fn try_resolve(&mut self) {
        let first = self.player(Seat::First).and_then(|slot| slot.revealed_move);
        let second = self.player(Seat::Second).and_then(|slot| slot.revealed_move);

        if let (Some(first), Some(second)) = (first, second) {
            let result = self.config.rules.judge(first, second);
            self.outcome = Some(result);

            let winner = self.winner();
            self.events.push(GameEvent::GameResolved { result, winner });
            info!(%first, %second, %result, %winner, "game resolved");
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE: u128 = 1_000;
    const ALICE: Address = Address::from_bytes([0xa1; 20]);
    const BOB: Address = Address::from_bytes([0xb0; 20]);
    const CAROL: Address = Address::from_bytes([0xc4; 20]);

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::new(FEE, RuleSet::Extended))
    }

    fn commit(engine: &GameEngine, mv: Move, salt: &str, player: Address) -> Commitment {
        engine.get_hash(mv, &Salt::from(salt), &player)
    }

    fn enrolled(alice_move: Move, bob_move: Move) -> GameEngine {
        let mut game = engine();
        let c = commit(&game, alice_move, "alice", ALICE);
        game.play(c, ALICE, FEE).unwrap();
        let c = commit(&game, bob_move, "bob", BOB);
        game.play(c, BOB, FEE).unwrap();
        game
    }

    #[test]
    fn test_new_engine_is_empty() {
        let game = engine();
        assert_eq!(game.state(), GameState::Empty);
        assert_eq!(game.winner(), Address::ZERO);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.pot(), 0);
        assert!(game.player(Seat::First).is_none());
    }

    #[test]
    fn test_play_fills_seats_in_order() {
        let mut game = engine();
        let c = commit(&game, Move::Rock, "alice", ALICE);
        assert_eq!(game.play(c, ALICE, FEE), Ok(Seat::First));
        assert_eq!(game.state(), GameState::AwaitingSecondPlayer);

        let c = commit(&game, Move::Paper, "bob", BOB);
        assert_eq!(game.play(c, BOB, FEE), Ok(Seat::Second));
        assert_eq!(game.state(), GameState::AwaitingReveals);

        let slot = game.players(1).unwrap();
        assert_eq!(slot.address, BOB);
        assert_eq!(slot.commitment, c);
        assert_eq!(slot.stake, FEE);
        assert_eq!(slot.revealed_move, None);
        assert_eq!(game.pot(), 2 * FEE);
        assert!(game.players(2).is_none());
    }

    #[test]
    fn test_wrong_fee_rejected_without_change() {
        let mut game = engine();
        let before = game.clone();
        let c = commit(&game, Move::Rock, "alice", ALICE);

        assert_eq!(
            game.play(c, ALICE, 0),
            Err(EngineError::WrongFee {
                expected: FEE,
                attached: 0
            })
        );
        assert_eq!(
            game.play(c, ALICE, FEE + 1).unwrap_err().kind(),
            "wrong_fee"
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_third_player_rejected_regardless_of_fee() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        let before = game.clone();
        let c = commit(&game, Move::Paper, "", CAROL);

        assert_eq!(game.play(c, CAROL, FEE), Err(EngineError::GameFull));
        assert_eq!(game.play(c, CAROL, 0), Err(EngineError::GameFull));
        assert_eq!(game, before);
    }

    #[test]
    fn test_same_player_cannot_take_both_seats() {
        let mut game = engine();
        let c = commit(&game, Move::Rock, "alice", ALICE);
        game.play(c, ALICE, FEE).unwrap();

        let c2 = commit(&game, Move::Paper, "again", ALICE);
        assert_eq!(
            game.play(c2, ALICE, FEE),
            Err(EngineError::AlreadyEnrolled(ALICE))
        );
        assert_eq!(game.state(), GameState::AwaitingSecondPlayer);
    }

    #[test]
    fn test_zero_address_cannot_enroll() {
        let mut game = engine();
        let c = commit(&game, Move::Rock, "x", Address::ZERO);
        assert_eq!(game.play(c, Address::ZERO, FEE), Err(EngineError::ZeroAddress));
        assert_eq!(game.state(), GameState::Empty);
    }

    #[test]
    fn test_reveal_before_both_enrolled() {
        let mut game = engine();
        assert_eq!(
            game.reveal(Move::Rock, &Salt::from("alice"), ALICE),
            Err(EngineError::RevealBeforeBothEnrolled)
        );

        let c = commit(&game, Move::Rock, "alice", ALICE);
        game.play(c, ALICE, FEE).unwrap();
        let before = game.clone();

        assert_eq!(
            game.reveal(Move::Rock, &Salt::from("alice"), ALICE),
            Err(EngineError::RevealBeforeBothEnrolled)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_reveal_by_non_player_rejected() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        let before = game.clone();

        assert_eq!(
            game.reveal(Move::Rock, &Salt::from("alice"), CAROL),
            Err(EngineError::UnknownCaller(CAROL))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_reveal_with_wrong_move_or_salt_rejected() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        let before = game.clone();

        assert_eq!(
            game.reveal(Move::Paper, &Salt::from("alice"), ALICE),
            Err(EngineError::CommitmentMismatch)
        );
        assert_eq!(
            game.reveal(Move::Rock, &Salt::from("bob"), ALICE),
            Err(EngineError::CommitmentMismatch)
        );
        // Bob's own opening, presented by Alice, does not open Alice's commitment.
        assert_eq!(
            game.reveal(Move::Paper, &Salt::from("bob"), ALICE),
            Err(EngineError::CommitmentMismatch)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_copied_commitment_cannot_be_opened() {
        let mut game = engine();
        let alice_commit = commit(&game, Move::Spock, "alice", ALICE);
        game.play(alice_commit, ALICE, FEE).unwrap();
        // Bob copies Alice's commitment verbatim.
        game.play(alice_commit, BOB, FEE).unwrap();

        game.reveal(Move::Spock, &Salt::from("alice"), ALICE).unwrap();
        assert_eq!(
            game.reveal(Move::Spock, &Salt::from("alice"), BOB),
            Err(EngineError::CommitmentMismatch)
        );
        assert_eq!(game.state(), GameState::AwaitingReveals);
    }

    #[test]
    fn test_double_reveal_rejected() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        game.reveal(Move::Rock, &Salt::from("alice"), ALICE).unwrap();
        let before = game.clone();

        assert_eq!(
            game.reveal(Move::Rock, &Salt::from("alice"), ALICE),
            Err(EngineError::AlreadyRevealed(ALICE))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_game_resolves() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        game.reveal(Move::Rock, &Salt::from("alice"), ALICE).unwrap();
        assert_eq!(game.state(), GameState::AwaitingReveals);
        assert_eq!(game.winner(), Address::ZERO);

        game.reveal(Move::Paper, &Salt::from("bob"), BOB).unwrap();
        assert_eq!(game.state(), GameState::Resolved);
        assert_eq!(game.outcome(), Some(GameResult::SecondWins));
        assert_eq!(game.winner(), BOB);
        assert_eq!(game.players(0).unwrap().revealed_move, Some(Move::Rock));
        assert_eq!(game.players(1).unwrap().revealed_move, Some(Move::Paper));
        assert_eq!(game.pot(), 2 * FEE);
    }

    #[test]
    fn test_resolved_game_is_final() {
        let mut game = enrolled(Move::Rock, Move::Paper);
        game.reveal(Move::Rock, &Salt::from("alice"), ALICE).unwrap();
        game.reveal(Move::Paper, &Salt::from("bob"), BOB).unwrap();
        let before = game.clone();

        let c = commit(&game, Move::Rock, "carol", CAROL);
        assert_eq!(game.play(c, CAROL, FEE), Err(EngineError::GameFull));
        assert_eq!(
            game.reveal(Move::Paper, &Salt::from("bob"), BOB),
            Err(EngineError::AlreadyRevealed(BOB))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_classic_rules_reject_lizard_and_spock() {
        let mut game = GameEngine::new(EngineConfig::new(FEE, RuleSet::Classic));
        let c = commit(&game, Move::Lizard, "alice", ALICE);
        game.play(c, ALICE, FEE).unwrap();
        let c = commit(&game, Move::Spock, "bob", BOB);
        game.play(c, BOB, FEE).unwrap();
        let before = game.clone();

        assert_eq!(
            game.reveal(Move::Lizard, &Salt::from("alice"), ALICE),
            Err(EngineError::IllegalMove {
                mv: Move::Lizard,
                rules: RuleSet::Classic
            })
        );
        assert_eq!(
            game.reveal(Move::Spock, &Salt::from("bob"), BOB),
            Err(EngineError::IllegalMove {
                mv: Move::Spock,
                rules: RuleSet::Classic
            })
        );
        assert_eq!(game, before);
        assert_eq!(game.state(), GameState::AwaitingReveals);
        assert!(game.player(Seat::Second).is_some_and(|slot| !slot.has_revealed()));
    }

    #[test]
    fn test_events_follow_accepted_actions_only() {
        let mut game = engine();
        let c = commit(&game, Move::Paper, "alice", ALICE);
        game.play(c, ALICE, 0).unwrap_err();
        assert!(game.events().is_empty());

        game.play(c, ALICE, FEE).unwrap();
        let c = commit(&game, Move::Paper, "bob", BOB);
        game.play(c, BOB, FEE).unwrap();
        game.reveal(Move::Paper, &Salt::from("alice"), ALICE).unwrap();
        game.reveal(Move::Paper, &Salt::from("bob"), BOB).unwrap();

        let events = game.take_events();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            GameEvent::PlayerEnrolled {
                seat: Seat::First,
                player: ALICE,
                ..
            }
        ));
        assert_eq!(
            events[4],
            GameEvent::GameResolved {
                result: GameResult::Draw,
                winner: Address::ZERO
            }
        );
        assert!(game.events().is_empty());
    }
}

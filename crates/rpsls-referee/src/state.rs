//! Shared referee state: every hosted game, keyed by id.

use rpsls_core::{EngineConfig, GameEngine, GameId};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct RefereeState {
    /// Settings for games created without explicit overrides
    defaults: EngineConfig,
    games: RwLock<HashMap<GameId, GameEngine>>,
}

impl RefereeState {
    pub fn new(defaults: EngineConfig) -> Self {
        Self {
            defaults,
            games: RwLock::new(HashMap::new()),
        }
    }

    pub fn defaults(&self) -> &EngineConfig {
        &self.defaults
    }

    /// Games stay hosted until `remove_game` is called for them
    pub fn create_game(&self, config: EngineConfig) -> GameId {
        let game_id = GameId::new();
        self.games
            .write()
            .unwrap()
            .insert(game_id, GameEngine::new(config));
        game_id
    }

    pub fn remove_game(&self, game_id: &GameId) -> Option<GameEngine> {
        self.games.write().unwrap().remove(game_id)
    }

    /// Run `f` against a game under the read lock
    pub fn with_game<R>(&self, game_id: &GameId, f: impl FnOnce(&GameEngine) -> R) -> Option<R> {
        self.games.read().unwrap().get(game_id).map(f)
    }

    /// Run `f` against a game under the write lock. This is the only place
    /// engine actions run, so actions on one game are applied one at a time.
    pub fn with_game_mut<R>(
        &self,
        game_id: &GameId,
        f: impl FnOnce(&mut GameEngine) -> R,
    ) -> Option<R> {
        self.games.write().unwrap().get_mut(game_id).map(f)
    }

    /// Snapshot of every game for listings
    pub fn list<R>(&self, f: impl Fn(&GameId, &GameEngine) -> R) -> Vec<R> {
        self.games
            .read()
            .unwrap()
            .iter()
            .map(|(id, game)| f(id, game))
            .collect()
    }
}

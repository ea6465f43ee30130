//! HTTP API handlers.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rpsls_core::{
    protocol::{PlayMessage, RevealMessage},
    Address, Commitment, EngineError, GameEngine, GameEvent, GameId, GameResult, GameState, Move,
    PlayerSlot, RuleSet, Salt, Seat,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::RefereeState;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("No player in slot {0}")]
    EmptySlot(usize),

    #[error("Invalid slot index {0}, expected 0 or 1")]
    BadSlot(usize),

    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::GameNotFound(_) | AppError::EmptySlot(_) => StatusCode::NOT_FOUND,
            AppError::BadSlot(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Engine(_) => StatusCode::CONFLICT,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::GameNotFound(_) => "game_not_found",
            AppError::EmptySlot(_) => "empty_slot",
            AppError::BadSlot(_) => "bad_slot",
            AppError::BadRequest(_) => "bad_request",
            AppError::Engine(err) => err.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// === Request/Response types ===

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CreateGameRequest {
    pub entry_fee: Option<u128>,
    pub rules: Option<RuleSet>,
}

#[derive(Serialize)]
pub struct GameSummary {
    pub game_id: GameId,
    pub state: GameState,
    pub entry_fee: u128,
    pub rules: RuleSet,
}

impl GameSummary {
    fn new(game_id: GameId, game: &GameEngine) -> Self {
        Self {
            game_id,
            state: game.state(),
            entry_fee: game.entry_fee(),
            rules: game.rules(),
        }
    }
}

#[derive(Serialize)]
pub struct GamesResponse {
    pub games: Vec<GameSummary>,
}

#[derive(Deserialize)]
pub struct HashQuery {
    pub mv: Move,
    pub salt: String,
    pub player: Address,
}

#[derive(Serialize)]
pub struct HashResponse {
    pub commitment: Commitment,
}

#[derive(Serialize)]
pub struct PlayResponse {
    pub seat: Seat,
    pub state: GameState,
}

#[derive(Serialize)]
pub struct RevealResponse {
    pub state: GameState,
    pub winner: Address,
}

#[derive(Serialize)]
pub struct WinnerResponse {
    pub state: GameState,
    pub outcome: Option<GameResult>,
    pub winner: Address,
    pub pot: u128,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<GameEvent>,
}

type Shared = State<Arc<RefereeState>>;

// === Route handlers ===

pub async fn health() -> &'static str {
    "ok"
}

/// An empty body creates a game with the service defaults
pub async fn create_game(
    State(state): Shared,
    body: Bytes,
) -> Result<Json<GameSummary>, AppError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateGameRequest::default()
    } else {
        serde_json::from_slice::<CreateGameRequest>(&body)
            .map_err(|err| AppError::BadRequest(err.to_string()))
            .inspect_err(|err| warn!(%err, "create rejected"))?
    };

    let defaults = *state.defaults();
    let config = defaults
        .with_entry_fee(req.entry_fee.unwrap_or(defaults.entry_fee))
        .with_rules(req.rules.unwrap_or(defaults.rules));

    let game_id = state.create_game(config);
    info!(%game_id, entry_fee = %config.entry_fee, rules = %config.rules, "created game");

    state
        .with_game(&game_id, |game| GameSummary::new(game_id, game))
        .map(Json)
        .ok_or(AppError::GameNotFound(game_id))
}

pub async fn list_games(State(state): Shared) -> Json<GamesResponse> {
    let games = state.list(|id, game| GameSummary::new(*id, game));

    Json(GamesResponse { games })
}

pub async fn remove_game(
    State(state): Shared,
    Path(game_id): Path<GameId>,
) -> Result<Json<GameSummary>, AppError> {
    let game = state
        .remove_game(&game_id)
        .ok_or(AppError::GameNotFound(game_id))?;
    info!(%game_id, state = ?game.state(), "removed game");

    Ok(Json(GameSummary::new(game_id, &game)))
}

pub async fn get_hash(
    State(state): Shared,
    Path(game_id): Path<GameId>,
    Query(query): Query<HashQuery>,
) -> Result<Json<HashResponse>, AppError> {
    let salt = Salt::from(query.salt);
    let commitment = state
        .with_game(&game_id, |game| game.get_hash(query.mv, &salt, &query.player))
        .ok_or(AppError::GameNotFound(game_id))?;

    Ok(Json(HashResponse { commitment }))
}

pub async fn play(
    State(state): Shared,
    Path(game_id): Path<GameId>,
    Json(req): Json<PlayMessage>,
) -> Result<Json<PlayResponse>, AppError> {
    let (seat, game_state) = state
        .with_game_mut(&game_id, |game| {
            game.play(req.commitment, req.player, req.value)
                .map(|seat| (seat, game.state()))
        })
        .ok_or(AppError::GameNotFound(game_id))?
        .inspect_err(|err| warn!(%game_id, player = %req.player, %err, "play rejected"))?;

    Ok(Json(PlayResponse {
        seat,
        state: game_state,
    }))
}

pub async fn reveal(
    State(state): Shared,
    Path(game_id): Path<GameId>,
    Json(req): Json<RevealMessage>,
) -> Result<Json<RevealResponse>, AppError> {
    let (game_state, winner) = state
        .with_game_mut(&game_id, |game| {
            game.reveal(req.mv, &req.salt, req.player)
                .map(|()| (game.state(), game.winner()))
        })
        .ok_or(AppError::GameNotFound(game_id))?
        .inspect_err(|err| warn!(%game_id, player = %req.player, %err, "reveal rejected"))?;

    if game_state == GameState::Resolved {
        info!(%game_id, %winner, "game resolved");
    }

    Ok(Json(RevealResponse {
        state: game_state,
        winner,
    }))
}

pub async fn get_player(
    State(state): Shared,
    Path((game_id, index)): Path<(GameId, usize)>,
) -> Result<Json<PlayerSlot>, AppError> {
    let seat = Seat::try_from(index).map_err(AppError::BadSlot)?;
    state
        .with_game(&game_id, |game| game.player(seat).cloned())
        .ok_or(AppError::GameNotFound(game_id))?
        .map(Json)
        .ok_or(AppError::EmptySlot(index))
}

pub async fn get_winner(
    State(state): Shared,
    Path(game_id): Path<GameId>,
) -> Result<Json<WinnerResponse>, AppError> {
    state
        .with_game(&game_id, |game| WinnerResponse {
            state: game.state(),
            outcome: game.outcome(),
            winner: game.winner(),
            pot: game.pot(),
        })
        .map(Json)
        .ok_or(AppError::GameNotFound(game_id))
}

/// Drains the game's event log
pub async fn take_events(
    State(state): Shared,
    Path(game_id): Path<GameId>,
) -> Result<Json<EventsResponse>, AppError> {
    state
        .with_game_mut(&game_id, |game| EventsResponse {
            events: game.take_events(),
        })
        .map(Json)
        .ok_or(AppError::GameNotFound(game_id))
}

//! RPSLS Referee Service
//!
//! HTTP service that hosts commit-reveal games, enforces entry fees, checks
//! reveals against commitments, and reports winners.

mod config;
mod handlers;
mod state;


use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::RefereeConfig;
use handlers::*;
use state::RefereeState;

fn create_router(state: Arc<RefereeState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games))
        .route("/game/create", post(create_game))
        .route("/game/:game_id", delete(remove_game))
        .route("/game/:game_id/hash", get(get_hash))
        .route("/game/:game_id/play", post(play))
        .route("/game/:game_id/reveal", post(reveal))
        .route("/game/:game_id/players/:index", get(get_player))
        .route("/game/:game_id/winner", get(get_winner))
        .route("/game/:game_id/events", get(take_events))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RefereeConfig::from_env()?;
    info!(
        entry_fee = %config.engine.entry_fee,
        rules = %config.engine.rules,
        "default game settings"
    );

    let app = create_router(Arc::new(RefereeState::new(config.engine)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Referee service listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

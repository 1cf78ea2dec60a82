//! Router and request handlers.
//!
//! Every phase-1 route resolves the caller in the same order: game id, then
//! identity, then the caller's tournament state. Only then is the body read.
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use battle_core::{GameId, PlayerIdentity, TournamentStateId};
use battle_runtime::{NextBattle, Phase1Engine};

use crate::error::ApiError;
use crate::wire::{
    BATTLE_SUBMITTED, HealthResponse, NextBattleResponse, ProgressResponse, SubmitBattleRequest,
    SubmitBattleResponse,
};

/// Header carrying the already-authenticated player identity.
pub const PLAYER_HEADER: &str = "x-player-email";

#[derive(Clone)]
pub struct AppState {
    engine: Phase1Engine,
}

impl AppState {
    pub fn new(engine: Phase1Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Phase1Engine {
        &self.engine
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/games/:id/phase1/next-battle", get(next_battle))
        .route("/api/games/:id/phase1/battle", post(submit_battle))
        .route("/api/games/:id/phase1/progress", get(progress))
        .with_state(state)
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn next_battle(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<NextBattleResponse>, ApiError> {
    let engine = state.engine().clone();
    let response = run_blocking(move || {
        let state_id = resolve_state(&engine, &game_id, &headers)?;
        let response = match engine.next_battle(state_id)? {
            NextBattle::Ready(pairing) => NextBattleResponse::ready(pairing),
            NextBattle::Exhausted => NextBattleResponse::exhausted(),
        };
        Ok(response)
    })
    .await?;
    Ok(Json(response))
}

async fn submit_battle(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitBattleResponse>, ApiError> {
    let engine = state.engine().clone();
    let battle = run_blocking(move || {
        let state_id = resolve_state(&engine, &game_id, &headers)?;
        let submission = SubmitBattleRequest::from_slice(&body)?.into_submission();
        Ok(engine.submit_battle(state_id, &submission)?)
    })
    .await?;
    Ok(Json(SubmitBattleResponse {
        battle,
        message: BATTLE_SUBMITTED,
    }))
}

async fn progress(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProgressResponse>, ApiError> {
    let engine = state.engine().clone();
    let progress = run_blocking(move || {
        let state_id = resolve_state(&engine, &game_id, &headers)?;
        Ok(engine.progress(state_id)?)
    })
    .await?;
    Ok(Json(ProgressResponse { progress }))
}

/// Store calls take synchronous locks and may touch the filesystem.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("handler task failed: {e}")))?
}

fn resolve_state(
    engine: &Phase1Engine,
    raw_game_id: &str,
    headers: &HeaderMap,
) -> Result<TournamentStateId, ApiError> {
    let game_id = parse_game_id(raw_game_id)?;
    let player = player_identity(headers)?;
    let state = engine
        .tournament_state_for(game_id, &player)?
        .ok_or_else(ApiError::player_game_not_found)?;
    Ok(state.id)
}

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse::<u32>()
        .map(GameId::from)
        .map_err(|_| ApiError::InvalidGameId)
}

fn player_identity(headers: &HeaderMap) -> Result<PlayerIdentity, ApiError> {
    headers
        .get(PLAYER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(PlayerIdentity::new)
        .ok_or(ApiError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn game_ids_must_be_unsigned_integers() {
        assert_eq!(parse_game_id("12").unwrap(), GameId(12));
        for raw in ["", "-1", "abc", "1.5", "12abc"] {
            assert!(matches!(parse_game_id(raw), Err(ApiError::InvalidGameId)));
        }
    }

    #[test]
    fn blank_identity_is_unauthorized() {
        let mut headers = HeaderMap::new();
        assert!(matches!(player_identity(&headers), Err(ApiError::Unauthorized)));

        headers.insert(PLAYER_HEADER, HeaderValue::from_static("   "));
        assert!(matches!(player_identity(&headers), Err(ApiError::Unauthorized)));

        headers.insert(PLAYER_HEADER, HeaderValue::from_static(" sam@example.com "));
        assert_eq!(player_identity(&headers).unwrap().as_str(), "sam@example.com");
    }
}

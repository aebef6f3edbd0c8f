//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::Player,
    infrastructure::dto::http::{HealthDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get list of rooms
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    match state.get_rooms_usecase.execute().await {
        // Domain Model から DTO への変換
        Ok(rooms) => Ok(Json(rooms.iter().map(RoomSummaryDto::from).collect())),
        Err(e) => {
            tracing::error!("Failed to list rooms: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get list of connected players
pub async fn get_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Player>>, StatusCode> {
    state.get_players_usecase.execute().await.map(Json).map_err(|e| {
        tracing::error!("Failed to list players: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

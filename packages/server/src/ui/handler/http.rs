//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    domain::{RoomName, Username},
    infrastructure::dto::{
        conversion::{click_counts, countdown_label},
        http::{RoomDto, RoomPageDto, RoomStateDto},
    },
    ui::state::AppState,
};

/// htmx reads this header and navigates the browser to its value.
const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Form of the "create room" action. The field name comes from the
/// search box of the index page.
#[derive(Debug, Deserialize)]
pub struct CreateRoomForm {
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRoomForm {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomPageQuery {
    #[serde(default)]
    pub username: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms, oldest first
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomDto>> {
    let rooms = state.list_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomDto::from).collect())
}

/// Create a room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateRoomForm>,
) -> Json<RoomDto> {
    let room = state
        .create_room_usecase
        .execute(RoomName::from(form.search))
        .await;
    Json(room.into())
}

/// Tell the client where to go to join a room
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Form(form): Form<JoinRoomForm>,
) -> Result<impl IntoResponse, StatusCode> {
    let target = state
        .join_room_usecase
        .execute(&RoomName::from(form.room), &Username::from(form.username));

    let value = HeaderValue::from_str(&target).map_err(|e| {
        tracing::error!("Invalid redirect target '{}': {}", target, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok((StatusCode::OK, [(HX_REDIRECT, value)]))
}

/// Data of a room page
pub async fn room_page(
    Path(room): Path<String>,
    Query(query): Query<RoomPageQuery>,
) -> Json<RoomPageDto> {
    Json(RoomPageDto {
        room,
        username: query.username,
    })
}

/// Debug endpoint to get the live state of a room
pub async fn debug_room_state(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Json<RoomStateDto> {
    let snapshot = state
        .get_room_state_usecase
        .execute(&RoomName::from(room))
        .await;

    Json(RoomStateDto {
        room: snapshot.name.into_string(),
        occupancy: snapshot.occupancy,
        countdown: countdown_label(snapshot.countdown).to_string(),
        seconds_remaining: snapshot.countdown.seconds_remaining(),
        clicks: click_counts(&snapshot.tally),
    })
}

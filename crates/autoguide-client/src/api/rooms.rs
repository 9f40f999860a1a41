//! Room management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

/// A bookable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
}

/// Payload for updating a room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
}

pub async fn fetch_rooms(http: &RequestPipeline) -> AppResult<Vec<Room>> {
    http.get_json("/api/v1/rooms").await
}

pub async fn create_room(http: &RequestPipeline, payload: &CreateRoomRequest) -> AppResult<Room> {
    http.post_json("/api/v1/rooms", payload).await
}

pub async fn update_room(
    http: &RequestPipeline,
    id: &str,
    payload: &UpdateRoomRequest,
) -> AppResult<Room> {
    http.put_json(&format!("/api/v1/rooms/{id}"), payload).await
}

pub async fn delete_room(http: &RequestPipeline, id: &str) -> AppResult<()> {
    http.delete(&format!("/api/v1/rooms/{id}")).await
}

//! Hotel management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

/// A hotel property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub address_line: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating a hotel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPayload {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub address_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

pub async fn fetch_hotels(http: &RequestPipeline) -> AppResult<Vec<Hotel>> {
    http.get_json("/api/v1/hotels").await
}

pub async fn create_hotel(http: &RequestPipeline, payload: &HotelPayload) -> AppResult<Hotel> {
    http.post_json("/api/v1/hotels", payload).await
}

pub async fn update_hotel(
    http: &RequestPipeline,
    id: &str,
    payload: &HotelPayload,
) -> AppResult<Hotel> {
    http.put_json(&format!("/api/v1/hotels/{id}"), payload).await
}

pub async fn delete_hotel(http: &RequestPipeline, id: &str) -> AppResult<()> {
    http.delete(&format!("/api/v1/hotels/{id}")).await
}

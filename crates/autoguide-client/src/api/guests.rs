//! Guest management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

/// A registered guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a guest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
}

pub async fn fetch_guests(http: &RequestPipeline) -> AppResult<Vec<Guest>> {
    http.get_json("/api/v1/guests").await
}

pub async fn create_guest(http: &RequestPipeline, payload: &CreateGuestRequest) -> AppResult<Guest> {
    http.post_json("/api/v1/guests", payload).await
}

//! Typed pass-through calls to the AutoGuide REST backend.
//!
//! Every function takes the shared [`RequestPipeline`](crate::RequestPipeline)
//! and maps one backend endpoint; no business logic lives client-side.

pub mod bookings;
pub mod guests;
pub mod hotels;
pub mod public;
pub mod rooms;

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

/// Backend health probe.
pub async fn fetch_health(http: &RequestPipeline) -> AppResult<serde_json::Value> {
    http.get_json("/actuator/health").await
}

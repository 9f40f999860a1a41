//! Booking workflow endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Created,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Wire value as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// A booking with its denormalized guest/room display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    pub guest_full_name: String,
    pub room_id: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a booking from the back office.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub guest_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct UpdateBookingStatusRequest {
    status: BookingStatus,
}

/// An AI-generated follow-up suggestion for a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecommendation {
    pub id: String,
    pub booking_id: String,
    pub suggestion: String,
    pub model: String,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

fn status_query(status: Option<BookingStatus>) -> Vec<(&'static str, String)> {
    status
        .map(|s| vec![("status", s.as_str().to_string())])
        .unwrap_or_default()
}

pub async fn fetch_bookings(
    http: &RequestPipeline,
    status: Option<BookingStatus>,
) -> AppResult<Vec<Booking>> {
    http.get_json_with_query("/api/v1/bookings", &status_query(status))
        .await
}

pub async fn fetch_my_bookings(
    http: &RequestPipeline,
    status: Option<BookingStatus>,
) -> AppResult<Vec<Booking>> {
    http.get_json_with_query("/api/v1/bookings/my", &status_query(status))
        .await
}

pub async fn fetch_booking_by_id(http: &RequestPipeline, id: &str) -> AppResult<Booking> {
    http.get_json(&format!("/api/v1/bookings/{id}")).await
}

pub async fn create_booking(
    http: &RequestPipeline,
    payload: &CreateBookingRequest,
) -> AppResult<Booking> {
    http.post_json("/api/v1/bookings", payload).await
}

pub async fn update_booking_status(
    http: &RequestPipeline,
    id: &str,
    status: BookingStatus,
) -> AppResult<Booking> {
    http.patch_json(
        &format!("/api/v1/bookings/{id}/status"),
        &UpdateBookingStatusRequest { status },
    )
    .await
}

pub async fn fetch_booking_recommendations(
    http: &RequestPipeline,
    booking_id: &str,
) -> AppResult<Vec<BookingRecommendation>> {
    http.get_json(&format!("/api/v1/booking-recommendations/{booking_id}"))
        .await
}

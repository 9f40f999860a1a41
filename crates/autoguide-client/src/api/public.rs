//! Public (unauthenticated) content endpoints used by the guest-facing views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autoguide_core::result::AppResult;

use crate::http::RequestPipeline;

use super::bookings::Booking;
use super::hotels::Hotel;

/// Landing-page amenity blurb.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAmenity {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Landing-page offer card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOffer {
    pub id: String,
    pub title: String,
    pub note: String,
    pub price_label: String,
}

/// Landing-page content bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHome {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image_url: Option<String>,
    pub amenities: Vec<PublicAmenity>,
    pub offers: Vec<PublicOffer>,
}

/// Featured room teaser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomHighlight {
    pub id: String,
    pub hotel_id: Option<String>,
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate: f64,
    pub image_url: Option<String>,
    pub short_description: Option<String>,
}

/// Payload for a guest-facing booking with prepayment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCreateBookingRequest {
    pub full_name: String,
    pub email: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub payment_method: String,
    pub prepayment_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

pub async fn fetch_public_home(http: &RequestPipeline) -> AppResult<PublicHome> {
    http.get_json("/api/v1/public/home").await
}

pub async fn fetch_public_hotels(http: &RequestPipeline) -> AppResult<Vec<Hotel>> {
    http.get_json("/api/v1/public/hotels").await
}

pub async fn fetch_public_room_highlights(
    http: &RequestPipeline,
    limit: u32,
    hotel_id: Option<&str>,
) -> AppResult<Vec<RoomHighlight>> {
    let mut query = vec![("limit", limit.to_string())];
    if let Some(hotel_id) = hotel_id {
        query.push(("hotelId", hotel_id.to_string()));
    }
    http.get_json_with_query("/api/v1/public/rooms/highlights", &query)
        .await
}

pub async fn create_public_booking(
    http: &RequestPipeline,
    payload: &PublicCreateBookingRequest,
) -> AppResult<Booking> {
    http.post_json("/api/v1/public/bookings", payload).await
}

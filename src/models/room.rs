use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

/// Beds available inside a single bedroom.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BedroomBeds {
    pub id: i64,
    pub beds: Vec<BedCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BedCount {
    #[serde(rename = "type")]
    pub bed_type: String,
    pub count: i64,
}

/// A room as persisted in the store, id and timestamps included.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredRoom {
    pub id: i64,
    pub large_building_type: String,
    pub building_type: String,
    pub room_type: String,
    pub is_set_up_for_guest: bool,
    pub maximum_guest_count: i64,
    pub bedroom_count: i64,
    pub bed_count: i64,
    pub bed_list: Vec<BedroomBeds>,
    pub public_bed_list: Vec<BedCount>,
    pub bathroom_count: i64,
    pub bathroom_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: String,
    pub district: String,
    pub street_address: String,
    pub detail_address: String,
    pub postcode: String,
    pub amenities: Vec<String>,
    pub conveniences: Vec<String>,
    pub photos: Vec<String>,
    pub description: String,
    pub title: String,
    pub price: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub host_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload: the full room field set minus id and timestamps.
///
/// Every field is `Option` so that presence can be validated explicitly;
/// a defined-but-falsy value (`false`, `0`, `""`) is valid, only a missing
/// or null field is not.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    #[validate(required)]
    pub large_building_type: Option<String>,
    #[validate(required)]
    pub building_type: Option<String>,
    #[validate(required)]
    pub room_type: Option<String>,
    #[validate(required)]
    pub is_set_up_for_guest: Option<bool>,
    #[validate(required)]
    pub maximum_guest_count: Option<i64>,
    #[validate(required)]
    pub bedroom_count: Option<i64>,
    #[validate(required)]
    pub bed_count: Option<i64>,
    #[validate(required)]
    pub bed_list: Option<Vec<BedroomBeds>>,
    #[validate(required)]
    pub public_bed_list: Option<Vec<BedCount>>,
    #[validate(required)]
    pub bathroom_count: Option<i64>,
    #[validate(required)]
    pub bathroom_type: Option<String>,
    #[validate(required)]
    pub latitude: Option<f64>,
    #[validate(required)]
    pub longitude: Option<f64>,
    #[validate(required)]
    pub country: Option<String>,
    #[validate(required)]
    pub city: Option<String>,
    #[validate(required)]
    pub district: Option<String>,
    #[validate(required)]
    pub street_address: Option<String>,
    #[validate(required)]
    pub detail_address: Option<String>,
    #[validate(required)]
    pub postcode: Option<String>,
    #[validate(required)]
    pub amenities: Option<Vec<String>>,
    #[validate(required)]
    pub conveniences: Option<Vec<String>>,
    #[validate(required)]
    pub photos: Option<Vec<String>>,
    #[validate(required)]
    pub description: Option<String>,
    #[validate(required)]
    pub title: Option<String>,
    #[validate(required)]
    pub price: Option<i64>,
    #[validate(required)]
    pub start_date: Option<NaiveDate>,
    #[validate(required)]
    pub end_date: Option<NaiveDate>,
    #[validate(required)]
    pub host_id: Option<i64>,
}

impl CreateRoom {
    /// Builds the stored record once presence validation has passed.
    /// Returns `None` if any field is still missing.
    pub fn into_room(self, id: i64, now: DateTime<Utc>) -> Option<StoredRoom> {
        Some(StoredRoom {
            id,
            large_building_type: self.large_building_type?,
            building_type: self.building_type?,
            room_type: self.room_type?,
            is_set_up_for_guest: self.is_set_up_for_guest?,
            maximum_guest_count: self.maximum_guest_count?,
            bedroom_count: self.bedroom_count?,
            bed_count: self.bed_count?,
            bed_list: self.bed_list?,
            public_bed_list: self.public_bed_list?,
            bathroom_count: self.bathroom_count?,
            bathroom_type: self.bathroom_type?,
            latitude: self.latitude?,
            longitude: self.longitude?,
            country: self.country?,
            city: self.city?,
            district: self.district?,
            street_address: self.street_address?,
            detail_address: self.detail_address?,
            postcode: self.postcode?,
            amenities: self.amenities?,
            conveniences: self.conveniences?,
            photos: self.photos?,
            description: self.description?,
            title: self.title?,
            price: self.price?,
            start_date: self.start_date?,
            end_date: self.end_date?,
            host_id: self.host_id?,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A listed room with its resolved host attached. An unknown host id
/// simply omits the field instead of failing the listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomWithHost {
    #[serde(flatten)]
    pub room: StoredRoom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<User>,
}

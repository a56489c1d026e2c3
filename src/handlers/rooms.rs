use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::db::Store;
use crate::models::room::{CreateRoom, RoomWithHost, StoredRoom};

#[derive(serde::Serialize)]
struct ErrorResponse {
    message: String,
}

fn default_page() -> usize {
    1
}

/// Listing filters. All of them are optional; an absent filter matches
/// every room. Coordinates stay strings so the `"0"` sentinel sent by the
/// map widget can be told apart from a real coordinate.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSearch {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub adult_count: Option<f64>,
    pub children_count: Option<f64>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub limit: Option<usize>,
    #[serde(default = "default_page")]
    pub page: usize,
}

impl RoomSearch {
    pub fn matches(&self, room: &StoredRoom) -> bool {
        self.location_matches(room) && self.dates_match(room) && self.capacity_matches(room)
    }

    fn location_matches(&self, room: &StoredRoom) -> bool {
        let (lat, lng) = match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(lat), Some(lng)) if !lat.is_empty() && lat != "0" && !lng.is_empty() && lng != "0" => {
                (lat, lng)
            }
            _ => return true,
        };
        let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) else {
            return false;
        };
        // Window is asymmetric: 0.5 below, 0.05 above. Inherited from the
        // data set this serves; see DESIGN.md.
        lat - 0.5 < room.latitude
            && room.latitude < lat + 0.05
            && lng - 0.5 < room.longitude
            && room.longitude < lng + 0.05
    }

    /// Check-in and check-out must each fall inside the room's availability
    /// window. The two dates are never compared to each other.
    fn dates_match(&self, room: &StoredRoom) -> bool {
        let in_window = |date: NaiveDate| room.start_date <= date && date <= room.end_date;
        self.check_in_date.map_or(true, in_window) && self.check_out_date.map_or(true, in_window)
    }

    /// Children count for half a guest each. Without an adult count the
    /// filter does not apply.
    fn capacity_matches(&self, room: &StoredRoom) -> bool {
        let Some(adults) = self.adult_count else {
            return true;
        };
        let guests = adults + self.children_count.unwrap_or(0.0) * 0.5;
        (room.maximum_guest_count as f64) >= guests
    }
}

/// Non-mutating offset/limit slice. No limit means no pagination.
fn page_slice<T>(items: Vec<T>, page: usize, limit: Option<usize>) -> Vec<T> {
    let Some(limit) = limit else {
        return items;
    };
    let offset = page.saturating_sub(1).saturating_mul(limit);
    items.into_iter().skip(offset).take(limit).collect()
}

pub async fn get_rooms(store: web::Data<Store>, params: web::Query<RoomSearch>) -> impl Responder {
    let rooms = match store.list_rooms() {
        Ok(rooms) => rooms,
        Err(e) => {
            log::error!("failed to read room collection: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let filtered: Vec<StoredRoom> = rooms.into_iter().filter(|r| params.matches(r)).collect();
    let page = page_slice(filtered, params.page, params.limit);

    let mut enriched = Vec::with_capacity(page.len());
    for room in page {
        let host = match store.find_user(room.host_id) {
            Ok(host) => host,
            Err(e) => {
                log::error!("failed to resolve host {}: {}", room.host_id, e);
                return HttpResponse::InternalServerError().finish();
            }
        };
        enriched.push(RoomWithHost { room, host });
    }

    HttpResponse::Ok().json(enriched)
}

pub async fn create_room(store: web::Data<Store>, body: web::Json<CreateRoom>) -> impl Responder {
    if let Err(errors) = body.validate() {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|f| camel(f)).collect();
        fields.sort();
        return HttpResponse::BadRequest().json(ErrorResponse {
            message: format!("missing required fields: {}", fields.join(", ")),
        });
    }

    let mut rooms = match store.list_rooms() {
        Ok(rooms) => rooms,
        Err(e) => {
            log::error!("failed to read room collection: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                message: "failed to save room".to_string(),
            });
        }
    };

    let next_id = rooms.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    let Some(room) = body.into_inner().into_room(next_id, Utc::now()) else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            message: "missing required fields".to_string(),
        });
    };

    rooms.push(room);
    match store.write_rooms(&rooms) {
        Ok(()) => HttpResponse::Created().finish(),
        Err(e) => {
            log::error!("failed to write room collection: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: "failed to save room".to_string(),
            })
        }
    }
}

pub async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed().finish()
}

fn camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room() -> StoredRoom {
        StoredRoom {
            id: 1,
            large_building_type: "apartment".to_string(),
            building_type: "apartment".to_string(),
            room_type: "entire".to_string(),
            is_set_up_for_guest: true,
            maximum_guest_count: 4,
            bedroom_count: 2,
            bed_count: 2,
            bed_list: vec![],
            public_bed_list: vec![],
            bathroom_count: 1,
            bathroom_type: "private".to_string(),
            latitude: 37.50,
            longitude: 127.00,
            country: "KR".to_string(),
            city: "Seoul".to_string(),
            district: "Mapo".to_string(),
            street_address: "1 Some St".to_string(),
            detail_address: String::new(),
            postcode: "04000".to_string(),
            amenities: vec![],
            conveniences: vec![],
            photos: vec![],
            description: "desc".to_string(),
            title: "title".to_string(),
            price: 100_000,
            start_date: date(2026, 6, 1),
            end_date: date(2026, 6, 30),
            host_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn no_filters_match_every_room() {
        let search = RoomSearch::default();
        assert!(search.matches(&room()));
    }

    #[test]
    fn capacity_counts_children_as_half_a_guest() {
        let mut search = RoomSearch {
            adult_count: Some(3.0),
            children_count: Some(2.0),
            ..RoomSearch::default()
        };
        // 3 + 2 * 0.5 = 4 fits a maximum of 4
        assert!(search.matches(&room()));

        search.children_count = Some(3.0);
        assert!(!search.matches(&room()));
    }

    #[test]
    fn capacity_filter_needs_an_adult_count() {
        let search = RoomSearch {
            children_count: Some(40.0),
            ..RoomSearch::default()
        };
        assert!(search.matches(&room()));
    }

    #[test]
    fn check_in_outside_the_availability_window_excludes() {
        let mut search = RoomSearch {
            check_in_date: Some(date(2026, 5, 31)),
            ..RoomSearch::default()
        };
        assert!(!search.matches(&room()));

        search.check_in_date = Some(date(2026, 6, 1));
        assert!(search.matches(&room()));
    }

    #[test]
    fn check_out_is_checked_against_the_same_window() {
        let search = RoomSearch {
            check_in_date: Some(date(2026, 6, 10)),
            check_out_date: Some(date(2026, 7, 1)),
            ..RoomSearch::default()
        };
        assert!(!search.matches(&room()));

        let inverted = RoomSearch {
            // check-out before check-in still passes; the dates are
            // independent window checks
            check_in_date: Some(date(2026, 6, 20)),
            check_out_date: Some(date(2026, 6, 10)),
            ..RoomSearch::default()
        };
        assert!(inverted.matches(&room()));
    }

    #[test]
    fn location_window_is_asymmetric() {
        let mut search = RoomSearch {
            latitude: Some("37.50".to_string()),
            longitude: Some("127.00".to_string()),
            ..RoomSearch::default()
        };
        assert!(search.matches(&room()));

        // 0.3 below the query point is inside the 0.5 lower margin
        search.latitude = Some("37.80".to_string());
        assert!(search.matches(&room()));

        // 0.3 above the query point is outside the 0.05 upper margin
        search.latitude = Some("37.20".to_string());
        assert!(!search.matches(&room()));
    }

    #[test]
    fn zero_coordinates_disable_the_location_filter() {
        let search = RoomSearch {
            latitude: Some("0".to_string()),
            longitude: Some("0".to_string()),
            ..RoomSearch::default()
        };
        assert!(search.matches(&room()));
    }

    #[test]
    fn unparseable_coordinates_match_nothing() {
        let search = RoomSearch {
            latitude: Some("here".to_string()),
            longitude: Some("127.0".to_string()),
            ..RoomSearch::default()
        };
        assert!(!search.matches(&room()));
    }

    #[test]
    fn page_slice_returns_the_requested_page() {
        let items: Vec<i32> = (1..=10).collect();
        assert_eq!(page_slice(items.clone(), 1, Some(3)), vec![1, 2, 3]);
        assert_eq!(page_slice(items.clone(), 2, Some(3)), vec![4, 5, 6]);
        assert_eq!(page_slice(items.clone(), 4, Some(3)), vec![10]);
        assert_eq!(page_slice(items.clone(), 5, Some(3)), Vec::<i32>::new());
    }

    #[test]
    fn page_slice_without_a_limit_returns_everything() {
        let items: Vec<i32> = (1..=10).collect();
        assert_eq!(page_slice(items.clone(), 3, None), items);
    }

    #[test]
    fn camel_matches_wire_field_names() {
        assert_eq!(camel("maximum_guest_count"), "maximumGuestCount");
        assert_eq!(camel("price"), "price");
    }
}

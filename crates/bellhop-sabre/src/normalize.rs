//! Normalization from the provider's nested availability response to the
//! flat domain model.
//!
//! Policy is defensive degradation: a response that parses as JSON but lacks
//! the expected structure yields an empty (or partial) hotel list, never an
//! error. A partially usable response is worth more than none on the search
//! path. Entries that fail to deserialize are logged through a debug side
//! channel so unmapped schema drift stays visible.

use bellhop_core::{Address, Amenity, HotelResult, RoomRate};

use crate::types::{RawHotelAvail, RawImage, RawRate};

/// Shown when a hotel has no usable imagery; the UI never renders an empty
/// thumbnail.
const PLACEHOLDER_IMAGE_URL: &str =
    "https://static.bellhopping.com/images/hotel-placeholder.jpg";

const DEFAULT_MAX_OCCUPANCY: u32 = 2;

/// Extracts the flat hotel list from a full availability response body.
///
/// Tolerates an absent, `null`, or non-array `HotelAvailInfo` field — all
/// of those normalize to an empty list.
#[must_use]
pub fn parse_search_response(body: &serde_json::Value) -> Vec<HotelResult> {
    let entries = match body
        .pointer("/GetHotelAvailRS/HotelAvailInfos/HotelAvailInfo")
        .and_then(serde_json::Value::as_array)
    {
        Some(entries) => entries,
        None => {
            tracing::debug!("availability response carries no hotel list");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<RawHotelAvail>(entry.clone()) {
            Ok(raw) => normalize_hotel(raw),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unparseable hotel entry");
                None
            }
        })
        .collect()
}

/// Flattens one raw hotel. Returns `None` when the entry has no hotel code —
/// without the join key the record is unusable downstream.
fn normalize_hotel(raw: RawHotelAvail) -> Option<HotelResult> {
    let info = raw.hotel_info;
    let hotel_code = info.hotel_code?;

    let coordinates = match (info.location_info.latitude, info.location_info.longitude) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };

    let address = Address {
        line1: info.location_info.address.address_line1,
        city: info.location_info.address.city_name,
        state_code: info.location_info.address.state_prov,
        postal_code: info.location_info.address.postal_code,
        country_code: info.location_info.address.country_code,
    };

    let amenities = info
        .amenities
        .amenity
        .into_iter()
        .map(|a| Amenity {
            code: a.code,
            description: a.description,
        })
        .collect();

    // Converted rates only: the sibling RateInfo list is in hotel-native
    // currency and reading it instead silently yields unusable prices.
    let room_types = raw
        .rate_info
        .rate_infos
        .converted_rate_info
        .into_iter()
        .map(normalize_rate)
        .collect();

    Some(HotelResult {
        hotel_code,
        hotel_name: info.hotel_name.unwrap_or_default(),
        chain_code: info.chain_code,
        chain_name: info.chain_name,
        star_rating: info.sabre_rating,
        address,
        coordinates,
        room_types,
        images: select_images(&raw.image_info.image_items.image),
        amenities,
        distance_miles: info.distance,
    })
}

fn normalize_rate(raw: RawRate) -> RoomRate {
    RoomRate {
        room_type: raw.room_type,
        description: raw.room_description.or(raw.rate_plan_name),
        rate_code: raw.rate_plan_code,
        amount_before_tax: raw.amount_before_tax.unwrap_or(0.0),
        amount_after_tax: raw.amount_after_tax.unwrap_or(0.0),
        currency_code: raw.currency_code,
        bed_type: raw.bed_type_name,
        max_occupancy: raw.max_occupancy.unwrap_or(DEFAULT_MAX_OCCUPANCY),
        cancellation_policy: raw.cancellation_policy,
    }
}

/// Progressive image selection:
///
/// 1. non-map category in a photographic format (JPEG/PNG),
/// 2. any non-map image,
/// 3. the first image of any kind,
/// 4. the hard-coded placeholder.
fn select_images(images: &[RawImage]) -> Vec<String> {
    let photographic: Vec<String> = images
        .iter()
        .filter(|img| !is_map(img) && is_photo_format(img))
        .filter_map(|img| img.url.clone())
        .collect();
    if !photographic.is_empty() {
        return photographic;
    }

    let non_map: Vec<String> = images
        .iter()
        .filter(|img| !is_map(img))
        .filter_map(|img| img.url.clone())
        .collect();
    if !non_map.is_empty() {
        return non_map;
    }

    if let Some(url) = images.iter().find_map(|img| img.url.clone()) {
        return vec![url];
    }

    vec![PLACEHOLDER_IMAGE_URL.to_owned()]
}

fn is_map(image: &RawImage) -> bool {
    image
        .category_name
        .as_deref()
        .is_some_and(|c| c.eq_ignore_ascii_case("map"))
}

fn is_photo_format(image: &RawImage) -> bool {
    image
        .format
        .as_deref()
        .is_some_and(|f| matches!(f.to_ascii_uppercase().as_str(), "JPG" | "JPEG" | "PNG"))
}

//! Wire types for the Sabre hotel availability API.
//!
//! Request structs are plain `Serialize` mirrors of the nested JSON schema.
//! Response parsing is deliberately lenient: the interesting sub-objects are
//! typed with `#[serde(default)]` throughout, and numeric fields the
//! provider emits inconsistently (number one day, string the next) go
//! through [`lenient_f64`]. The hotel list itself stays a
//! [`serde_json::Value`] so an absent, null, or mistyped list degrades to
//! "no hotels" instead of a parse failure — see `crate::normalize`.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HotelSearchRq {
    #[serde(rename = "GetHotelAvailRQ")]
    pub get_hotel_avail_rq: GetHotelAvailRq,
}

#[derive(Debug, Serialize)]
pub struct GetHotelAvailRq {
    #[serde(rename = "SearchCriteria")]
    pub search_criteria: SearchCriteria,
}

#[derive(Debug, Serialize)]
pub struct SearchCriteria {
    #[serde(rename = "OffsetStart")]
    pub offset_start: u32,
    #[serde(rename = "MaxSearchResults")]
    pub max_search_results: u32,
    #[serde(rename = "SortOrder")]
    pub sort_order: &'static str,
    #[serde(rename = "GeoSearch", skip_serializing_if = "Option::is_none")]
    pub geo_search: Option<GeoSearch>,
    #[serde(rename = "HotelRefs", skip_serializing_if = "Option::is_none")]
    pub hotel_refs: Option<HotelRefs>,
    #[serde(rename = "RateInfoRef")]
    pub rate_info_ref: RateInfoRef,
}

#[derive(Debug, Serialize)]
pub struct GeoSearch {
    #[serde(rename = "GeoRef")]
    pub geo_ref: GeoRef,
}

/// Exactly one of `geo_code` or `ref_point` is set, chosen by the request
/// builder's geolocation strategy.
#[derive(Debug, Serialize)]
pub struct GeoRef {
    #[serde(rename = "Radius")]
    pub radius: f64,
    #[serde(rename = "UOM")]
    pub unit_of_measure: &'static str,
    #[serde(rename = "GeoCode", skip_serializing_if = "Option::is_none")]
    pub geo_code: Option<GeoCode>,
    #[serde(rename = "RefPoint", skip_serializing_if = "Option::is_none")]
    pub ref_point: Option<RefPoint>,
}

#[derive(Debug, Serialize)]
pub struct GeoCode {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RefPoint {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "ValueContext")]
    pub value_context: &'static str,
    #[serde(rename = "RefPointType")]
    pub ref_point_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HotelRefs {
    #[serde(rename = "HotelRef")]
    pub hotel_ref: Vec<HotelRef>,
}

#[derive(Debug, Serialize)]
pub struct HotelRef {
    #[serde(rename = "HotelCode")]
    pub hotel_code: String,
}

#[derive(Debug, Serialize)]
pub struct RateInfoRef {
    #[serde(rename = "CurrencyCode")]
    pub currency_code: &'static str,
    /// One rate candidate per property: bounds response size at the cost of
    /// room-type comparison granularity.
    #[serde(rename = "BestOnly")]
    pub best_only: bool,
    #[serde(rename = "StayDateTimeRange")]
    pub stay_date_time_range: StayDateTimeRange,
    #[serde(rename = "Rooms")]
    pub rooms: Rooms,
    #[serde(rename = "RatePlanCandidates", skip_serializing_if = "Option::is_none")]
    pub rate_plan_candidates: Option<RatePlanCandidates>,
}

/// Stay dates as midnight-anchored timestamps (`YYYY-MM-DDT00:00:00`).
#[derive(Debug, Serialize)]
pub struct StayDateTimeRange {
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct Rooms {
    #[serde(rename = "Room")]
    pub room: Vec<Room>,
}

#[derive(Debug, Serialize)]
pub struct Room {
    #[serde(rename = "Index")]
    pub index: u32,
    #[serde(rename = "Adults")]
    pub adults: u32,
    #[serde(rename = "Children")]
    pub children: u32,
}

#[derive(Debug, Serialize)]
pub struct RatePlanCandidates {
    /// `false` tells the provider it may substitute other rates when no
    /// candidate matches. An exact-only match would reject responses that
    /// legitimately mix program and standard rates.
    #[serde(rename = "ExactMatchOnly")]
    pub exact_match_only: bool,
    #[serde(rename = "RatePlanCandidate")]
    pub rate_plan_candidate: Vec<RatePlanCandidate>,
}

#[derive(Debug, Serialize)]
pub struct RatePlanCandidate {
    #[serde(rename = "RatePlanCode")]
    pub rate_plan_code: String,
}

// ---------------------------------------------------------------------------
// Auth response
// ---------------------------------------------------------------------------

/// Token envelope shared by all three auth protocol variants.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Seconds until expiry. Absent in some legacy responses; callers fall
    /// back to the conservative cached-token TTL.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// ---------------------------------------------------------------------------
// Availability response (lenient)
// ---------------------------------------------------------------------------

/// One entry of the `HotelAvailInfo` array, parsed individually so a single
/// malformed hotel never poisons the whole response.
#[derive(Debug, Default, Deserialize)]
pub struct RawHotelAvail {
    #[serde(rename = "HotelInfo", default)]
    pub hotel_info: RawHotelInfo,
    #[serde(rename = "HotelImageInfo", default)]
    pub image_info: RawImageInfo,
    #[serde(rename = "HotelRateInfo", default)]
    pub rate_info: RawRateInfoWrapper,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHotelInfo {
    #[serde(rename = "HotelCode", default)]
    pub hotel_code: Option<String>,
    #[serde(rename = "HotelName", default)]
    pub hotel_name: Option<String>,
    #[serde(rename = "ChainCode", default)]
    pub chain_code: Option<String>,
    #[serde(rename = "ChainName", default)]
    pub chain_name: Option<String>,
    #[serde(rename = "SabreRating", default, deserialize_with = "lenient_f64")]
    pub sabre_rating: Option<f64>,
    #[serde(rename = "Distance", default, deserialize_with = "lenient_f64")]
    pub distance: Option<f64>,
    #[serde(rename = "LocationInfo", default)]
    pub location_info: RawLocationInfo,
    #[serde(rename = "Amenities", default)]
    pub amenities: RawAmenities,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLocationInfo {
    #[serde(rename = "Latitude", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(rename = "Address", default)]
    pub address: RawAddress,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAddress {
    #[serde(rename = "AddressLine1", default)]
    pub address_line1: Option<String>,
    #[serde(rename = "CityName", default)]
    pub city_name: Option<String>,
    #[serde(rename = "StateProv", default)]
    pub state_prov: Option<String>,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "CountryCode", default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAmenities {
    #[serde(rename = "Amenity", default)]
    pub amenity: Vec<RawAmenity>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAmenity {
    #[serde(rename = "Code", default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImageInfo {
    #[serde(rename = "ImageItems", default)]
    pub image_items: RawImageItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImageItems {
    #[serde(rename = "Image", default)]
    pub image: Vec<RawImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImage {
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
    #[serde(rename = "CategoryName", default)]
    pub category_name: Option<String>,
    #[serde(rename = "Format", default)]
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawRateInfoWrapper {
    #[serde(rename = "RateInfos", default)]
    pub rate_infos: RawRateInfos,
}

/// The provider nests both raw and currency-converted rate lists here.
/// Normalization reads `converted_rate_info` only — the raw list carries
/// hotel-native currencies and is not comparable across properties.
#[derive(Debug, Default, Deserialize)]
pub struct RawRateInfos {
    #[serde(rename = "RateInfo", default)]
    pub rate_info: Vec<RawRate>,
    #[serde(rename = "ConvertedRateInfo", default)]
    pub converted_rate_info: Vec<RawRate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawRate {
    #[serde(rename = "RatePlanCode", default)]
    pub rate_plan_code: Option<String>,
    #[serde(rename = "RatePlanName", default)]
    pub rate_plan_name: Option<String>,
    #[serde(rename = "RoomType", default)]
    pub room_type: Option<String>,
    #[serde(rename = "RoomDescription", default)]
    pub room_description: Option<String>,
    #[serde(rename = "AmountBeforeTax", default, deserialize_with = "lenient_f64")]
    pub amount_before_tax: Option<f64>,
    #[serde(rename = "AmountAfterTax", default, deserialize_with = "lenient_f64")]
    pub amount_after_tax: Option<f64>,
    #[serde(rename = "CurrencyCode", default)]
    pub currency_code: Option<String>,
    #[serde(rename = "BedTypeName", default)]
    pub bed_type_name: Option<String>,
    #[serde(rename = "MaxOccupancy", default, deserialize_with = "lenient_u32")]
    pub max_occupancy: Option<u32>,
    #[serde(rename = "CancellationPolicy", default)]
    pub cancellation_policy: Option<String>,
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

/// Accepts a JSON number, a numeric string, or null. Anything else (or an
/// unparseable string) becomes `None` — a default, never a `NaN`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Accepts a JSON number, a numeric string, or null for small counts.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value).and_then(|f| {
        if f.is_sign_negative() {
            None
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(f as u32)
        }
    }))
}

/// Accepts a string or a number and renders both as a string. Sabre amenity
/// codes arrive as either.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct AmountHolder {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: Option<f64>,
    }

    #[test]
    fn lenient_f64_accepts_number() {
        let h: AmountHolder = serde_json::from_str(r#"{"amount": 150.0}"#).unwrap();
        assert_eq!(h.amount, Some(150.0));
    }

    #[test]
    fn lenient_f64_accepts_numeric_string() {
        let h: AmountHolder = serde_json::from_str(r#"{"amount": "150.00"}"#).unwrap();
        assert_eq!(h.amount, Some(150.0));
    }

    #[test]
    fn lenient_f64_null_and_garbage_become_none() {
        let h: AmountHolder = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(h.amount, None);
        let h: AmountHolder = serde_json::from_str(r#"{"amount": "n/a"}"#).unwrap();
        assert_eq!(h.amount, None);
        let h: AmountHolder = serde_json::from_str(r#"{"amount": {"v": 1}}"#).unwrap();
        assert_eq!(h.amount, None);
    }

    #[test]
    fn raw_rate_tolerates_missing_everything() {
        let rate: RawRate = serde_json::from_str("{}").unwrap();
        assert!(rate.rate_plan_code.is_none());
        assert!(rate.amount_after_tax.is_none());
    }

    #[test]
    fn raw_hotel_parses_string_typed_amounts() {
        let raw: RawHotelAvail = serde_json::from_value(serde_json::json!({
            "HotelInfo": {"HotelCode": "1", "HotelName": "H", "SabreRating": "4.5"},
            "HotelRateInfo": {"RateInfos": {"ConvertedRateInfo": [
                {"AmountAfterTax": "220.00", "CurrencyCode": "USD"}
            ]}}
        }))
        .unwrap();
        assert_eq!(raw.hotel_info.sabre_rating, Some(4.5));
        assert_eq!(
            raw.rate_info.rate_infos.converted_rate_info[0].amount_after_tax,
            Some(220.0)
        );
    }

    #[test]
    fn search_request_serializes_pascal_case_wire_names() {
        let rq = HotelSearchRq {
            get_hotel_avail_rq: GetHotelAvailRq {
                search_criteria: SearchCriteria {
                    offset_start: 1,
                    max_search_results: 50,
                    sort_order: "DISTANCE",
                    geo_search: Some(GeoSearch {
                        geo_ref: GeoRef {
                            radius: 15.0,
                            unit_of_measure: "MI",
                            geo_code: Some(GeoCode {
                                latitude: 25.7959,
                                longitude: -80.2871,
                            }),
                            ref_point: None,
                        },
                    }),
                    hotel_refs: None,
                    rate_info_ref: RateInfoRef {
                        currency_code: "USD",
                        best_only: true,
                        stay_date_time_range: StayDateTimeRange {
                            start_date: "2026-03-15T00:00:00".to_owned(),
                            end_date: "2026-03-18T00:00:00".to_owned(),
                        },
                        rooms: Rooms {
                            room: vec![Room {
                                index: 1,
                                adults: 2,
                                children: 0,
                            }],
                        },
                        rate_plan_candidates: None,
                    },
                },
            },
        };
        let json = serde_json::to_value(&rq).unwrap();
        assert_eq!(
            json["GetHotelAvailRQ"]["SearchCriteria"]["GeoSearch"]["GeoRef"]["GeoCode"]
                ["Latitude"],
            serde_json::json!(25.7959)
        );
        assert_eq!(
            json["GetHotelAvailRQ"]["SearchCriteria"]["RateInfoRef"]["BestOnly"],
            serde_json::json!(true)
        );
    }
}

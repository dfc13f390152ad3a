//! Builds the nested availability request from a normalized [`SearchQuery`].
//!
//! Pure and deterministic: the only side effect is a warning when a query
//! reaches the last-resort default reference point, which should not happen
//! for well-formed production traffic.

use bellhop_core::{LocationKind, SearchQuery};
use chrono::NaiveDate;

use crate::types::{
    GeoCode, GeoRef, GeoSearch, GetHotelAvailRq, HotelSearchRq, RateInfoRef, RefPoint, Room,
    Rooms, SearchCriteria, StayDateTimeRange,
};

/// Last-resort reference point when a query carries neither coordinates nor
/// a usable code. Documented limitation: results are only meaningful near
/// this airport, so production traffic hitting it is an anomaly.
const DEFAULT_REF_POINT: &str = "MIA";

const MAX_SEARCH_RESULTS: u32 = 50;

/// Converts a query into the wire request.
///
/// Geolocation strategy, in precedence order:
///
/// 1. Coordinates → `GeoCode` (empirically lower latency, especially at
///    larger radii). Coordinates win even when a code is also present.
/// 2. Airport/city code → `RefPoint`, resolved to coordinates server-side.
/// 3. Neither → the fixed default reference point, logged as a warning.
#[must_use]
pub fn build_search_request(query: &SearchQuery) -> HotelSearchRq {
    let geo_ref = match (query.location.coordinates, query.location.code.as_deref()) {
        (Some((latitude, longitude)), _) => GeoRef {
            radius: query.radius_miles,
            unit_of_measure: "MI",
            geo_code: Some(GeoCode {
                latitude,
                longitude,
            }),
            ref_point: None,
        },
        (None, Some(code))
            if matches!(
                query.location.kind,
                LocationKind::Airport | LocationKind::City
            ) =>
        {
            GeoRef {
                radius: query.radius_miles,
                unit_of_measure: "MI",
                geo_code: None,
                ref_point: Some(RefPoint {
                    value: code.to_uppercase(),
                    value_context: "CODE",
                    ref_point_type: ref_point_type(query.location.kind),
                }),
            }
        }
        _ => {
            tracing::warn!(
                kind = ?query.location.kind,
                "query has no usable location — falling back to default reference point"
            );
            GeoRef {
                radius: query.radius_miles,
                unit_of_measure: "MI",
                geo_code: None,
                ref_point: Some(RefPoint {
                    value: DEFAULT_REF_POINT.to_owned(),
                    value_context: "CODE",
                    ref_point_type: ref_point_type(LocationKind::Airport),
                }),
            }
        }
    };

    HotelSearchRq {
        get_hotel_avail_rq: GetHotelAvailRq {
            search_criteria: SearchCriteria {
                offset_start: 1,
                max_search_results: MAX_SEARCH_RESULTS,
                sort_order: "DISTANCE",
                geo_search: Some(GeoSearch { geo_ref }),
                hotel_refs: None,
                rate_info_ref: RateInfoRef {
                    currency_code: "USD",
                    best_only: true,
                    stay_date_time_range: StayDateTimeRange {
                        start_date: midnight_timestamp(query.check_in),
                        end_date: midnight_timestamp(query.check_out),
                    },
                    // The multi-room shape exists on the wire but is not
                    // exercised: one descriptor carries the adult count.
                    rooms: Rooms {
                        room: vec![Room {
                            index: 1,
                            adults: query.adults,
                            children: query.children,
                        }],
                    },
                    rate_plan_candidates: None,
                },
            },
        },
    }
}

fn ref_point_type(kind: LocationKind) -> &'static str {
    match kind {
        LocationKind::Airport => "6",
        LocationKind::City | LocationKind::Hotel => "18",
    }
}

pub(crate) fn midnight_timestamp(date: NaiveDate) -> String {
    format!("{date}T00:00:00")
}

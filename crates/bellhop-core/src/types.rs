//! Domain model for hotel search: queries, normalized hotel results, and
//! room rates.
//!
//! `HotelResult` never stores derived aggregates. `lowest_rate`,
//! `highest_rate`, and `rate_count` are computed on demand from `room_types`
//! so they cannot drift out of sync with the underlying rates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::programs::LuxuryProgram;
use crate::CoreError;

/// What kind of location reference a query carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Airport,
    City,
    Hotel,
}

/// A search location: raw coordinates, a provider-recognized code, or both.
///
/// When both are present, coordinates take precedence in request building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub coordinates: Option<(f64, f64)>,
    pub code: Option<String>,
    pub kind: LocationKind,
}

impl LocationRef {
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Some((latitude, longitude)),
            code: None,
            kind: LocationKind::City,
        }
    }

    #[must_use]
    pub fn from_code(code: &str, kind: LocationKind) -> Self {
        Self {
            coordinates: None,
            code: Some(code.to_owned()),
            kind,
        }
    }
}

/// A normalized, validated hotel search query. Immutable once constructed;
/// its fields are the cache-key material for search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub location: LocationRef,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub radius_miles: f64,
}

impl SearchQuery {
    /// Validates and constructs a query.
    ///
    /// Past-date rejection is the HTTP-facing layer's job; the core only
    /// enforces internal consistency.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidStayDates`] if `check_in >= check_out`.
    /// - [`CoreError::InvalidOccupancy`] if `rooms` or `adults` is zero.
    /// - [`CoreError::InvalidRadius`] if `radius_miles` is not positive.
    pub fn new(
        location: LocationRef,
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: u32,
        adults: u32,
        children: u32,
        radius_miles: f64,
    ) -> Result<Self, CoreError> {
        if check_in >= check_out {
            return Err(CoreError::InvalidStayDates {
                check_in,
                check_out,
            });
        }
        if rooms == 0 || adults == 0 {
            return Err(CoreError::InvalidOccupancy);
        }
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(CoreError::InvalidRadius(radius_miles));
        }
        Ok(Self {
            location,
            check_in,
            check_out,
            rooms,
            adults,
            children,
            radius_miles,
        })
    }
}

/// One bookable rate for a room, as normalized from the wire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRate {
    pub room_type: Option<String>,
    pub description: Option<String>,
    pub rate_code: Option<String>,
    pub amount_before_tax: f64,
    pub amount_after_tax: f64,
    pub currency_code: Option<String>,
    pub bed_type: Option<String>,
    pub max_occupancy: u32,
    pub cancellation_policy: Option<String>,
}

/// Structured postal address. A field the provider did not send stays
/// `None` so callers can distinguish "not provided" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// A single hotel from a search response, flattened from the provider's
/// nested schema. Constructed fresh per response and never mutated after
/// enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelResult {
    /// Provider hotel identifier; the join key for enrichment and probing.
    pub hotel_code: String,
    pub hotel_name: String,
    pub chain_code: Option<String>,
    pub chain_name: Option<String>,
    pub star_rating: Option<f64>,
    pub address: Address,
    pub coordinates: Option<(f64, f64)>,
    pub room_types: Vec<RoomRate>,
    pub images: Vec<String>,
    pub amenities: Vec<Amenity>,
    pub distance_miles: Option<f64>,
}

impl HotelResult {
    /// Lowest after-tax amount among rates priced above zero.
    ///
    /// A hotel with no positively-priced rate has no lowest rate — `None`,
    /// never `Some(0.0)`.
    #[must_use]
    pub fn lowest_rate(&self) -> Option<f64> {
        self.priced_amounts().fold(None, |acc: Option<f64>, amount| {
            Some(acc.map_or(amount, |a| a.min(amount)))
        })
    }

    /// Highest after-tax amount among rates priced above zero.
    #[must_use]
    pub fn highest_rate(&self) -> Option<f64> {
        self.priced_amounts().fold(None, |acc: Option<f64>, amount| {
            Some(acc.map_or(amount, |a| a.max(amount)))
        })
    }

    /// Number of rate candidates carried by this hotel.
    #[must_use]
    pub fn rate_count(&self) -> usize {
        self.room_types.len()
    }

    fn priced_amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.room_types
            .iter()
            .map(|r| r.amount_after_tax)
            .filter(|a| *a > 0.0)
    }
}

/// A hotel result stamped with luxury-program membership.
///
/// Produced only by [`crate::enrich::enrich_hotel_results`];
/// `is_luxury` always equals `!luxury_programs.is_empty()` by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedHotelResult {
    #[serde(flatten)]
    pub hotel: HotelResult,
    pub luxury_programs: Vec<LuxuryProgram>,
    pub is_luxury: bool,
}

//! Cache-key construction.
//!
//! Keys are a pure function of the normalized query fields, so two
//! field-wise equal queries always map to the same entry no matter how the
//! query structs were built.

use bellhop_core::SearchQuery;

/// Builds the cache key for a hotel search.
///
/// Coordinates are rendered with four decimal places (≈11 m of latitude) so
/// float formatting cannot make equal queries diverge; location codes are
/// uppercased for the same reason.
#[must_use]
pub fn search_cache_key(query: &SearchQuery) -> String {
    let location = match (query.location.coordinates, query.location.code.as_deref()) {
        (Some((lat, lng)), _) => format!("geo:{lat:.4},{lng:.4}"),
        (None, Some(code)) => format!("code:{}", code.to_uppercase()),
        (None, None) => "default".to_owned(),
    };
    format!(
        "search:{location}:{}:{}:r{}:a{}",
        query.check_in, query.check_out, query.rooms, query.adults
    )
}

#[cfg(test)]
mod tests {
    use bellhop_core::{LocationKind, LocationRef};
    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn query(location: LocationRef) -> SearchQuery {
        SearchQuery::new(
            location,
            date("2026-03-15"),
            date("2026-03-18"),
            1,
            2,
            0,
            15.0,
        )
        .unwrap()
    }

    #[test]
    fn equal_queries_produce_equal_keys() {
        let a = query(LocationRef::from_coordinates(25.7959, -80.2871));
        let b = query(LocationRef::from_coordinates(25.7959, -80.2871));
        assert_eq!(search_cache_key(&a), search_cache_key(&b));
    }

    #[test]
    fn coordinate_key_uses_fixed_precision() {
        let a = query(LocationRef::from_coordinates(25.795_90, -80.2871));
        let b = query(LocationRef::from_coordinates(25.795_904, -80.287_103));
        assert_eq!(search_cache_key(&a), search_cache_key(&b));
    }

    #[test]
    fn code_key_is_case_insensitive() {
        let a = query(LocationRef::from_code("mia", LocationKind::Airport));
        let b = query(LocationRef::from_code("MIA", LocationKind::Airport));
        assert_eq!(search_cache_key(&a), search_cache_key(&b));
    }

    #[test]
    fn different_dates_produce_different_keys() {
        let a = query(LocationRef::from_code("MIA", LocationKind::Airport));
        let mut b = a.clone();
        b.check_out = date("2026-03-19");
        assert_ne!(search_cache_key(&a), search_cache_key(&b));
    }

    #[test]
    fn coordinates_win_over_code_in_the_key() {
        let mut location = LocationRef::from_coordinates(25.7959, -80.2871);
        location.code = Some("MIA".to_owned());
        let with_both = query(location);
        let coords_only = query(LocationRef::from_coordinates(25.7959, -80.2871));
        assert_eq!(search_cache_key(&with_both), search_cache_key(&coords_only));
    }
}

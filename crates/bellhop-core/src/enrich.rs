//! Enrichment of normalized hotel results with luxury-program membership,
//! plus the filtering and ordering utilities built on top of it.
//!
//! Enrichment runs synchronously on every cache-miss search, so it must stay
//! O(1) per hotel: a single pass over the result list with constant-time
//! registry lookups.

use crate::programs::LuxuryProgram;
use crate::registry::LuxuryRegistry;
use crate::types::{EnrichedHotelResult, HotelResult};

/// Stamps each hotel with its luxury programs and the derived `is_luxury`
/// flag in one pass. Both fields come from the same lookup, so they cannot
/// disagree.
///
/// Enrichment is a pure function of `(chain_code, hotel_code)`: re-enriching
/// an already-enriched hotel yields identical membership.
#[must_use]
pub fn enrich_hotel_results(
    registry: &LuxuryRegistry,
    hotels: Vec<HotelResult>,
) -> Vec<EnrichedHotelResult> {
    hotels
        .into_iter()
        .map(|hotel| {
            let luxury_programs =
                registry.luxury_programs(hotel.chain_code.as_deref(), &hotel.hotel_code);
            let is_luxury = !luxury_programs.is_empty();
            EnrichedHotelResult {
                hotel,
                luxury_programs,
                is_luxury,
            }
        })
        .collect()
}

/// Keeps only luxury hotels. With `programs` unset every luxury hotel
/// passes; with a filter a hotel passes when its membership intersects the
/// given set (OR semantics).
#[must_use]
pub fn filter_luxury_hotels(
    results: &[EnrichedHotelResult],
    programs: Option<&[LuxuryProgram]>,
) -> Vec<EnrichedHotelResult> {
    results
        .iter()
        .filter(|r| match programs {
            None => r.is_luxury,
            Some(wanted) => r.luxury_programs.iter().any(|p| wanted.contains(p)),
        })
        .cloned()
        .collect()
}

/// Orders results for display: luxury before non-luxury, more distinct
/// programs first within luxury, then ascending lowest rate with unpriced
/// hotels last. The sort is stable, so upstream relevance ordering survives
/// as the final tiebreak.
pub fn sort_by_luxury_status(results: &mut [EnrichedHotelResult]) {
    results.sort_by(|a, b| {
        b.is_luxury
            .cmp(&a.is_luxury)
            .then_with(|| b.luxury_programs.len().cmp(&a.luxury_programs.len()))
            .then_with(|| {
                let price_a = a.hotel.lowest_rate().unwrap_or(f64::INFINITY);
                let price_b = b.hotel.lowest_rate().unwrap_or(f64::INFINITY);
                price_a.total_cmp(&price_b)
            })
    });
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::types::{Address, RoomRate};

    fn registry() -> LuxuryRegistry {
        let mut chains = HashMap::new();
        chains.insert("FS".to_owned(), LuxuryProgram::FourSeasonsPreferred);
        chains.insert("RZ".to_owned(), LuxuryProgram::RitzCarltonStars);
        let mut hotels = HashSet::new();
        hotels.insert("7001".to_owned());
        LuxuryRegistry::new(chains, hotels)
    }

    fn hotel(code: &str, chain: Option<&str>, after_tax: Option<f64>) -> HotelResult {
        let room_types = after_tax
            .map(|amount| {
                vec![RoomRate {
                    room_type: None,
                    description: None,
                    rate_code: None,
                    amount_before_tax: amount,
                    amount_after_tax: amount,
                    currency_code: Some("USD".to_owned()),
                    bed_type: None,
                    max_occupancy: 2,
                    cancellation_policy: None,
                }]
            })
            .unwrap_or_default();
        HotelResult {
            hotel_code: code.to_owned(),
            hotel_name: format!("Hotel {code}"),
            chain_code: chain.map(str::to_owned),
            chain_name: None,
            star_rating: None,
            address: Address::default(),
            coordinates: None,
            room_types,
            images: vec![],
            amenities: vec![],
            distance_miles: None,
        }
    }

    #[test]
    fn enrichment_stamps_programs_and_flag_together() {
        let enriched = enrich_hotel_results(
            &registry(),
            vec![hotel("1", Some("FS"), None), hotel("2", None, None)],
        );
        assert!(enriched[0].is_luxury);
        assert_eq!(
            enriched[0].luxury_programs,
            vec![LuxuryProgram::FourSeasonsPreferred]
        );
        assert!(!enriched[1].is_luxury);
        assert!(enriched[1].luxury_programs.is_empty());
    }

    #[test]
    fn enrichment_is_idempotent() {
        let first = enrich_hotel_results(&registry(), vec![hotel("7001", Some("FS"), None)]);
        let again = enrich_hotel_results(&registry(), vec![first[0].hotel.clone()]);
        assert_eq!(first[0].luxury_programs, again[0].luxury_programs);
        assert_eq!(first[0].is_luxury, again[0].is_luxury);
    }

    #[test]
    fn filter_without_programs_keeps_all_luxury() {
        let enriched = enrich_hotel_results(
            &registry(),
            vec![
                hotel("1", Some("FS"), None),
                hotel("2", None, None),
                hotel("7001", None, None),
            ],
        );
        let filtered = filter_luxury_hotels(&enriched, None);
        let codes: Vec<&str> = filtered.iter().map(|r| r.hotel.hotel_code.as_str()).collect();
        assert_eq!(codes, vec!["1", "7001"]);
    }

    #[test]
    fn filter_with_programs_uses_or_semantics() {
        let enriched = enrich_hotel_results(
            &registry(),
            vec![
                hotel("1", Some("FS"), None),
                hotel("2", Some("RZ"), None),
                hotel("7001", None, None),
            ],
        );
        let filtered = filter_luxury_hotels(
            &enriched,
            Some(&[LuxuryProgram::RitzCarltonStars, LuxuryProgram::Virtuoso]),
        );
        let codes: Vec<&str> = filtered.iter().map(|r| r.hotel.hotel_code.as_str()).collect();
        assert_eq!(codes, vec!["2", "7001"]);
    }

    #[test]
    fn sort_puts_luxury_first_then_program_count_then_price() {
        let mut results = enrich_hotel_results(
            &registry(),
            vec![
                hotel("plain", None, Some(90.0)),
                hotel("fs-expensive", Some("FS"), Some(400.0)),
                hotel("fs-cheap", Some("FS"), Some(250.0)),
                hotel("7001", Some("FS"), Some(500.0)), // two programs
            ],
        );
        sort_by_luxury_status(&mut results);
        let codes: Vec<&str> = results.iter().map(|r| r.hotel.hotel_code.as_str()).collect();
        assert_eq!(codes, vec!["7001", "fs-cheap", "fs-expensive", "plain"]);
    }

    #[test]
    fn sort_places_unpriced_luxury_after_priced_luxury() {
        let mut results = enrich_hotel_results(
            &registry(),
            vec![
                hotel("fs-unpriced", Some("FS"), None),
                hotel("fs-priced", Some("FS"), Some(300.0)),
            ],
        );
        sort_by_luxury_status(&mut results);
        assert_eq!(results[0].hotel.hotel_code, "fs-priced");
        assert_eq!(results[1].hotel.hotel_code, "fs-unpriced");
    }
}

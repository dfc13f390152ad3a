//! The luxury-program knowledge base: which chains and which individual
//! hotels belong to which program.
//!
//! Two independent membership tables back every lookup:
//!
//! 1. chain code → program (a chain belongs to at most one program), and
//! 2. a set of hotel codes known to be Virtuoso members regardless of chain.
//!
//! Membership for a hotel is the deduplicated union of both. The curated
//! data is maintained by offline probe tooling; the read contract here is
//! what the request path depends on.

use std::collections::{HashMap, HashSet};

use crate::programs::LuxuryProgram;

/// Injectable membership registry. `Default` loads the curated dataset;
/// tests construct instances with their own tables.
#[derive(Debug, Clone)]
pub struct LuxuryRegistry {
    chain_programs: HashMap<String, LuxuryProgram>,
    virtuoso_hotels: HashSet<String>,
}

impl Default for LuxuryRegistry {
    fn default() -> Self {
        Self::curated()
    }
}

impl LuxuryRegistry {
    /// Builds a registry from explicit tables.
    #[must_use]
    pub fn new(
        chain_programs: HashMap<String, LuxuryProgram>,
        virtuoso_hotels: HashSet<String>,
    ) -> Self {
        Self {
            chain_programs,
            virtuoso_hotels,
        }
    }

    /// The curated chain table plus the probe-confirmed Virtuoso hotel set.
    ///
    /// The hotel codes here are a maintained dataset, not ground truth;
    /// entries are added by probe confirmation and removed after repeated
    /// probe failures (see the verification tracker in `bellhop-sabre`).
    #[must_use]
    pub fn curated() -> Self {
        let chain_programs: HashMap<String, LuxuryProgram> = [
            ("FS", LuxuryProgram::FourSeasonsPreferred),
            ("RZ", LuxuryProgram::RitzCarltonStars),
            ("RW", LuxuryProgram::RosewoodElite),
            ("LW", LuxuryProgram::Virtuoso),
            ("BU", LuxuryProgram::BelmondBellini),
            ("MO", LuxuryProgram::MandarinOrientalFans),
            ("PN", LuxuryProgram::PeninsulaPenClub),
            ("DC", LuxuryProgram::DorchesterDiamond),
            ("HY", LuxuryProgram::HyattPrive),
            ("EB", LuxuryProgram::MarriottStars),
        ]
        .into_iter()
        .map(|(code, program)| (code.to_owned(), program))
        .collect();

        let virtuoso_hotels: HashSet<String> = [
            "100066",  // The Setai, Miami Beach
            "1276793", // Faena Hotel Miami Beach
            "100173",  // The Breakers Palm Beach
            "4075",    // Hotel Bel-Air
            "22017",   // The Lowell, New York
            "190347",  // Amangiri
            "324732",  // Auberge du Soleil
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        Self {
            chain_programs,
            virtuoso_hotels,
        }
    }

    /// All programs a hotel qualifies for: the chain-table entry unioned with
    /// hotel-level Virtuoso membership, deduplicated. O(1).
    #[must_use]
    pub fn luxury_programs(
        &self,
        chain_code: Option<&str>,
        hotel_code: &str,
    ) -> Vec<LuxuryProgram> {
        let mut programs = Vec::with_capacity(2);
        if let Some(program) = chain_code.and_then(|code| self.chain_programs.get(code)) {
            programs.push(*program);
        }
        if self.virtuoso_hotels.contains(hotel_code)
            && !programs.contains(&LuxuryProgram::Virtuoso)
        {
            programs.push(LuxuryProgram::Virtuoso);
        }
        programs
    }

    #[must_use]
    pub fn is_luxury_hotel(&self, chain_code: Option<&str>, hotel_code: &str) -> bool {
        !self.luxury_programs(chain_code, hotel_code).is_empty()
    }

    /// Whether a hotel code is in the probe-confirmed Virtuoso set.
    #[must_use]
    pub fn is_confirmed_virtuoso(&self, hotel_code: &str) -> bool {
        self.virtuoso_hotels.contains(hotel_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_virtuoso_hotel(hotel_code: &str) -> LuxuryRegistry {
        let mut chains = HashMap::new();
        chains.insert("FS".to_owned(), LuxuryProgram::FourSeasonsPreferred);
        chains.insert("LW".to_owned(), LuxuryProgram::Virtuoso);
        let mut hotels = HashSet::new();
        hotels.insert(hotel_code.to_owned());
        LuxuryRegistry::new(chains, hotels)
    }

    #[test]
    fn fs_chain_always_maps_to_four_seasons_preferred() {
        let registry = LuxuryRegistry::curated();
        let programs = registry.luxury_programs(Some("FS"), "any-hotel");
        assert!(programs.contains(&LuxuryProgram::FourSeasonsPreferred));
    }

    #[test]
    fn hotel_only_membership_yields_exactly_virtuoso() {
        let registry = registry_with_virtuoso_hotel("100066");
        let programs = registry.luxury_programs(None, "100066");
        assert_eq!(programs, vec![LuxuryProgram::Virtuoso]);
    }

    #[test]
    fn chain_and_hotel_membership_union_without_duplicates() {
        let registry = registry_with_virtuoso_hotel("100066");
        let programs = registry.luxury_programs(Some("FS"), "100066");
        assert_eq!(programs.len(), 2);
        assert!(programs.contains(&LuxuryProgram::FourSeasonsPreferred));
        assert!(programs.contains(&LuxuryProgram::Virtuoso));
    }

    #[test]
    fn virtuoso_chain_plus_virtuoso_hotel_dedupes_to_one_entry() {
        let registry = registry_with_virtuoso_hotel("100066");
        let programs = registry.luxury_programs(Some("LW"), "100066");
        assert_eq!(programs, vec![LuxuryProgram::Virtuoso]);
    }

    #[test]
    fn unknown_chain_and_hotel_is_not_luxury() {
        let registry = LuxuryRegistry::curated();
        assert!(registry.luxury_programs(Some("HI"), "555").is_empty());
        assert!(!registry.is_luxury_hotel(Some("HI"), "555"));
        assert!(!registry.is_luxury_hotel(None, "555"));
    }
}

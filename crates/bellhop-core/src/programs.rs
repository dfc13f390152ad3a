//! The closed set of luxury partner programs this system recognizes.
//!
//! Membership rules live in [`crate::registry`]; this module only defines
//! the enum and its display metadata.

use serde::{Deserialize, Serialize};

/// A named partner-benefit tier granting perks (upgrades, credits, breakfast)
/// to qualifying bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LuxuryProgram {
    Virtuoso,
    FourSeasonsPreferred,
    RitzCarltonStars,
    RosewoodElite,
    BelmondBellini,
    MandarinOrientalFans,
    PeninsulaPenClub,
    DorchesterDiamond,
    HyattPrive,
    MarriottStars,
}

impl LuxuryProgram {
    /// Stable short code, used in logs and API payloads.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            LuxuryProgram::Virtuoso => "VIRTUOSO",
            LuxuryProgram::FourSeasonsPreferred => "FOUR_SEASONS_PREFERRED",
            LuxuryProgram::RitzCarltonStars => "RITZ_CARLTON_STARS",
            LuxuryProgram::RosewoodElite => "ROSEWOOD_ELITE",
            LuxuryProgram::BelmondBellini => "BELMOND_BELLINI",
            LuxuryProgram::MandarinOrientalFans => "MANDARIN_ORIENTAL_FANS",
            LuxuryProgram::PeninsulaPenClub => "PENINSULA_PEN_CLUB",
            LuxuryProgram::DorchesterDiamond => "DORCHESTER_DIAMOND",
            LuxuryProgram::HyattPrive => "HYATT_PRIVE",
            LuxuryProgram::MarriottStars => "MARRIOTT_STARS",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            LuxuryProgram::Virtuoso => "Virtuoso",
            LuxuryProgram::FourSeasonsPreferred => "Four Seasons Preferred Partner",
            LuxuryProgram::RitzCarltonStars => "Ritz-Carlton STARS",
            LuxuryProgram::RosewoodElite => "Rosewood Elite",
            LuxuryProgram::BelmondBellini => "Belmond Bellini Club",
            LuxuryProgram::MandarinOrientalFans => "Mandarin Oriental Fan Club",
            LuxuryProgram::PeninsulaPenClub => "Peninsula PenClub",
            LuxuryProgram::DorchesterDiamond => "Dorchester Collection Diamond Club",
            LuxuryProgram::HyattPrive => "Hyatt Privé",
            LuxuryProgram::MarriottStars => "Marriott STARS & Luminous",
        }
    }

    /// Presentation-layer blurb describing the program's typical benefits.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            LuxuryProgram::Virtuoso => {
                "Global advisor network: daily breakfast, property credit, upgrade on availability"
            }
            LuxuryProgram::FourSeasonsPreferred => {
                "Four Seasons partner tier: breakfast, $100 credit, upgrade, early/late checkout"
            }
            LuxuryProgram::RitzCarltonStars => {
                "Ritz-Carlton STARS: breakfast, $100 credit, VIP amenity, upgrade priority"
            }
            LuxuryProgram::RosewoodElite => {
                "Rosewood Elite: breakfast, $100 credit, upgrade and flexible checkout"
            }
            LuxuryProgram::BelmondBellini => {
                "Belmond Bellini Club: breakfast, upgrade, welcome amenity"
            }
            LuxuryProgram::MandarinOrientalFans => {
                "Mandarin Oriental Fan Club: breakfast, credit, upgrade on arrival"
            }
            LuxuryProgram::PeninsulaPenClub => {
                "Peninsula PenClub: breakfast, credit, guaranteed late checkout"
            }
            LuxuryProgram::DorchesterDiamond => {
                "Dorchester Diamond Club: breakfast, credit, upgrade on availability"
            }
            LuxuryProgram::HyattPrive => {
                "Hyatt Privé: breakfast, $100 credit, upgrade, welcome amenity"
            }
            LuxuryProgram::MarriottStars => {
                "Marriott STARS & Luminous: breakfast, credit, VIP welcome"
            }
        }
    }
}

impl std::fmt::Display for LuxuryProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

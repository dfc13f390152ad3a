//! Shared domain model, configuration, and the luxury-program knowledge base.
//!
//! This crate is pure: no I/O, no async. The Sabre integration
//! (`bellhop-sabre`) and the cache (`bellhop-cache`) build on the types
//! defined here.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod enrich;
pub mod programs;
pub mod registry;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use enrich::{enrich_hotel_results, filter_luxury_hotels, sort_by_luxury_status};
pub use programs::LuxuryProgram;
pub use registry::LuxuryRegistry;
pub use types::{
    Address, Amenity, EnrichedHotelResult, HotelResult, LocationKind, LocationRef, RoomRate,
    SearchQuery,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid stay dates: check-in {check_in} must precede check-out {check_out}")]
    InvalidStayDates {
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },

    #[error("invalid occupancy: rooms and adults must both be at least 1")]
    InvalidOccupancy,

    #[error("invalid search radius: {0} miles")]
    InvalidRadius(f64),
}

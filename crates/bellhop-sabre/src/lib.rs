//! Sabre hotel availability client.
//!
//! Covers the full search path (token acquisition with protocol fallback,
//! request building, the availability POST, tolerant normalization, luxury
//! enrichment, result caching) plus the out-of-band luxury probe used to
//! confirm program membership.

pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod probe;
pub mod request;
pub mod search;
pub mod types;
pub mod verify;

pub use auth::{AuthManager, AuthVariant, Credential};
pub use client::SabreClient;
pub use error::SabreError;
pub use normalize::parse_search_response;
pub use probe::{LuxuryProbe, ProbeResult};
pub use request::build_search_request;
pub use search::SearchOrchestrator;
pub use verify::VerificationTracker;

//! Active verification of luxury-program participation.
//!
//! Chain patterns and name matching only suggest membership; contracts lapse
//! and franchises opt out. A probe proves participation by asking the
//! provider for availability under the program's known rate-plan codes and
//! checking whether one actually comes back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bellhop_core::AppConfig;
use chrono::{Days, Utc};
use regex::Regex;

use crate::auth::AuthManager;
use crate::client::SabreClient;
use crate::error::SabreError;
use crate::request::midnight_timestamp;
use crate::search::AVAIL_PATH;
use crate::types::{
    GetHotelAvailRq, HotelRef, HotelRefs, HotelSearchRq, RatePlanCandidate, RatePlanCandidates,
    RateInfoRef, RawHotelAvail, RawRate, Room, Rooms, SearchCriteria, StayDateTimeRange,
};

const DEFAULT_LEAD_DAYS: u64 = 45;
const DEFAULT_NIGHTS: u64 = 2;

/// Program rate-plan codes always tested regardless of chain. Independent
/// properties can participate in a catch-all program without carrying a
/// recognized chain code.
const DEFAULT_RATE_CODES: &[&str] = &["VIR", "VRT", "VTU"];

/// Known per-chain rate-plan code variants, maintained alongside the
/// registry's chain table by offline discovery.
const CHAIN_RATE_CODES: &[(&str, &[&str])] = &[
    ("FS", &["FSP", "FSR", "FS1"]),
    ("RZ", &["STP", "RZS"]),
    ("RW", &["RWE"]),
    ("MO", &["MOF"]),
    ("PN", &["PEN"]),
    ("DC", &["DDC"]),
    ("HY", &["PRV"]),
];

/// Benefit tags mined from rate-plan text. Advisory, not exhaustive.
const BENEFIT_PATTERNS: &[(&str, &str)] = &[
    ("breakfast", r"(?i)breakfast"),
    ("credit", r"(?i)credit"),
    ("upgrade", r"(?i)upgrade"),
    ("late_checkout", r"(?i)late[\s-]*check[\s-]?out"),
    ("early_checkin", r"(?i)early[\s-]*check[\s-]?in"),
    ("spa", r"(?i)\bspa\b"),
    ("vip_amenity", r"(?i)\bvip\b"),
];

/// Outcome of probing one hotel. Transient; callers persist what they need.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    pub is_confirmed: bool,
    pub rate_code_found: Option<String>,
    pub rate_amount: Option<f64>,
    pub currency: Option<String>,
    pub benefits_detected: Vec<String>,
    pub error: Option<String>,
}

impl ProbeResult {
    fn failed(error: SabreError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

/// Issues targeted availability queries to confirm program membership.
pub struct LuxuryProbe {
    client: Arc<SabreClient>,
    auth: Arc<AuthManager>,
    request_timeout: Duration,
    batch_delay: Duration,
    benefit_patterns: Vec<(&'static str, Regex)>,
}

impl LuxuryProbe {
    #[must_use]
    pub fn new(client: Arc<SabreClient>, auth: Arc<AuthManager>, config: &AppConfig) -> Self {
        let benefit_patterns = BENEFIT_PATTERNS
            .iter()
            .map(|(tag, pattern)| (*tag, Regex::new(pattern).expect("valid regex")))
            .collect();
        Self {
            client,
            auth,
            request_timeout: Duration::from_secs(config.search_timeout_secs),
            batch_delay: Duration::from_millis(config.probe_delay_ms),
            benefit_patterns,
        }
    }

    /// Probes one hotel with the default stay window (45 days out, 2 nights).
    pub async fn probe(&self, hotel_code: &str, chain_code: Option<&str>) -> ProbeResult {
        self.probe_with_window(hotel_code, chain_code, DEFAULT_LEAD_DAYS, DEFAULT_NIGHTS)
            .await
    }

    /// Probes one hotel for a specific stay window.
    ///
    /// Never fails past this boundary: transport, HTTP, and parse errors all
    /// come back as a [`ProbeResult`] with `error` set, so a batch can step
    /// over one bad hotel.
    pub async fn probe_with_window(
        &self,
        hotel_code: &str,
        chain_code: Option<&str>,
        days_in_future: u64,
        night_count: u64,
    ) -> ProbeResult {
        let candidates = candidate_rate_codes(chain_code);
        match self
            .fetch_probe_rates(hotel_code, &candidates, days_in_future, night_count)
            .await
        {
            Ok(rates) => {
                let result = self.evaluate(&candidates, &rates);
                tracing::info!(
                    hotel_code,
                    chain_code = chain_code.unwrap_or("-"),
                    confirmed = result.is_confirmed,
                    rate_code = result.rate_code_found.as_deref().unwrap_or("-"),
                    "probe finished"
                );
                result
            }
            Err(err) => {
                tracing::warn!(hotel_code, error = %err, "probe failed");
                ProbeResult::failed(err)
            }
        }
    }

    /// Probes a batch of hotels sequentially with a fixed inter-request
    /// delay. The provider publishes no concurrency limit, so serial with
    /// delay is the conservative default.
    pub async fn probe_batch(
        &self,
        targets: &[(String, Option<String>)],
    ) -> HashMap<String, ProbeResult> {
        let mut results = HashMap::with_capacity(targets.len());
        for (i, (hotel_code, chain_code)) in targets.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.batch_delay).await;
            }
            let result = self.probe(hotel_code, chain_code.as_deref()).await;
            results.insert(hotel_code.clone(), result);
        }

        let confirmed = results.values().filter(|r| r.is_confirmed).count();
        let errored = results.values().filter(|r| r.error.is_some()).count();
        tracing::info!(
            probed = results.len(),
            confirmed,
            rejected = results.len() - confirmed - errored,
            errored,
            "probe batch finished"
        );
        results
    }

    async fn fetch_probe_rates(
        &self,
        hotel_code: &str,
        candidates: &[&'static str],
        days_in_future: u64,
        night_count: u64,
    ) -> Result<Vec<RawRate>, SabreError> {
        let token = self.auth.token().await?;
        let request = build_probe_request(hotel_code, candidates, days_in_future, night_count);
        let body = self
            .client
            .post_json(AVAIL_PATH, &token, &request, self.request_timeout, "luxury probe")
            .await?;

        let rates = body
            .pointer("/GetHotelAvailRS/HotelAvailInfos/HotelAvailInfo")
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|entry| serde_json::from_value::<RawHotelAvail>(entry.clone()).ok())
            .flat_map(|avail| {
                let infos = avail.rate_info.rate_infos;
                infos.converted_rate_info.into_iter().chain(infos.rate_info)
            })
            .collect();
        Ok(rates)
    }

    /// First candidate match wins; the rest of the plan list is advisory.
    fn evaluate(&self, candidates: &[&'static str], rates: &[RawRate]) -> ProbeResult {
        let matched = rates.iter().find(|rate| {
            rate.rate_plan_code
                .as_deref()
                .is_some_and(|code| candidates.iter().any(|c| code.eq_ignore_ascii_case(c)))
        });

        match matched {
            Some(rate) => ProbeResult {
                is_confirmed: true,
                rate_code_found: rate.rate_plan_code.clone(),
                rate_amount: rate.amount_after_tax.or(rate.amount_before_tax),
                currency: rate.currency_code.clone(),
                benefits_detected: self.mine_benefits(rate),
                error: None,
            },
            None => ProbeResult::default(),
        }
    }

    fn mine_benefits(&self, rate: &RawRate) -> Vec<String> {
        let haystack = [
            rate.rate_plan_name.as_deref(),
            rate.room_description.as_deref(),
            rate.cancellation_policy.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        self.benefit_patterns
            .iter()
            .filter(|(_, re)| re.is_match(&haystack))
            .map(|(tag, _)| (*tag).to_owned())
            .collect()
    }
}

/// Per-chain code variants unioned with the always-tested default set.
fn candidate_rate_codes(chain_code: Option<&str>) -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = chain_code
        .and_then(|chain| {
            CHAIN_RATE_CODES
                .iter()
                .find(|(code, _)| chain.eq_ignore_ascii_case(code))
        })
        .map(|(_, variants)| variants.to_vec())
        .unwrap_or_default();
    for default in DEFAULT_RATE_CODES {
        if !codes.contains(default) {
            codes.push(default);
        }
    }
    codes
}

fn build_probe_request(
    hotel_code: &str,
    candidates: &[&'static str],
    days_in_future: u64,
    night_count: u64,
) -> HotelSearchRq {
    let today = Utc::now().date_naive();
    let check_in = today
        .checked_add_days(Days::new(days_in_future))
        .unwrap_or(today);
    let check_out = check_in
        .checked_add_days(Days::new(night_count.max(1)))
        .unwrap_or(check_in);

    HotelSearchRq {
        get_hotel_avail_rq: GetHotelAvailRq {
            search_criteria: SearchCriteria {
                offset_start: 1,
                max_search_results: 1,
                sort_order: "DISTANCE",
                geo_search: None,
                hotel_refs: Some(HotelRefs {
                    hotel_ref: vec![HotelRef {
                        hotel_code: hotel_code.to_owned(),
                    }],
                }),
                rate_info_ref: RateInfoRef {
                    currency_code: "USD",
                    best_only: false,
                    stay_date_time_range: StayDateTimeRange {
                        start_date: midnight_timestamp(check_in),
                        end_date: midnight_timestamp(check_out),
                    },
                    rooms: Rooms {
                        room: vec![Room {
                            index: 1,
                            adults: 2,
                            children: 0,
                        }],
                    },
                    rate_plan_candidates: Some(RatePlanCandidates {
                        exact_match_only: false,
                        rate_plan_candidate: candidates
                            .iter()
                            .map(|code| RatePlanCandidate {
                                rate_plan_code: (*code).to_owned(),
                            })
                            .collect(),
                    }),
                },
            },
        },
    }
}

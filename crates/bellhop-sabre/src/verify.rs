//! Re-verification hysteresis for the confirmed-hotel set.
//!
//! Availability gaps are often transient (sold-out windows, provider
//! hiccups), so one failed probe is not evidence of lapsed membership. A
//! hotel is only proposed for removal after a run of consecutive failures,
//! and any success wipes the run.

use std::collections::HashMap;

use crate::probe::ProbeResult;

/// Tracks consecutive probe failures per hotel and decides removals.
#[derive(Debug)]
pub struct VerificationTracker {
    failure_threshold: u32,
    consecutive_failures: HashMap<String, u32>,
}

impl VerificationTracker {
    #[must_use]
    pub fn new(failure_threshold: u32) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            consecutive_failures: HashMap::new(),
        }
    }

    /// Records one probe outcome and says whether the hotel should now be
    /// removed from the confirmed set.
    ///
    /// A confirmed probe resets the hotel's failure run to zero. An
    /// unconfirmed or errored probe extends the run; removal is signalled
    /// only when the run reaches the threshold. The counter is not cleared
    /// on removal, so the caller decides when tracking stops.
    pub fn record(&mut self, hotel_code: &str, result: &ProbeResult) -> bool {
        if result.is_confirmed {
            self.consecutive_failures.remove(hotel_code);
            return false;
        }

        let failures = self
            .consecutive_failures
            .entry(hotel_code.to_owned())
            .or_insert(0);
        *failures += 1;

        let remove = *failures >= self.failure_threshold;
        if remove {
            tracing::warn!(
                hotel_code,
                consecutive_failures = *failures,
                "hotel reached removal threshold"
            );
        }
        remove
    }

    /// Current failure run for a hotel; zero when unknown or last confirmed.
    #[must_use]
    pub fn failure_count(&self, hotel_code: &str) -> u32 {
        self.consecutive_failures
            .get(hotel_code)
            .copied()
            .unwrap_or(0)
    }

    pub fn forget(&mut self, hotel_code: &str) {
        self.consecutive_failures.remove(hotel_code);
    }
}

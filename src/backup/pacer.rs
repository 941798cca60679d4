//! Fixed inter-page delay derived from a documented quota.

use std::time::Duration;

use indicatif::HumanDuration;
use tokio::time::sleep;

use crate::output::print_info;

/// Added to the computed interval to absorb clock and latency drift.
pub const DEFAULT_MARGIN: Duration = Duration::from_millis(500);

/// Sleeps a fixed delay between pages.
///
/// The delay is computed once from the quota; response headers reporting the
/// remaining budget are not consulted.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    pauses: u32,
    announce: bool,
}

impl Pacer {
    /// `window / requests + margin`.
    pub fn from_quota(requests: u32, window: Duration, margin: Duration) -> Self {
        Self {
            delay: window / requests.max(1) + margin,
            pauses: 0,
            announce: true,
        }
    }

    /// Don't print a line for every pause.
    pub fn quiet(mut self) -> Self {
        self.announce = false;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of pauses taken so far.
    pub fn pauses(&self) -> u32 {
        self.pauses
    }

    /// Sleep for the configured delay.
    pub async fn pause(&mut self) {
        if self.announce {
            print_info(&format!("sleeping for {}", HumanDuration(self.delay)));
        }
        tracing::debug!("Pacing for {:?}", self.delay);

        sleep(self.delay).await;
        self.pauses += 1;
    }
}

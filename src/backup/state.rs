//! Backup run state tracking.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::ResourceKind;

/// Why a paginator stopped requesting pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// An empty page came back.
    Exhausted,
    /// The cursor reached its terminal value.
    EndOfCursor,
    /// The continuation token did not move.
    Stalled,
    /// The API answered with a non-success status.
    UnexpectedStatus(u16),
    /// The request failed before a response could be used.
    Failed(String),
}

impl StopReason {
    /// Whether the stream was read to its end.
    pub fn is_complete(&self) -> bool {
        matches!(self, StopReason::Exhausted | StopReason::EndOfCursor)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "no more items"),
            StopReason::EndOfCursor => write!(f, "end of cursor"),
            StopReason::Stalled => write!(f, "continuation token did not advance"),
            StopReason::UnexpectedStatus(code) => write!(f, "unexpected status code {}", code),
            StopReason::Failed(message) => write!(f, "request failed: {}", message),
        }
    }
}

/// Per-resource run state. Lives only as long as the run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub resource: ResourceKind,

    // Statistics
    pub pages: u64,
    pub total: u64,
    pub saved: u64,
    pub skipped: u64,
    pub assets: u64,
    pub assets_skipped: u64,

    // Date range of the items seen
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,

    // Set when the run ends
    pub stop: Option<StopReason>,
    pub elapsed: Duration,
    pub bytes_on_disk: Option<u64>,
}

impl RunState {
    pub fn new(resource: ResourceKind) -> Self {
        Self {
            resource,
            pages: 0,
            total: 0,
            saved: 0,
            skipped: 0,
            assets: 0,
            assets_skipped: 0,
            first: None,
            last: None,
            stop: None,
            elapsed: Duration::ZERO,
            bytes_on_disk: None,
        }
    }

    /// Widen the date range to include `time`.
    pub fn observe(&mut self, time: Option<DateTime<Utc>>) {
        let Some(time) = time else {
            return;
        };

        if self.first.map_or(true, |first| time < first) {
            self.first = Some(time);
        }
        if self.last.map_or(true, |last| time > last) {
            self.last = Some(time);
        }
    }

    /// Increment saved count.
    pub fn increment_saved(&mut self) {
        self.saved += 1;
    }

    /// Increment skipped count.
    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Account for a processed page.
    pub fn add_page(&mut self, items: usize) {
        self.pages += 1;
        self.total += items as u64;
    }
}

/// Results of a whole backup.
#[derive(Debug, Default)]
pub struct BackupReport {
    pub likes: Option<RunState>,
    pub following: Option<RunState>,
    pub elapsed: Duration,
}

impl BackupReport {
    /// Runs that took place, in order.
    pub fn runs(&self) -> impl Iterator<Item = &RunState> {
        self.likes.iter().chain(self.following.iter())
    }

    /// Items saved across all runs.
    pub fn total_saved(&self) -> u64 {
        self.runs().map(|r| r.saved).sum()
    }

    /// Runs that ended before reading their stream to the end.
    pub fn incomplete(&self) -> usize {
        self.runs()
            .filter(|r| !r.stop.as_ref().is_some_and(StopReason::is_complete))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_observe_widens_range() {
        let mut state = RunState::new(ResourceKind::Likes);
        let t1 = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        state.observe(Some(t1));
        assert_eq!((state.first, state.last), (Some(t1), Some(t1)));

        state.observe(Some(t2));
        state.observe(None);
        state.observe(Some(t3));
        assert_eq!((state.first, state.last), (Some(t2), Some(t3)));
    }

    #[test]
    fn test_report_counts_incomplete_runs() {
        let mut likes = RunState::new(ResourceKind::Likes);
        likes.saved = 3;
        likes.stop = Some(StopReason::Exhausted);
        let mut following = RunState::new(ResourceKind::Following);
        following.saved = 2;
        following.stop = Some(StopReason::UnexpectedStatus(429));

        let report = BackupReport {
            likes: Some(likes),
            following: Some(following),
            elapsed: Duration::ZERO,
        };

        assert_eq!(report.total_saved(), 5);
        assert_eq!(report.incomplete(), 1);
    }
}

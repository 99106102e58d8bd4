// --- File: crates/atende_tracker/src/poll.rs ---
//! The recurring pending-confirmation check.

use chrono::Local;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::interval;

use atende_common::error::AtendeError;
use atende_common::services::SchedulingApi;

use crate::logic::ConfirmationTracker;

/// Fixed period of the pending-confirmation check.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Drives the tracker's periodic check until the task is dropped.
///
/// Each tick fully recomputes the pending set against the local wall clock,
/// so a missed or delayed tick changes nothing but latency.
pub async fn run_pending_check<A>(tracker: Arc<Mutex<ConfirmationTracker<A>>>)
where
    A: SchedulingApi<Error = AtendeError>,
{
    let mut ticker = interval(POLL_INTERVAL);
    loop {
        ticker.tick().await;
        let now = Local::now().naive_local();
        let mut guard = tracker.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.tick(now);
    }
}

// --- File: crates/atende_schedule/src/slots.rs ---
use chrono::NaiveTime;

use crate::logic::ScheduleError;

/// Generates the bookable times of one availability window.
///
/// Steps from `start` towards `end` in `interval_minutes` increments and
/// keeps every value strictly below `end`, so an interval that does not
/// evenly divide the window simply stops at the last fitting slot. The
/// result is strictly ascending; `start >= end` yields an empty sequence.
///
/// A zero interval is rejected instead of looping forever.
pub fn generate_slots(
    start: NaiveTime,
    end: NaiveTime,
    interval_minutes: u32,
) -> Result<Vec<NaiveTime>, ScheduleError> {
    use chrono::Timelike;

    if interval_minutes == 0 {
        return Err(ScheduleError::InvalidInterval(interval_minutes));
    }

    // Step over whole minutes since midnight; NaiveTime addition would wrap
    // past midnight instead of terminating.
    let start_minute = start.hour() * 60 + start.minute();
    let end_minute = end.hour() * 60 + end.minute();

    let mut slots = Vec::new();
    let mut current = start_minute;
    while current < end_minute {
        slots.push(NaiveTime::from_hms_opt(current / 60, current % 60, 0).unwrap());
        current += interval_minutes;
    }
    Ok(slots)
}

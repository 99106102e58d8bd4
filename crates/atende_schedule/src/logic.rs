// --- File: crates/atende_schedule/src/logic.rs ---
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use atende_common::error::AtendeError;
use atende_common::naive::LocalNaiveInstant;
use atende_common::services::{BookingRecord, ScheduleRequest, SchedulingApi};

use crate::mapper::{map_schedule_requests, DaySchedule, ScheduleDraft};

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// One or more user-facing validation problems; nothing was submitted.
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),
    /// Every selected date was already in the past; nothing was submitted.
    #[error("All selected dates are in the past")]
    AllDatesInPast,
    /// Slot interval that would never terminate the generator.
    #[error("Invalid slot interval: {0} minutes")]
    InvalidInterval(u32),
    #[error("Backend error: {0}")]
    Api(#[from] AtendeError),
}

/// Result of a schedule submission: what went out, and which selected dates
/// were dropped for being in the past (a warning, not a failure).
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub submitted: Vec<ScheduleRequest>,
    pub skipped_past_dates: Vec<NaiveDate>,
}

/// Validates and submits a schedule draft.
///
/// Past dates in a mixed selection are skipped and reported; an all-past
/// selection is rejected outright. The backend creates the whole batch in
/// one call.
pub async fn create_schedules<A>(
    api: &A,
    draft: &ScheduleDraft,
    now: NaiveDateTime,
) -> Result<SubmissionOutcome, ScheduleError>
where
    A: SchedulingApi<Error = AtendeError>,
{
    let mapped = map_schedule_requests(draft, now)?;
    debug!(
        "Submitting {} schedule(s), {} past date(s) skipped",
        mapped.requests.len(),
        mapped.skipped_past_dates.len()
    );
    api.create_schedules(mapped.requests.clone()).await?;
    Ok(SubmissionOutcome {
        submitted: mapped.requests,
        skipped_past_dates: mapped.skipped_past_dates,
    })
}

/// Fetches every schedule of a professional, mapped back to form state.
pub async fn list_schedules<A>(
    api: &A,
    professional_id: &str,
) -> Result<Vec<DaySchedule>, ScheduleError>
where
    A: SchedulingApi<Error = AtendeError>,
{
    let records = api.list_schedules(professional_id).await?;
    Ok(records.iter().map(DaySchedule::from_record).collect())
}

/// Deletes one schedule. Mutation of an existing schedule is delete +
/// recreate; there is no partial update.
pub async fn delete_schedule<A>(api: &A, schedule_id: &str) -> Result<(), ScheduleError>
where
    A: SchedulingApi<Error = AtendeError>,
{
    api.delete_schedule(schedule_id).await?;
    Ok(())
}

/// Fetches the bookings of one schedule for a whole calendar day.
///
/// A schedule with no bookings yields an empty list (the backend answers
/// 404 for that case; the transport maps it).
pub async fn fetch_day_bookings<A>(
    api: &A,
    schedule_id: &str,
    date: NaiveDate,
) -> Result<Vec<BookingRecord>, ScheduleError>
where
    A: SchedulingApi<Error = AtendeError>,
{
    let bookings = api
        .list_bookings(
            schedule_id,
            LocalNaiveInstant::day_start(date),
            LocalNaiveInstant::day_end(date),
        )
        .await?;
    debug!(
        "Fetched {} booking(s) for schedule {} on {}",
        bookings.len(),
        schedule_id,
        date
    );
    Ok(bookings)
}

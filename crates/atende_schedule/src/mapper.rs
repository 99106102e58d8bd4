// --- File: crates/atende_schedule/src/mapper.rs ---
//! Conversion between the local schedule form state and the remote schedule
//! records, in both directions.
//!
//! Outbound, one creation record is produced per selected date, with the
//! date-times written as naive local instants (see
//! [`atende_common::naive::LocalNaiveInstant`]). Inbound, the calendar date
//! and times-of-day are read back out of the same clock fields. The two
//! directions must stay symmetric or mapped times drift by the local UTC
//! offset.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use atende_common::naive::LocalNaiveInstant;
use atende_common::services::{ScheduleRecord, ScheduleRequest};

use crate::logic::ScheduleError;
use crate::slots::generate_slots;

/// How a schedule's bookable times are determined.
#[derive(Debug, Clone)]
pub enum SlotMode {
    /// Slots are generated from a start/end window and a fixed interval.
    Interval { start: NaiveTime, end: NaiveTime },
    /// Slots are an explicit list of custom times. On the wire the first
    /// entry stands in for both `initialTime` and `endTime`.
    Custom { times: Vec<NaiveTime> },
}

/// The schedule form state: selected dates plus the metadata shared by all
/// of them.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub dates: Vec<NaiveDate>,
    pub mode: SlotMode,
    /// Slot interval in minutes (meaningful in interval mode)
    pub interval_minutes: u32,
    /// Cancellation-policy lead time in days
    pub cancellation_policy_days: u32,
    /// Average consultation price, currency-agnostic
    pub average_value: Option<f64>,
    pub observation: String,
}

/// Outcome of the outbound mapping: the records to submit plus the dates
/// that were dropped for already being in the past.
#[derive(Debug)]
pub struct MappedSchedules {
    pub requests: Vec<ScheduleRequest>,
    pub skipped_past_dates: Vec<NaiveDate>,
}

/// Checks a draft before any network call.
///
/// Returns every user-facing problem found, not just the first one.
pub fn validate(draft: &ScheduleDraft) -> Vec<String> {
    let mut messages = Vec::new();
    if draft.dates.is_empty() {
        messages.push("Selecione ao menos uma data.".to_string());
    }
    match &draft.mode {
        SlotMode::Interval { start, end } => {
            if end <= start {
                messages
                    .push("O horário final deve ser maior que o horário inicial.".to_string());
            }
            if draft.interval_minutes == 0 {
                messages.push("Informe um intervalo entre consultas maior que zero.".to_string());
            }
        }
        SlotMode::Custom { times } => {
            if times.is_empty() {
                messages.push("Adicione ao menos um horário de atendimento.".to_string());
            }
        }
    }
    messages
}

/// Ordered, deduplicated copy of a custom time list.
pub fn normalize_custom_times(times: &[NaiveTime]) -> Vec<NaiveTime> {
    let mut normalized = times.to_vec();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Builds one schedule-creation record per selected date.
///
/// Dates whose starting instant is not strictly after `now` are excluded
/// from the output and reported in `skipped_past_dates`; if every date is
/// excluded the whole submission fails with
/// [`ScheduleError::AllDatesInPast`].
pub fn map_schedule_requests(
    draft: &ScheduleDraft,
    now: NaiveDateTime,
) -> Result<MappedSchedules, ScheduleError> {
    let messages = validate(draft);
    if !messages.is_empty() {
        return Err(ScheduleError::Validation(messages));
    }

    let (start, end, is_controlled) = match &draft.mode {
        SlotMode::Interval { start, end } => (*start, *end, true),
        SlotMode::Custom { times } => {
            // Non-empty after validation.
            let normalized = normalize_custom_times(times);
            let first = normalized[0];
            (first, first, false)
        }
    };

    let mut requests = Vec::new();
    let mut skipped_past_dates = Vec::new();
    for date in &draft.dates {
        let initial_time = LocalNaiveInstant::new(*date, start);
        if initial_time.naive() <= now {
            skipped_past_dates.push(*date);
            continue;
        }
        requests.push(ScheduleRequest {
            initial_time,
            end_time: LocalNaiveInstant::new(*date, end),
            interval: draft.interval_minutes,
            cancellation_policy: draft.cancellation_policy_days,
            average_value: draft.average_value,
            observation: draft.observation.clone(),
            is_controlled,
        });
    }

    if requests.is_empty() && !skipped_past_dates.is_empty() {
        return Err(ScheduleError::AllDatesInPast);
    }
    Ok(MappedSchedules {
        requests,
        skipped_past_dates,
    })
}

/// A remote schedule record mapped back into calendar date + times-of-day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub interval_minutes: u32,
    pub cancellation_policy_days: u32,
    pub average_value: Option<f64>,
    pub observation: String,
    pub is_controlled: bool,
}

impl DaySchedule {
    /// Recovers the local form state from a remote record by reading the
    /// written clock fields directly (the inverse of the outbound encoding).
    pub fn from_record(record: &ScheduleRecord) -> Self {
        DaySchedule {
            id: record.id.clone(),
            date: record.initial_time.date(),
            start: record.initial_time.time(),
            end: record.end_time.time(),
            interval_minutes: record.interval,
            cancellation_policy_days: record.cancellation_policy,
            average_value: record.average_value,
            observation: record.observation.clone(),
            is_controlled: record.is_controlled,
        }
    }

    /// The bookable times of this day.
    ///
    /// Free-mode records only carry their first custom time, which is all
    /// that can be recovered from the wire format.
    pub fn slots(&self) -> Result<Vec<NaiveTime>, ScheduleError> {
        if self.is_controlled {
            generate_slots(self.start, self.end, self.interval_minutes)
        } else {
            Ok(vec![self.start])
        }
    }
}

// --- File: crates/atende_common/src/services.rs ---
//! Service abstractions for the remote scheduling backend.
//!
//! This module provides the trait definition and wire models for the HTTP
//! backend the application talks to. The trait decouples schedule and
//! confirmation logic from the concrete transport, which keeps both testable
//! against an in-memory implementation.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use crate::naive::LocalNaiveInstant;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Status of one bookable slot of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked by a patient
    Scheduled,
    /// Booking was cancelled
    Cancelled,
    /// Slot exists but nobody booked it
    Available,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

/// One day's schedule-creation record, as submitted to the backend.
///
/// `initial_time` and `end_time` are naive local instants; in free
/// (non-controlled) mode both carry the first custom time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub initial_time: LocalNaiveInstant,
    pub end_time: LocalNaiveInstant,
    /// Slot interval in minutes
    pub interval: u32,
    /// Cancellation-policy lead time in days
    pub cancellation_policy: u32,
    /// Average consultation price, currency-agnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_value: Option<f64>,
    pub observation: String,
    /// true = slots are generated from the interval; false = explicit custom times
    pub is_controlled: bool,
}

/// A schedule as materialized by the backend (the request fields plus the
/// remotely assigned identifier).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,
    pub initial_time: LocalNaiveInstant,
    pub end_time: LocalNaiveInstant,
    pub interval: u32,
    pub cancellation_policy: u32,
    pub average_value: Option<f64>,
    #[serde(default)]
    pub observation: String,
    pub is_controlled: bool,
}

/// One booking row of a schedule, as returned by the bookings endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub scheduling_id: String,
    pub pacient_id: Option<String>,
    pub name_pacient: Option<String>,
    /// Time of day of the booked slot, `HH:MM`
    pub hour: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// A trait for the remote scheduling backend.
///
/// This trait defines the operations the application depends on: managing
/// schedules, listing bookings and confirming attendance. Implementations
/// must treat a `404` on the bookings listing as an empty result and a
/// `204 No Content` on the confirmation endpoint as success.
pub trait SchedulingApi: Send + Sync {
    /// Error type returned by backend operations.
    type Error: StdError + Send + Sync + 'static;

    /// Create all given schedules in one batch call.
    fn create_schedules(&self, requests: Vec<ScheduleRequest>) -> BoxFuture<'_, (), Self::Error>;

    /// List every schedule belonging to a professional.
    fn list_schedules(
        &self,
        professional_id: &str,
    ) -> BoxFuture<'_, Vec<ScheduleRecord>, Self::Error>;

    /// Delete one schedule.
    fn delete_schedule(&self, schedule_id: &str) -> BoxFuture<'_, (), Self::Error>;

    /// List bookings of a schedule within a naive-local instant range.
    fn list_bookings(
        &self,
        schedule_id: &str,
        start: LocalNaiveInstant,
        end: LocalNaiveInstant,
    ) -> BoxFuture<'_, Vec<BookingRecord>, Self::Error>;

    /// Report attendance of one booking.
    ///
    /// The backend exposes a single endpoint for both "confirmed" and
    /// "no-show"; which of the two happened is local bookkeeping.
    fn confirm_attendance(&self, scheduling_id: &str) -> BoxFuture<'_, (), Self::Error>;
}

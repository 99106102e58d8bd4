// --- File: crates/atende_tracker/src/logic.rs ---
//! Pending-confirmation tracking for booked appointments.
//!
//! Every appointment moves through `unconfirmed-not-due →
//! pending-confirmation → {confirmed, no-show}`. The pending set is fully
//! recomputed from the current appointment list on every tick, so ticks are
//! idempotent regardless of how many elapsed. Decisions call the backend
//! first and are only recorded locally once the call succeeded.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use atende_common::error::AtendeError;
use atende_common::services::{AppointmentStatus, BookingRecord, SchedulingApi};

use crate::store::{ConfirmationAction, ConfirmationStore};

/// Minutes past the slot time before an appointment becomes pending.
pub const PENDING_AFTER_MINUTES: i64 = 5;
/// Pending count at which the confirmation modal opens on its own.
pub const ESCALATION_THRESHOLD: usize = 3;

/// One booked slot, localized to its calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub scheduling_id: String,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Builds an appointment from a booking row of the given day.
    pub fn from_booking(date: NaiveDate, record: &BookingRecord) -> Result<Self, AtendeError> {
        let time = NaiveTime::parse_from_str(&record.hour, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&record.hour, "%H:%M:%S"))
            .map_err(|err| {
                AtendeError::Parse(format!("invalid booking hour {:?}: {err}", record.hour))
            })?;
        Ok(Appointment {
            scheduling_id: record.scheduling_id.clone(),
            patient_id: record.pacient_id.clone(),
            patient_name: record.name_pacient.clone(),
            scheduled_at: date.and_time(time),
            status: record.status,
        })
    }
}

/// An appointment past its slot time, waiting for a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAppointment {
    pub appointment: Appointment,
    pub minutes_passed: i64,
}

/// Result of a bulk confirmation: how many succeeded and which ids stayed
/// pending.
#[derive(Debug)]
pub struct BulkOutcome {
    pub confirmed: usize,
    pub failed: Vec<String>,
}

pub struct ConfirmationTracker<A: SchedulingApi<Error = AtendeError>> {
    api: Arc<A>,
    store: ConfirmationStore,
    appointments: Vec<Appointment>,
    pending: Vec<PendingAppointment>,
    generation: u64,
    selected_date: Option<NaiveDate>,
    modal_open: bool,
    escalated: bool,
}

impl<A: SchedulingApi<Error = AtendeError>> ConfirmationTracker<A> {
    pub fn new(api: Arc<A>, store: ConfirmationStore) -> Self {
        ConfirmationTracker {
            api,
            store,
            appointments: Vec::new(),
            pending: Vec::new(),
            generation: 0,
            selected_date: None,
            modal_open: false,
            escalated: false,
        }
    }

    /// Starts a new date selection and returns its generation tag. Any fetch
    /// issued for an older selection is discarded on arrival.
    pub fn begin_selection(&mut self, date: NaiveDate) -> u64 {
        self.generation += 1;
        self.selected_date = Some(date);
        self.generation
    }

    /// Applies a fetched booking list, fully replacing the previous one.
    ///
    /// Responses tagged with a superseded generation are dropped so a slow
    /// fetch cannot overwrite a newer selection.
    pub fn apply_fetch(&mut self, generation: u64, records: &[BookingRecord], now: NaiveDateTime) {
        if generation != self.generation {
            debug!(
                "Dropping stale booking fetch (generation {} < {})",
                generation, self.generation
            );
            return;
        }
        let Some(date) = self.selected_date else {
            return;
        };
        self.appointments = records
            .iter()
            .filter_map(|record| match Appointment::from_booking(date, record) {
                Ok(appointment) => Some(appointment),
                Err(err) => {
                    warn!("Skipping booking {}: {err}", record.scheduling_id);
                    None
                }
            })
            .collect();
        self.recompute(now);
    }

    /// The periodic check: recomputes the pending set from current inputs.
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.recompute(now);
    }

    fn recompute(&mut self, now: NaiveDateTime) {
        self.pending = self
            .appointments
            .iter()
            .filter(|appointment| appointment.status == AppointmentStatus::Scheduled)
            .filter(|appointment| appointment.patient_id.is_some())
            .filter(|appointment| !self.store.contains(&appointment.scheduling_id))
            .filter_map(|appointment| {
                let minutes_passed = (now - appointment.scheduled_at).num_minutes();
                (minutes_passed >= PENDING_AFTER_MINUTES).then(|| PendingAppointment {
                    appointment: appointment.clone(),
                    minutes_passed,
                })
            })
            .collect();
        self.update_modal_state();
    }

    fn update_modal_state(&mut self) {
        if self.pending.is_empty() {
            // Closing to empty re-arms the auto-open.
            self.modal_open = false;
            self.escalated = false;
        } else if self.pending.len() >= ESCALATION_THRESHOLD && !self.modal_open && !self.escalated
        {
            self.modal_open = true;
            self.escalated = true;
        }
    }

    /// Marks one appointment as attended.
    pub async fn confirm(&mut self, scheduling_id: &str) -> Result<(), AtendeError> {
        self.resolve(scheduling_id, ConfirmationAction::Confirmed)
            .await
    }

    /// Marks one appointment as a no-show. There is no bulk no-show path.
    pub async fn mark_no_show(&mut self, scheduling_id: &str) -> Result<(), AtendeError> {
        self.resolve(scheduling_id, ConfirmationAction::NoShow).await
    }

    async fn resolve(
        &mut self,
        scheduling_id: &str,
        action: ConfirmationAction,
    ) -> Result<(), AtendeError> {
        // Both intents map onto the backend's single attendance endpoint;
        // the local record is what tells them apart. No optimistic write: a
        // failed call leaves the appointment pending for a retry.
        self.api.confirm_attendance(scheduling_id).await?;
        self.store.record(scheduling_id, action, Utc::now());
        self.remove_pending(scheduling_id);
        Ok(())
    }

    /// Confirms every pending appointment with independent, isolated
    /// requests: one failure neither blocks nor rolls back the others.
    pub async fn confirm_all(&mut self) -> BulkOutcome {
        let ids: Vec<String> = self
            .pending
            .iter()
            .map(|pending| pending.appointment.scheduling_id.clone())
            .collect();
        let api = Arc::clone(&self.api);
        let settled = join_all(ids.into_iter().map(|id| {
            let api = Arc::clone(&api);
            async move {
                let result = api.confirm_attendance(&id).await;
                (id, result)
            }
        }))
        .await;

        let mut confirmed = 0;
        let mut failed = Vec::new();
        for (id, result) in settled {
            match result {
                Ok(()) => {
                    self.store.record(&id, ConfirmationAction::Confirmed, Utc::now());
                    self.remove_pending(&id);
                    confirmed += 1;
                }
                Err(err) => {
                    warn!("Confirmation of {id} failed: {err}");
                    failed.push(id);
                }
            }
        }
        BulkOutcome { confirmed, failed }
    }

    fn remove_pending(&mut self, scheduling_id: &str) {
        self.pending
            .retain(|pending| pending.appointment.scheduling_id != scheduling_id);
        self.update_modal_state();
    }

    /// Closes the modal without re-arming the auto-open; it will not reopen
    /// until the pending set has emptied once.
    pub fn dismiss_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn pending(&self) -> &[PendingAppointment] {
        &self.pending
    }

    pub fn store(&self) -> &ConfirmationStore {
        &self.store
    }

    /// Drops every stored decision.
    pub fn clear_confirmations(&mut self) {
        self.store.clear_all();
    }
}

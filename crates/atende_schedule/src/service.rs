// --- File: crates/atende_schedule/src/service.rs ---
//! HTTP implementation of the scheduling backend.
//!
//! This module provides an implementation of the SchedulingApi trait over
//! the remote REST API, using the shared HTTP client.

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use atende_common::error::AtendeError;
use atende_common::http::client::{create_client, HTTP_CLIENT};
use atende_common::naive::LocalNaiveInstant;
use atende_common::services::{
    BookingRecord, BoxFuture, ScheduleRecord, ScheduleRequest, SchedulingApi,
};
use atende_config::ApiConfig;

/// Scheduling backend reached over HTTP.
pub struct HttpSchedulingApi {
    base_url: String,
    client: Client,
}

impl HttpSchedulingApi {
    /// Create a backend client with the shared HTTP client and its default
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpSchedulingApi {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Create a backend client from configuration, honoring a configured
    /// request timeout.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AtendeError> {
        let client = match config.timeout_secs {
            Some(timeout_secs) => create_client(timeout_secs, true)?,
            None => HTTP_CLIENT.clone(),
        };
        Ok(HttpSchedulingApi {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// Builds the server-error value for a non-success response, passing the
/// body's message through when one is present.
async fn error_from_response(response: Response) -> AtendeError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_message(&body))
        .unwrap_or_default();
    AtendeError::Server { status, message }
}

/// Success rule of the attendance endpoint: it signals success with
/// `204 No Content`, which must not be read as an empty/invalid response.
fn attendance_success(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT || status.is_success()
}

/// Error bodies are either `{"message": "..."}` or plain text.
fn extract_message(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|message| message.as_str())
            .map(str::to_string),
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

impl SchedulingApi for HttpSchedulingApi {
    type Error = AtendeError;

    fn create_schedules(&self, requests: Vec<ScheduleRequest>) -> BoxFuture<'_, (), Self::Error> {
        let url = format!("{}/schedules", self.base_url);
        let client = self.client.clone();

        Box::pin(async move {
            debug!("Creating {} schedule(s)", requests.len());
            let response = client.post(&url).json(&requests).send().await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(error_from_response(response).await)
            }
        })
    }

    fn list_schedules(
        &self,
        professional_id: &str,
    ) -> BoxFuture<'_, Vec<ScheduleRecord>, Self::Error> {
        let url = format!("{}/schedules/{}", self.base_url, professional_id);
        let client = self.client.clone();

        Box::pin(async move {
            let response = client.get(&url).send().await?;
            if response.status().is_success() {
                Ok(response.json::<Vec<ScheduleRecord>>().await?)
            } else {
                Err(error_from_response(response).await)
            }
        })
    }

    fn delete_schedule(&self, schedule_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let url = format!("{}/schedules/{}", self.base_url, schedule_id);
        let client = self.client.clone();

        Box::pin(async move {
            let response = client.delete(&url).send().await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(error_from_response(response).await)
            }
        })
    }

    fn list_bookings(
        &self,
        schedule_id: &str,
        start: LocalNaiveInstant,
        end: LocalNaiveInstant,
    ) -> BoxFuture<'_, Vec<BookingRecord>, Self::Error> {
        let url = format!("{}/schedules/{}/bookings", self.base_url, schedule_id);
        let client = self.client.clone();

        Box::pin(async move {
            let response = client
                .get(&url)
                .query(&[
                    ("initialDate", start.to_string()),
                    ("endDate", end.to_string()),
                ])
                .send()
                .await?;
            // The backend answers 404 for a schedule without bookings.
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            if response.status().is_success() {
                Ok(response.json::<Vec<BookingRecord>>().await?)
            } else {
                Err(error_from_response(response).await)
            }
        })
    }

    fn confirm_attendance(&self, scheduling_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let url = format!("{}/schedulings/{}/confirm", self.base_url, scheduling_id);
        let client = self.client.clone();

        Box::pin(async move {
            let response = client.put(&url).send().await?;
            if attendance_success(response.status()) {
                return Ok(());
            }
            Err(error_from_response(response).await)
        })
    }
}


/// Mock implementation of SchedulingApi for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory scheduling backend for tests.
    pub struct MockSchedulingApi {
        schedules: Mutex<Vec<ScheduleRecord>>,
        bookings: Mutex<HashMap<String, Vec<BookingRecord>>>,
        next_id: Mutex<u64>,
    }

    impl MockSchedulingApi {
        pub fn new() -> Self {
            MockSchedulingApi {
                schedules: Mutex::new(Vec::new()),
                bookings: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }

        pub fn add_bookings(&self, schedule_id: &str, records: Vec<BookingRecord>) {
            self.bookings
                .lock()
                .unwrap()
                .insert(schedule_id.to_string(), records);
        }

        pub fn stored_schedules(&self) -> Vec<ScheduleRecord> {
            self.schedules.lock().unwrap().clone()
        }
    }

    impl SchedulingApi for MockSchedulingApi {
        type Error = AtendeError;

        fn create_schedules(
            &self,
            requests: Vec<ScheduleRequest>,
        ) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move {
                let mut schedules = self.schedules.lock().unwrap();
                let mut next_id = self.next_id.lock().unwrap();
                for request in requests {
                    schedules.push(ScheduleRecord {
                        id: format!("schedule-{}", *next_id),
                        initial_time: request.initial_time,
                        end_time: request.end_time,
                        interval: request.interval,
                        cancellation_policy: request.cancellation_policy,
                        average_value: request.average_value,
                        observation: request.observation,
                        is_controlled: request.is_controlled,
                    });
                    *next_id += 1;
                }
                Ok(())
            })
        }

        fn list_schedules(
            &self,
            _professional_id: &str,
        ) -> BoxFuture<'_, Vec<ScheduleRecord>, Self::Error> {
            Box::pin(async move { Ok(self.schedules.lock().unwrap().clone()) })
        }

        fn delete_schedule(&self, schedule_id: &str) -> BoxFuture<'_, (), Self::Error> {
            let schedule_id = schedule_id.to_string();
            Box::pin(async move {
                let mut schedules = self.schedules.lock().unwrap();
                let before = schedules.len();
                schedules.retain(|record| record.id != schedule_id);
                if schedules.len() == before {
                    return Err(AtendeError::NotFound(schedule_id));
                }
                Ok(())
            })
        }

        fn list_bookings(
            &self,
            schedule_id: &str,
            _start: LocalNaiveInstant,
            _end: LocalNaiveInstant,
        ) -> BoxFuture<'_, Vec<BookingRecord>, Self::Error> {
            let schedule_id = schedule_id.to_string();
            Box::pin(async move {
                // A schedule without bookings behaves like the 404 mapping.
                Ok(self
                    .bookings
                    .lock()
                    .unwrap()
                    .get(&schedule_id)
                    .cloned()
                    .unwrap_or_default())
            })
        }

        fn confirm_attendance(&self, _scheduling_id: &str) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move { Ok(()) })
        }
    }
}

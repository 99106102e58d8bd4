// --- File: crates/atende_tracker/src/session.rs ---
//! The process-wide authentication state.
//!
//! One holder owns both persisted keys (token and professional id): login
//! writes them together, logout removes them together. The token is a naive
//! bearer string, not a real credential; the backend only checks presence.

use chrono::{DateTime, Utc};

use atende_common::error::AtendeError;

use crate::store::{LocalStore, PROFESSIONAL_KEY, TOKEN_KEY};

pub struct Session {
    store: LocalStore,
    token: Option<String>,
    professional_id: Option<String>,
}

impl Session {
    /// Rehydrates the session from durable storage.
    pub fn load(store: LocalStore) -> Self {
        let token = store.get(TOKEN_KEY);
        let professional_id = store.get(PROFESSIONAL_KEY);
        Session {
            store,
            token,
            professional_id,
        }
    }

    /// Populates the session and persists both keys.
    pub fn login(&mut self, professional_id: &str, now: DateTime<Utc>) -> Result<(), AtendeError> {
        let token = format!("{}-{}", professional_id, now.timestamp_millis());
        self.store.put(TOKEN_KEY, &token)?;
        self.store.put(PROFESSIONAL_KEY, professional_id)?;
        self.token = Some(token);
        self.professional_id = Some(professional_id.to_string());
        Ok(())
    }

    /// Clears the session and removes both persisted keys. Memory is
    /// cleared even when a removal fails.
    pub fn logout(&mut self) -> Result<(), AtendeError> {
        let token_result = self.store.remove(TOKEN_KEY);
        let professional_result = self.store.remove(PROFESSIONAL_KEY);
        self.token = None;
        self.professional_id = None;
        token_result.and(professional_result)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn professional_id(&self) -> Option<&str> {
        self.professional_id.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.professional_id.is_some()
    }
}

// --- File: crates/atende_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod naive;    // Naive local wall-clock timestamps
pub mod services; // Remote API abstractions

// Re-export error types and utilities for easier access
pub use error::AtendeError;

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};

pub use naive::LocalNaiveInstant;
pub use services::{BoxFuture, SchedulingApi};

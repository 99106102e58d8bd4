// --- File: crates/atende_common/src/naive.rs ---
//! Naive local wall-clock timestamps.
//!
//! The backend contract encodes schedule date-times as local wall-clock ISO
//! strings without a timezone suffix, and reads the written clock fields back
//! out unchanged. Both directions must stay symmetric: the string is never
//! shifted into or out of UTC, otherwise every mapped time drifts by the
//! local UTC offset. [`LocalNaiveInstant`] makes that convention a dedicated
//! type instead of an implicit agreement between call sites.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AtendeError;

/// Wire format written by [`fmt::Display`]: zero-padded, second precision,
/// no timezone suffix.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A date-time in the professional's local wall-clock frame.
///
/// Encoding produces `YYYY-MM-DDTHH:MM:SS` with no `Z` and no UTC
/// conversion. Decoding accepts the same suffix-free form as well as
/// instants carrying `Z` or a numeric offset, in which case the *written*
/// clock digits are kept and the suffix is discarded rather than applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalNaiveInstant(NaiveDateTime);

impl LocalNaiveInstant {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        LocalNaiveInstant(date.and_time(time))
    }

    pub fn from_naive(naive: NaiveDateTime) -> Self {
        LocalNaiveInstant(naive)
    }

    /// First representable instant of the given calendar day.
    pub fn day_start(date: NaiveDate) -> Self {
        LocalNaiveInstant(date.and_time(NaiveTime::MIN))
    }

    /// Last whole second of the given calendar day.
    pub fn day_end(date: NaiveDate) -> Self {
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        LocalNaiveInstant(date.and_time(end))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for LocalNaiveInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for LocalNaiveInstant {
    type Err = AtendeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, WIRE_FORMAT) {
            return Ok(LocalNaiveInstant(naive));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(LocalNaiveInstant(naive));
        }
        // Suffixed instants: keep the written clock fields, drop the offset.
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(LocalNaiveInstant(dt.naive_local()));
        }
        Err(AtendeError::Parse(format!("invalid naive instant: {s:?}")))
    }
}

impl Serialize for LocalNaiveInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalNaiveInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

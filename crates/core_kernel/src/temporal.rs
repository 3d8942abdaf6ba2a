//! Time handling types
//!
//! Invitation expiry is computed relative to "now". Routing every read of the
//! current time through [`Clock`] keeps that arithmetic reproducible in tests.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Timestamp overflow adding {days} days to {base}")]
    Overflow {
        base: String,
        days: i64,
    },
}

/// Source of the current time
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns `base` shifted forward by a whole number of days
///
/// # Errors
///
/// Returns `TemporalError::Overflow` if the result is outside chrono's range
pub fn days_from(base: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, TemporalError> {
    Duration::try_days(days)
        .and_then(|delta| base.checked_add_signed(delta))
        .ok_or_else(|| TemporalError::Overflow {
            base: base.to_rfc3339(),
            days,
        })
}

/// Returns true if an expiry timestamp has passed at `now`
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at <= now
}

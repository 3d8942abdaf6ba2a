//! Tests for the clock and expiry helpers

use chrono::{Duration, TimeZone, Utc};
use core_kernel::temporal::is_expired;
use core_kernel::{days_from, Clock, FixedClock, SystemClock};
use proptest::prelude::*;

#[test]
fn test_system_clock_moves_forward() {
    let clock = SystemClock;
    let first = clock.now();
    let second = clock.now();
    assert!(second >= first);
}

#[test]
fn test_seven_days_across_month_boundary() {
    let now = Utc.with_ymd_and_hms(2024, 12, 28, 23, 0, 0).unwrap();
    let clock = FixedClock::new(now);
    let expiry = days_from(clock.now(), 7).unwrap();
    assert_eq!(expiry, Utc.with_ymd_and_hms(2025, 1, 4, 23, 0, 0).unwrap());
}

#[test]
fn test_expiry_is_rfc3339() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let expiry = days_from(now, 7).unwrap();
    assert_eq!(expiry.to_rfc3339(), "2024-03-08T12:00:00+00:00");
}

proptest! {
    #[test]
    fn prop_days_from_is_exact(secs in 0i64..4_000_000_000i64, days in 0i64..3650) {
        let base = Utc.timestamp_opt(secs, 0).unwrap();
        let shifted = days_from(base, days).unwrap();
        prop_assert_eq!(shifted - base, Duration::days(days));
        prop_assert!(!is_expired(shifted, base) || days == 0);
    }
}

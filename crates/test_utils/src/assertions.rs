//! Custom Test Assertions
//!
//! Assertion helpers with messages that name the offending value.

use chrono::{DateTime, Duration, Utc};
use domain_team::Invitation;
use serde_json::Value;

/// Asserts that a JSON body is the `{ "success": bool }` envelope
///
/// # Panics
///
/// Panics if the field is missing or differs from `expected`
pub fn assert_success_envelope(body: &Value, expected: bool) {
    let actual = body.get("success").and_then(Value::as_bool);
    assert_eq!(
        actual,
        Some(expected),
        "Expected success={} envelope, got body {}",
        expected,
        body
    );
}

/// Asserts that an invitation expires exactly `days` after `from`
pub fn assert_expires_days_after(invitation: &Invitation, from: DateTime<Utc>, days: i64) {
    let expected = from + Duration::days(days);
    assert_eq!(
        invitation.expires_at, expected,
        "Invitation {} expires at {}, expected {}",
        invitation.id, invitation.expires_at, expected
    );
}

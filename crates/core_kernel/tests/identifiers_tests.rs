//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, and display formatting.

use core_kernel::{AccountId, InvitationId, SubmissionId, UserId};
use uuid::Uuid;

mod uuid_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = AccountId::new();
        let id2 = AccountId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(AccountId::prefix(), "ACC");
        assert_eq!(UserId::prefix(), "USR");
        assert_eq!(SubmissionId::prefix(), "VSUB");
    }

    #[test]
    fn test_parse_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: UserId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ACC-not-a-uuid".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = AccountId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod invitation_id_tests {
    use super::*;

    #[test]
    fn test_round_trip_through_i64() {
        let id = InvitationId::from(7_i64);
        let raw: i64 = id.into();
        assert_eq!(raw, 7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(InvitationId::new(1024).to_string(), "1024");
    }

    #[test]
    fn test_ordering_follows_sequence() {
        assert!(InvitationId::new(1) < InvitationId::new(2));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("abc".parse::<InvitationId>().is_err());
    }
}

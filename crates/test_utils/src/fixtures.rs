//! Pre-built Test Fixtures
//!
//! Predictable data shared by unit, API, and database tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::FixedClock;
use domain_team::{roles, Account, MockTeamAccountsPort};

/// Fixed instants for deterministic expiry arithmetic
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The instant every fixture treats as "now"
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    pub fn clock() -> FixedClock {
        FixedClock::new(Self::now())
    }
}

/// A small team: one account with an owner and a member
pub struct TeamFixtures;

impl TeamFixtures {
    pub const SLUG: &'static str = "riverside-events";
    pub const NAME: &'static str = "Riverside Events";
    pub const OWNER_EMAIL: &'static str = "owner@riverside.test";
    pub const MEMBER_EMAIL: &'static str = "dana@riverside.test";

    pub fn account() -> Account {
        Account::new(Self::SLUG, Self::NAME)
    }

    /// An in-memory port holding the team
    pub async fn mock_port() -> MockTeamAccountsPort {
        MockTeamAccountsPort::new()
            .with_account(Self::account())
            .await
            .with_member(Self::SLUG, Self::OWNER_EMAIL, roles::OWNER)
            .await
            .with_member(Self::SLUG, Self::MEMBER_EMAIL, roles::MEMBER)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Clock;
    use domain_team::TeamAccountsPort;

    #[test]
    fn test_clock_is_fixed() {
        assert_eq!(TemporalFixtures::clock().now(), TemporalFixtures::now());
    }

    #[tokio::test]
    async fn test_mock_port_has_team() {
        let port = TeamFixtures::mock_port().await;
        let members = port.get_account_members(TeamFixtures::SLUG, None).await.unwrap();
        assert_eq!(members.len(), 2);
    }
}

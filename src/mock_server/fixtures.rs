//! Test data fixtures for the mock server.
//!
//! Provides a small organization with users, a team, metrics with recorded
//! values and a newsflash.

use super::state::{MockOwner, MockState};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    pub const ADA_EMAIL: &'static str = "ada@example.com";
    pub const GRACE_EMAIL: &'static str = "grace@example.com";
    pub const TEAM_NAME: &'static str = "Closers";
    pub const DEALS_METRIC: &'static str = "Deals Closed";
    pub const REVENUE_METRIC: &'static str = "Revenue";
    pub const NEWSFLASH_NAME: &'static str = "Big Wins";
    pub const GENERIC_OWNER: &'static str = "widgets";

    /// The default scenario.
    ///
    /// Ids are allocated in insertion order, so Ada is user 1, Grace user 2
    /// and the team is 3.
    pub fn default_scenario() -> MockState {
        MockState::new()
            .with_user("Ada", "Lovelace", Self::ADA_EMAIL)
            .with_user("Grace", "Hopper", Self::GRACE_EMAIL)
            .with_team(Self::TEAM_NAME)
            .with_metric(Self::DEALS_METRIC, "number")
            .with_metric(Self::REVENUE_METRIC, "currency")
            .with_metric_value(Self::DEALS_METRIC, MockOwner::User(1), 12.0)
            .with_metric_value(Self::DEALS_METRIC, MockOwner::Team(3), 30.0)
            .with_metric_value(
                Self::DEALS_METRIC,
                MockOwner::Generic(Self::GENERIC_OWNER.to_string()),
                3.0,
            )
            .with_newsflash(Self::NEWSFLASH_NAME)
    }
}

//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Hoopla API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// A user record.
#[derive(Debug, Clone, PartialEq)]
pub struct MockUser {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A team record.
#[derive(Debug, Clone, PartialEq)]
pub struct MockTeam {
    pub id: u64,
    pub name: String,
}

/// A metric record.
#[derive(Debug, Clone, PartialEq)]
pub struct MockMetric {
    pub id: u64,
    pub name: String,
    pub metric_type: String,
}

/// Owner of a metric value or newsflash event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOwner {
    User(u64),
    Team(u64),
    Generic(String),
}

/// A metric value record.
#[derive(Debug, Clone, PartialEq)]
pub struct MockMetricValue {
    pub id: u64,
    pub metric_id: u64,
    pub owner: MockOwner,
    pub value: Value,
    pub updated_at: String,
}

/// A newsflash record.
#[derive(Debug, Clone, PartialEq)]
pub struct MockNewsflash {
    pub id: u64,
    pub name: String,
    pub nickname: Option<String>,
}

/// A newsflash event, stored as posted.
#[derive(Debug, Clone, PartialEq)]
pub struct MockNewsflashEvent {
    pub id: u64,
    pub newsflash_id: u64,
    pub fields: Map<String, Value>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    pub users: BTreeMap<u64, MockUser>,
    pub teams: BTreeMap<u64, MockTeam>,
    pub metrics: BTreeMap<u64, MockMetric>,
    pub metric_values: BTreeMap<u64, MockMetricValue>,
    pub newsflashes: BTreeMap<u64, MockNewsflash>,
    pub newsflash_events: BTreeMap<u64, MockNewsflashEvent>,

    /// Client id and secret accepted by the token endpoint. Any credentials
    /// are accepted when unset.
    pub credentials: Option<(String, String)>,

    /// Optional authentication token. If set, API requests must present it.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Allocate a record id. Ids are unique across all collections.
    pub fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Add a user.
    pub fn with_user(mut self, first_name: &str, last_name: &str, email: &str) -> Self {
        let id = self.allocate_id();
        self.users.insert(
            id,
            MockUser {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
            },
        );
        self
    }

    /// Add a team.
    pub fn with_team(mut self, name: &str) -> Self {
        let id = self.allocate_id();
        self.teams.insert(
            id,
            MockTeam {
                id,
                name: name.to_string(),
            },
        );
        self
    }

    /// Add a metric.
    pub fn with_metric(mut self, name: &str, metric_type: &str) -> Self {
        let id = self.allocate_id();
        self.metrics.insert(
            id,
            MockMetric {
                id,
                name: name.to_string(),
                metric_type: metric_type.to_string(),
            },
        );
        self
    }

    /// Add a value for the metric called `metric_name`.
    ///
    /// Does nothing if there is no such metric.
    pub fn with_metric_value(mut self, metric_name: &str, owner: MockOwner, value: f64) -> Self {
        if let Some(metric_id) = self.find_metric_id(metric_name) {
            self.insert_metric_value(metric_id, owner, Value::from(value));
        }
        self
    }

    /// Add a newsflash.
    pub fn with_newsflash(mut self, name: &str) -> Self {
        self.insert_newsflash(name.to_string(), None);
        self
    }

    /// Only accept this client id and secret at the token endpoint.
    pub fn with_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.credentials = Some((client_id.to_string(), client_secret.to_string()));
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&MockUser> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    fn find_metric_id(&self, name: &str) -> Option<u64> {
        self.metrics.values().find(|m| m.name == name).map(|m| m.id)
    }

    /// Users, optionally filtered by email.
    pub fn list_users(&self, email: Option<&str>) -> Vec<&MockUser> {
        self.users
            .values()
            .filter(|u| email.map_or(true, |e| u.email.eq_ignore_ascii_case(e)))
            .collect()
    }

    /// Teams, optionally filtered by exact name.
    pub fn list_teams(&self, name: Option<&str>) -> Vec<&MockTeam> {
        self.teams
            .values()
            .filter(|t| name.map_or(true, |n| t.name == n))
            .collect()
    }

    /// Metrics, optionally filtered by exact name.
    pub fn list_metrics(&self, name: Option<&str>) -> Vec<&MockMetric> {
        self.metrics
            .values()
            .filter(|m| name.map_or(true, |n| m.name == n))
            .collect()
    }

    /// Values of one metric, optionally filtered by owner.
    pub fn list_metric_values(
        &self,
        metric_id: u64,
        owner: Option<&MockOwner>,
    ) -> Vec<&MockMetricValue> {
        self.metric_values
            .values()
            .filter(|v| v.metric_id == metric_id)
            .filter(|v| owner.map_or(true, |o| &v.owner == o))
            .collect()
    }

    /// Newsflashes, optionally filtered by exact name.
    pub fn list_newsflashes(&self, name: Option<&str>) -> Vec<&MockNewsflash> {
        self.newsflashes
            .values()
            .filter(|n| name.map_or(true, |wanted| n.name == wanted))
            .collect()
    }

    pub fn insert_metric_value(&mut self, metric_id: u64, owner: MockOwner, value: Value) -> u64 {
        let id = self.allocate_id();
        self.metric_values.insert(
            id,
            MockMetricValue {
                id,
                metric_id,
                owner,
                value,
                updated_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        id
    }

    /// Update a metric value and return the updated version.
    pub fn update_metric_value(
        &mut self,
        metric_id: u64,
        value_id: u64,
        owner: Option<MockOwner>,
        value: Option<Value>,
    ) -> Option<&MockMetricValue> {
        let record = self
            .metric_values
            .get_mut(&value_id)
            .filter(|v| v.metric_id == metric_id)?;
        if let Some(owner) = owner {
            record.owner = owner;
        }
        if let Some(value) = value {
            record.value = value;
        }
        record.updated_at = chrono::Utc::now().to_rfc3339();
        Some(record)
    }

    /// Remove a metric value, returning whether it existed.
    pub fn delete_metric_value(&mut self, metric_id: u64, value_id: u64) -> bool {
        match self.metric_values.get(&value_id) {
            Some(v) if v.metric_id == metric_id => {
                self.metric_values.remove(&value_id);
                true
            }
            _ => false,
        }
    }

    pub fn insert_newsflash(&mut self, name: String, nickname: Option<String>) -> u64 {
        let id = self.allocate_id();
        self.newsflashes.insert(id, MockNewsflash { id, name, nickname });
        id
    }

    pub fn insert_newsflash_event(&mut self, newsflash_id: u64, fields: Map<String, Value>) -> u64 {
        let id = self.allocate_id();
        self.newsflash_events.insert(
            id,
            MockNewsflashEvent {
                id,
                newsflash_id,
                fields,
            },
        );
        id
    }
}

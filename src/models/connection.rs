//! API root resource.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Metric, Newsflash, Team, User};
use crate::resource::{LocalAttrs, ResourceCore};
use crate::session::Session;
use crate::traits::{Related, Reload, Resource};

const LIST_USERS: &str = "list_users";
const LIST_TEAMS: &str = "list_teams";
const LIST_METRICS: &str = "list_metrics";
const LIST_NEWSFLASHES: &str = "list_newsflashes";
const CREATE_NEWSFLASH: &str = "create_newsflash";

/// The API root.
///
/// Its links lead to every top-level collection; all lookups start here.
///
/// # Example
///
/// ```no_run
/// use hoopla::HooplaClient;
///
/// # async fn example() -> hoopla::Result<()> {
/// let client = HooplaClient::from_env().await?;
/// let root = client.connect().await?;
///
/// if let Some(user) = root.find_user_by_email("ada@example.com").await? {
///     println!("found {}", user.display_name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Connection {
    core: ResourceCore,
}

impl Resource for Connection {
    const KIND: &'static str = "connection";
    const ATTRIBUTES: &'static [&'static str] = &["href", "links"];

    fn from_core(core: ResourceCore) -> Self {
        Self { core }
    }

    fn core(&self) -> &ResourceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ResourceCore {
        &mut self.core
    }
}

impl Connection {
    /// Load the root document at `root_url`.
    pub async fn open(session: Arc<dyn Session>, root_url: &str) -> Result<Self> {
        Self::fetch(session, root_url).await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.fetch_related::<User>(LIST_USERS, &[], LocalAttrs::new())
            .await
    }

    pub async fn find_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        self.fetch_related::<User>(LIST_USERS, &[("email", email)], LocalAttrs::new())
            .await
    }

    /// First user with `email`, or `None`.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_users_by_email(email).await?.into_iter().next())
    }

    pub async fn teams(&self) -> Result<Vec<Team>> {
        self.fetch_related::<Team>(LIST_TEAMS, &[], LocalAttrs::new())
            .await
    }

    pub async fn find_teams_by_name(&self, name: &str) -> Result<Vec<Team>> {
        self.fetch_related::<Team>(LIST_TEAMS, &[("name", name)], LocalAttrs::new())
            .await
    }

    pub async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        Ok(self.find_teams_by_name(name).await?.into_iter().next())
    }

    pub async fn metrics(&self) -> Result<Vec<Metric>> {
        self.fetch_related::<Metric>(LIST_METRICS, &[], LocalAttrs::new())
            .await
    }

    pub async fn find_metrics_by_name(&self, name: &str) -> Result<Vec<Metric>> {
        self.fetch_related::<Metric>(LIST_METRICS, &[("name", name)], LocalAttrs::new())
            .await
    }

    pub async fn find_metric_by_name(&self, name: &str) -> Result<Option<Metric>> {
        Ok(self.find_metrics_by_name(name).await?.into_iter().next())
    }

    pub async fn newsflashes(&self) -> Result<Vec<Newsflash>> {
        self.fetch_related::<Newsflash>(LIST_NEWSFLASHES, &[], LocalAttrs::new())
            .await
    }

    pub async fn find_newsflashes_by_name(&self, name: &str) -> Result<Vec<Newsflash>> {
        self.fetch_related::<Newsflash>(LIST_NEWSFLASHES, &[("name", name)], LocalAttrs::new())
            .await
    }

    pub async fn find_newsflash_by_name(&self, name: &str) -> Result<Option<Newsflash>> {
        Ok(self.find_newsflashes_by_name(name).await?.into_iter().next())
    }

    /// New, unsaved newsflash.
    ///
    /// # Errors
    ///
    /// Returns an error if the root has no `create_newsflash` link.
    pub fn new_newsflash(&self) -> Result<Newsflash> {
        let url = self.relation(CREATE_NEWSFLASH)?;
        Ok(Newsflash::with_creation_url(self.session().clone(), url))
    }
}

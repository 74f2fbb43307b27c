//! Reload trait for hydrating resources from the server.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::session::Session;
use crate::traits::Resource;

/// Re-read a persistent resource from its `href`.
///
/// Implemented for every [`Resource`].
///
/// # Example
///
/// ```ignore
/// use hoopla::{Reload, Team};
///
/// let team = Team::fetch(session, "https://api.hoopla.net/teams/3").await?;
/// println!("{:?}", team.name());
/// ```
#[async_trait]
pub trait Reload: Resource {
    /// GET the resource's `href` and replace its fields with the response.
    ///
    /// Local-only fields survive. On any failure the resource is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// [`HooplaError::MissingHref`](crate::HooplaError::MissingHref) for a
    /// transient resource, otherwise any transport or HTTP error.
    async fn reload(&mut self) -> Result<()>;

    /// Fetch the resource at `href`.
    async fn fetch(session: Arc<dyn Session>, href: &str) -> Result<Self>;
}

#[async_trait]
impl<T: Resource> Reload for T {
    async fn reload(&mut self) -> Result<()> {
        let href = self.require_href("reload")?.to_string();

        let response = self.session().get(&href, &[]).await?.error_for_status()?;
        let payload: Map<String, Value> = response.json()?;

        self.core_mut().attributes_mut().load(payload);
        Ok(())
    }

    async fn fetch(session: Arc<dyn Session>, href: &str) -> Result<Self> {
        let mut resource = Self::stub(session, href);
        resource.reload().await?;
        Ok(resource)
    }
}

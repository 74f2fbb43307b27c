//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Writable;

/// Delete a persistent resource on the server.
///
/// After a successful delete the instance no longer refers to anything and
/// should not be saved or reloaded again.
#[async_trait]
pub trait Delete: Writable {
    /// Issue a DELETE to the resource's `href`.
    ///
    /// # Errors
    ///
    /// [`HooplaError::MissingHref`](crate::HooplaError::MissingHref) for a
    /// transient resource, otherwise any transport or HTTP error.
    async fn delete(&self) -> Result<()>;
}

#[async_trait]
impl<T: Writable> Delete for T {
    async fn delete(&self) -> Result<()> {
        let href = self.require_href("delete")?;
        self.session().delete(href).await?.error_for_status()?;
        Ok(())
    }
}

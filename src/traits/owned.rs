//! Owner trait for resources with a polymorphic `owner` attribute.

use async_trait::async_trait;

use crate::error::Result;
use crate::owner::{Owner, OwnerRef};
use crate::traits::Resource;

/// Attribute holding the tagged owner reference.
const OWNER: &str = "owner";

/// A resource whose `owner` attribute is a tagged reference.
///
/// [`set_owner`](HasOwner::set_owner) encodes the reference,
/// [`owner_ref`](HasOwner::owner_ref) decodes it without touching the
/// network, and [`resolve_owner`](HasOwner::resolve_owner) fetches the user
/// or team it points at.
///
/// # Example
///
/// ```ignore
/// use hoopla::{HasOwner, Save};
///
/// let mut value = metric.new_value()?;
/// value.set_owner("widgets");
/// value.save().await?;
///
/// if let Some(owner) = value.resolve_owner().await? {
///     println!("{owner}");
/// }
/// ```
#[async_trait]
pub trait HasOwner: Resource {
    /// Store `owner` as a tagged reference.
    ///
    /// Strings become generic owners; users and teams convert with
    /// `OwnerRef::try_from`.
    fn set_owner(&mut self, owner: impl Into<OwnerRef>) {
        self.set(OWNER, owner.into().to_value());
    }

    /// Decode the owner reference, if one is set.
    fn owner_ref(&self) -> Result<Option<OwnerRef>> {
        self.attributes()
            .get(OWNER)
            .map(OwnerRef::from_value)
            .transpose()
    }

    /// Decode the owner and fetch it when it is a user or team.
    async fn resolve_owner(&self) -> Result<Option<Owner>> {
        match self.owner_ref()? {
            Some(owner) => Ok(Some(owner.resolve(self.session()).await?)),
            None => Ok(None),
        }
    }
}

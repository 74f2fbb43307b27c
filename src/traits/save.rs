//! Save trait for creating and updating resources.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{HooplaError, Result};
use crate::resource::HREF;
use crate::session::HttpResponse;
use crate::traits::Writable;

/// Persist a resource's fields.
///
/// Implemented for every [`Writable`] resource.
///
/// # Example
///
/// ```ignore
/// use hoopla::{HasOwner, Save};
///
/// let mut value = metric.new_value()?;
/// value.set_value(3.5);
/// value.set_owner("widgets");
/// value.save().await?;
/// ```
#[async_trait]
pub trait Save: Writable {
    /// PUT to `href` when persistent, otherwise POST to the creation URL.
    ///
    /// The body is the serialized attribute store, sent with the kind's
    /// media type. Fields are not refreshed from the response; after a
    /// successful create only the server-assigned `href` is adopted, when
    /// the response body carries one. On failure fields stay as the caller
    /// set them.
    ///
    /// # Errors
    ///
    /// [`HooplaError::MissingCreationUrl`] for a transient resource with no
    /// creation URL, otherwise any transport or HTTP error.
    async fn save(&mut self) -> Result<()>;
}

#[async_trait]
impl<T: Writable> Save for T {
    async fn save(&mut self) -> Result<()> {
        let body = self.serialize();
        let content_type = Self::content_type();

        if let Some(href) = self.href() {
            let href = href.to_string();
            self.session()
                .put(&href, &content_type, &body)
                .await?
                .error_for_status()?;
            return Ok(());
        }

        let url = self
            .creation_url()
            .ok_or(HooplaError::MissingCreationUrl { kind: Self::KIND })?
            .to_string();
        let response = self
            .session()
            .post(&url, &content_type, &body)
            .await?
            .error_for_status()?;

        if let Some(href) = created_href(&response) {
            self.core_mut().attributes_mut().set(HREF, href);
        }
        Ok(())
    }
}

/// `href` of a freshly created resource, from the response body.
fn created_href(response: &HttpResponse) -> Option<String> {
    let body: Value = response.json().ok()?;
    body.get(HREF)?.as_str().map(str::to_string)
}

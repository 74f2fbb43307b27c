//! Resource trait: attribute access shared by every resource kind.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attributes::AttributeStore;
use crate::error::{HooplaError, Result};
use crate::resource::{LocalAttrs, ResourceCore, CREATION_URL, HREF};
use crate::session::Session;

/// A server resource bound to a session.
///
/// Each kind declares its API attribute names. Writes to one of those names
/// go to the [`AttributeStore`] and are sent to the server; writes to any
/// other name are kept as local-only state.
///
/// # Example
///
/// ```ignore
/// use hoopla::{Resource, User};
///
/// let mut user = User::stub(session, "https://api.hoopla.net/users/1");
/// user.set("email", "ada@example.com");   // API attribute
/// user.set("display_hint", "short");      // local only
/// assert!(user.get("first_name")?.is_none());
/// ```
pub trait Resource: Sized + Send + Sync {
    /// Short name used in error messages (e.g. "metric value").
    const KIND: &'static str;

    /// Field names the server knows for this kind.
    const ATTRIBUTES: &'static [&'static str];

    /// Wrap an existing core.
    fn from_core(core: ResourceCore) -> Self;

    fn core(&self) -> &ResourceCore;

    fn core_mut(&mut self) -> &mut ResourceCore;

    /// Build a persistent resource from a server payload.
    fn from_payload(session: Arc<dyn Session>, payload: Map<String, Value>) -> Self {
        Self::from_payload_with_local(session, payload, LocalAttrs::new())
    }

    /// Build a resource from a server payload plus local-only fields.
    fn from_payload_with_local(
        session: Arc<dyn Session>,
        payload: Map<String, Value>,
        local: LocalAttrs,
    ) -> Self {
        Self::from_core(ResourceCore::loaded(session, payload, local))
    }

    /// Build an empty transient resource that [`Save`](crate::Save) will
    /// POST to `creation_url`.
    fn with_creation_url(session: Arc<dyn Session>, creation_url: impl Into<String>) -> Self {
        let mut core = ResourceCore::new(session);
        core.local_mut()
            .insert(CREATION_URL.to_string(), Value::String(creation_url.into()));
        Self::from_core(core)
    }

    /// Build a resource holding only its `href`, to be hydrated with
    /// [`Reload::reload`](crate::Reload::reload).
    fn stub(session: Arc<dyn Session>, href: impl Into<String>) -> Self {
        let mut core = ResourceCore::new(session);
        core.attributes_mut().set(HREF, href.into());
        Self::from_core(core)
    }

    /// Whether `name` is one of this kind's API attributes.
    fn is_api_attribute(name: &str) -> bool {
        Self::ATTRIBUTES.contains(&name)
    }

    fn href(&self) -> Option<&str> {
        self.core().attributes().get(HREF).and_then(Value::as_str)
    }

    /// Whether the resource exists on the server.
    fn is_persistent(&self) -> bool {
        self.href().is_some()
    }

    /// The `href`, or [`HooplaError::MissingHref`] naming `operation`.
    fn require_href(&self, operation: &'static str) -> Result<&str> {
        self.href().ok_or(HooplaError::MissingHref {
            kind: Self::KIND,
            operation,
        })
    }

    /// URL a transient resource is created at, if one was supplied.
    fn creation_url(&self) -> Option<&str> {
        self.core().local().get(CREATION_URL).and_then(Value::as_str)
    }

    /// Read a field.
    ///
    /// API attributes that the server did not return read as `Ok(None)`.
    /// Any other name must have been set locally; otherwise the read fails
    /// with [`HooplaError::UnknownAttribute`].
    fn get(&self, name: &str) -> Result<Option<&Value>> {
        if Self::is_api_attribute(name) {
            return Ok(self.core().attributes().get(name));
        }
        match self.core().local().get(name) {
            Some(value) => Ok(Some(value)),
            None => Err(HooplaError::UnknownAttribute {
                kind: Self::KIND,
                name: name.to_string(),
            }),
        }
    }

    /// Write a field, routing API attributes to the server-visible store and
    /// everything else to local state.
    fn set(&mut self, name: &str, value: impl Into<Value>) {
        if Self::is_api_attribute(name) {
            self.core_mut().attributes_mut().set(name, value);
        } else {
            self.core_mut()
                .local_mut()
                .insert(name.to_string(), value.into());
        }
    }

    /// String value of an API attribute.
    fn attribute_str(&self, name: &str) -> Option<&str> {
        self.core().attributes().get(name).and_then(Value::as_str)
    }

    /// Target of a link relation.
    ///
    /// Relation names are part of the API contract, so a missing one is an
    /// error rather than `None`.
    fn relation(&self, rel: &str) -> Result<&str> {
        self.core()
            .attributes()
            .relation(rel)
            .ok_or_else(|| HooplaError::MissingRelation {
                kind: Self::KIND,
                relation: rel.to_string(),
            })
    }

    fn attributes(&self) -> &AttributeStore {
        self.core().attributes()
    }

    fn local(&self) -> &LocalAttrs {
        self.core().local()
    }

    fn session(&self) -> &Arc<dyn Session> {
        self.core().session()
    }

    /// Request body for create and update.
    fn serialize(&self) -> Value {
        self.core().attributes().serialize()
    }
}

/// A resource kind that can be created, updated and deleted.
pub trait Writable: Resource {
    /// Vendor media type, without the `+json` suffix.
    const MEDIA_TYPE: &'static str;

    /// `Content-Type` header sent on writes.
    fn content_type() -> String {
        format!("{}+json", Self::MEDIA_TYPE)
    }
}

//! State shared by every resource kind.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attributes::AttributeStore;
use crate::session::Session;

/// Local-only fields that travel with a resource but are never sent to the
/// server.
pub type LocalAttrs = Map<String, Value>;

/// Local field holding the URL a transient resource is POSTed to.
pub const CREATION_URL: &str = "creation_url";

/// Field holding a resource's canonical URL.
pub const HREF: &str = "href";

/// Session, server-visible fields and local-only fields of one resource.
#[derive(Clone)]
pub struct ResourceCore {
    session: Arc<dyn Session>,
    attributes: AttributeStore,
    local: LocalAttrs,
}

impl fmt::Debug for ResourceCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCore")
            .field("attributes", &self.attributes)
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

impl ResourceCore {
    /// Empty core with no fields.
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            attributes: AttributeStore::new(),
            local: LocalAttrs::new(),
        }
    }

    /// Core loaded from a server payload, with local fields applied after.
    pub fn loaded(session: Arc<dyn Session>, payload: Map<String, Value>, local: LocalAttrs) -> Self {
        Self {
            session,
            attributes: AttributeStore::from_payload(payload),
            local,
        }
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    pub fn local(&self) -> &LocalAttrs {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut LocalAttrs {
        &mut self.local
    }
}

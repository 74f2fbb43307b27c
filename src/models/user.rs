//! User model.

use crate::resource::ResourceCore;
use crate::traits::{Resource, Writable};

/// A Hoopla user.
#[derive(Debug, Clone)]
pub struct User {
    core: ResourceCore,
}

impl Resource for User {
    const KIND: &'static str = "user";
    const ATTRIBUTES: &'static [&'static str] =
        &["href", "links", "first_name", "last_name", "email"];

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

impl Writable for User {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.user";
}

impl User {
    pub fn email(&self) -> Option<&str> {
        self.attribute_str("email")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.attribute_str("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.attribute_str("last_name")
    }

    /// "First Last", falling back to the email address, then the href.
    pub fn display_name(&self) -> String {
        let name: Vec<&str> = [self.first_name(), self.last_name()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if !name.is_empty() {
            return name.join(" ");
        }
        self.email()
            .or_else(|| self.href())
            .unwrap_or("<unknown user>")
            .to_string()
    }
}

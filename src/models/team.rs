//! Team model.

use crate::resource::ResourceCore;
use crate::traits::{Resource, Writable};

/// A Hoopla team.
#[derive(Debug, Clone)]
pub struct Team {
    core: ResourceCore,
}

impl Resource for Team {
    const KIND: &'static str = "team";
    const ATTRIBUTES: &'static [&'static str] = &["href", "links", "name"];

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

impl Writable for Team {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.team";
}

impl Team {
    pub fn name(&self) -> Option<&str> {
        self.attribute_str("name")
    }
}

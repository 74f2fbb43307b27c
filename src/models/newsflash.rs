//! Newsflash model.

use crate::error::Result;
use crate::models::NewsflashEvent;
use crate::resource::ResourceCore;
use crate::traits::{Resource, Writable};

const CREATE_NEWSFLASH_EVENT: &str = "create_newsflash_event";

/// A newsflash: a named channel that events are posted to.
#[derive(Debug, Clone)]
pub struct Newsflash {
    core: ResourceCore,
}

impl Resource for Newsflash {
    const KIND: &'static str = "newsflash";
    const ATTRIBUTES: &'static [&'static str] = &["href", "links", "name", "nickname"];

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

impl Writable for Newsflash {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.newsflash";
}

impl Newsflash {
    pub fn name(&self) -> Option<&str> {
        self.attribute_str("name")
    }

    pub fn nickname(&self) -> Option<&str> {
        self.attribute_str("nickname")
    }

    /// New, unsaved event for this newsflash.
    ///
    /// # Errors
    ///
    /// Returns an error if the newsflash has no `create_newsflash_event` link.
    pub fn new_event(&self) -> Result<NewsflashEvent> {
        let url = self.relation(CREATE_NEWSFLASH_EVENT)?;
        Ok(NewsflashEvent::with_creation_url(self.session().clone(), url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HooplaError;
    use crate::testing::FakeSession;
    use serde_json::json;

    #[test]
    fn test_new_event_is_wired_to_relation() {
        let newsflash = Newsflash::from_payload(
            FakeSession::shared(),
            json!({
                "href": "https://api.example/newsflashes/1",
                "name": "Big Wins",
                "links": [{"rel": "create_newsflash_event", "href": "https://api.example/newsflashes/1/events"}]
            })
            .as_object()
            .unwrap()
            .clone(),
        );

        let event = newsflash.new_event().unwrap();

        assert!(!event.is_persistent());
        assert_eq!(event.creation_url(), Some("https://api.example/newsflashes/1/events"));
    }

    #[test]
    fn test_new_event_without_relation() {
        let newsflash = Newsflash::stub(FakeSession::shared(), "https://api.example/newsflashes/1");
        assert!(matches!(
            newsflash.new_event(),
            Err(HooplaError::MissingRelation { kind: "newsflash", .. })
        ));
    }
}

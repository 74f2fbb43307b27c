//! Newsflash event model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{HooplaError, Result};
use crate::models::User;
use crate::owner::OwnerRef;
use crate::resource::ResourceCore;
use crate::traits::{HasOwner, Resource, Writable};

const RECIPIENTS: &str = "recipients";

/// An announcement posted to a newsflash.
#[derive(Debug, Clone)]
pub struct NewsflashEvent {
    core: ResourceCore,
}

impl Resource for NewsflashEvent {
    const KIND: &'static str = "newsflash event";
    const ATTRIBUTES: &'static [&'static str] = &[
        "href",
        "links",
        "title",
        "message",
        "owner",
        "recipients",
        "image_url",
        "video_url",
        "start_time",
        "end_time",
    ];

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

impl Writable for NewsflashEvent {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.newsflash-event";
}

impl HasOwner for NewsflashEvent {}

impl NewsflashEvent {
    pub fn title(&self) -> Option<&str> {
        self.attribute_str("title")
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set("title", title.into());
    }

    pub fn message(&self) -> Option<&str> {
        self.attribute_str("message")
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.set("message", message.into());
    }

    pub fn set_start_time(&mut self, at: DateTime<Utc>) {
        self.set("start_time", at.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    pub fn set_end_time(&mut self, at: DateTime<Utc>) {
        self.set("end_time", at.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    /// Address the event to `users`, encoded as `{"kind": "user", "href"}`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any user has no `href`.
    pub fn set_recipients<'a, I>(&mut self, users: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a User>,
    {
        let recipients = users
            .into_iter()
            .map(|user| OwnerRef::try_from(user).map(|r| r.to_value()))
            .collect::<Result<Vec<_>>>()?;
        self.set(RECIPIENTS, Value::Array(recipients));
        Ok(())
    }

    /// Decode the recipient list.
    pub fn recipients(&self) -> Result<Vec<OwnerRef>> {
        match self.attributes().get(RECIPIENTS) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(entries)) => entries.iter().map(OwnerRef::from_value).collect(),
            Some(other) => Err(HooplaError::MalformedReference(format!(
                "recipients must be an array, got {other}"
            ))),
        }
    }
}

//! Metric value model.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::resource::ResourceCore;
use crate::traits::{HasOwner, Resource, Writable};

/// Local field naming the metric a value belongs to, for display.
pub const METRIC_NAME: &str = "metric_name";

/// One owner's value for a metric.
///
/// The `owner` attribute holds a tagged reference; see [`HasOwner`].
#[derive(Debug, Clone)]
pub struct MetricValue {
    core: ResourceCore,
}

impl Resource for MetricValue {
    const KIND: &'static str = "metric value";
    const ATTRIBUTES: &'static [&'static str] =
        &["href", "links", "metric", "owner", "value", "updated_at"];

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

impl Writable for MetricValue {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.metric-value";
}

impl HasOwner for MetricValue {}

impl MetricValue {
    pub fn value(&self) -> Option<f64> {
        self.attributes().get("value").and_then(Value::as_f64)
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.set("value", value);
    }

    /// Name of the metric this value was obtained through, if known.
    pub fn metric_name(&self) -> Option<&str> {
        self.local().get(METRIC_NAME).and_then(Value::as_str)
    }

    /// Last update time reported by the server.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.attribute_str("updated_at")?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

//! Metric model.

use serde_json::Value;

use crate::error::Result;
use crate::models::{MetricValue, METRIC_NAME};
use crate::owner::OwnerRef;
use crate::resource::{LocalAttrs, ResourceCore};
use crate::traits::{Related, Resource, Writable};

const LIST_METRIC_VALUES: &str = "list_metric_values";
const CREATE_METRIC_VALUE: &str = "create_metric_value";

/// A metric that owners report values against.
#[derive(Debug, Clone)]
pub struct Metric {
    core: ResourceCore,
}

impl Resource for Metric {
    const KIND: &'static str = "metric";
    const ATTRIBUTES: &'static [&'static str] = &["href", "links", "name", "type"];

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

impl Writable for Metric {
    const MEDIA_TYPE: &'static str = "application/vnd.hoopla.metric";
}

impl Metric {
    pub fn name(&self) -> Option<&str> {
        self.attribute_str("name")
    }

    /// Metric type as reported by the server (e.g. "number", "currency").
    pub fn metric_type(&self) -> Option<&str> {
        self.attribute_str("type")
    }

    /// All values recorded for this metric.
    pub async fn values(&self) -> Result<Vec<MetricValue>> {
        self.fetch_related::<MetricValue>(LIST_METRIC_VALUES, &[], self.value_hints())
            .await
    }

    /// Values recorded for one owner.
    pub async fn values_by_owner(&self, owner: &OwnerRef) -> Result<Vec<MetricValue>> {
        let href = owner.href();
        self.fetch_related::<MetricValue>(
            LIST_METRIC_VALUES,
            &[("owner", href.as_str())],
            self.value_hints(),
        )
        .await
    }

    /// New, unsaved value for this metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric has no `create_metric_value` link.
    pub fn new_value(&self) -> Result<MetricValue> {
        let url = self.relation(CREATE_METRIC_VALUE)?;
        let mut value = MetricValue::with_creation_url(self.session().clone(), url);
        for (name, hint) in self.value_hints() {
            value.set(&name, hint);
        }
        Ok(value)
    }

    /// Local fields handed to every value this metric produces.
    fn value_hints(&self) -> LocalAttrs {
        let mut local = LocalAttrs::new();
        if let Some(name) = self.name() {
            local.insert(METRIC_NAME.to_string(), Value::String(name.to_string()));
        }
        local
    }
}

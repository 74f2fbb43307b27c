//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{HasOwner, MetricValue, NewsflashEvent, OwnerRef, Resource};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Short label for an owner reference.
pub fn owner_label(owner: &OwnerRef) -> String {
    match owner {
        OwnerRef::User(href) => format!("user {href}"),
        OwnerRef::Team(href) => format!("team {href}"),
        OwnerRef::Generic(token) => format!("{token} <generic>"),
    }
}

impl PrettyPrint for MetricValue {
    fn pretty_print(&self) -> String {
        let header = match self.metric_name() {
            Some(name) => format!("Metric Value: {name}"),
            None => "Metric Value".to_string(),
        };
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(href) = self.href() {
            lines.push(format!("Href:           {}", href));
        }

        match self.value() {
            Some(value) => lines.push(format!("Value:          {}", value)),
            None => lines.push("Value:          (unset)".to_string()),
        }

        match self.owner_ref() {
            Ok(Some(owner)) => lines.push(format!("Owner:          {}", owner_label(&owner))),
            Ok(None) => {}
            Err(e) => lines.push(format!("Owner:          <{}>", e)),
        }

        if let Some(updated) = self.updated_at() {
            lines.push(format!("Updated:        {}", updated.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for NewsflashEvent {
    fn pretty_print(&self) -> String {
        let header = format!("Event: {}", self.title().unwrap_or("(untitled)"));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(href) = self.href() {
            lines.push(format!("Href:           {}", href));
        }

        if let Some(message) = self.message() {
            lines.push(format!("Message:        {}", message));
        }

        if let Ok(Some(owner)) = self.owner_ref() {
            lines.push(format!("Owner:          {}", owner_label(&owner)));
        }

        if let Ok(recipients) = self.recipients() {
            if !recipients.is_empty() {
                lines.push(format!("Recipients:     {}", recipients.len()));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSession;
    use crate::Metric;
    use serde_json::json;

    #[test]
    fn test_metric_value_pretty_print_format() {
        let metric = Metric::from_payload(
            FakeSession::shared(),
            json!({
                "href": "https://api.example/metrics/7",
                "name": "Deals Closed",
                "links": [{"rel": "create_metric_value", "href": "https://api.example/metrics/7/values"}]
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        let mut value = metric.new_value().unwrap();
        value.set_value(3.5);
        value.set_owner("widgets");

        let output = value.pretty_print();
        assert!(output.starts_with("Metric Value: Deals Closed"));
        assert!(output.contains("Value:          3.5"));
        assert!(output.contains("widgets <generic>"));
    }

    #[test]
    fn test_event_pretty_print_format() {
        let mut event = NewsflashEvent::with_creation_url(
            FakeSession::shared(),
            "https://api.example/newsflashes/1/events",
        );
        event.set_title("New record");

        let output = event.pretty_print();
        assert!(output.starts_with("Event: New record"));
    }
}

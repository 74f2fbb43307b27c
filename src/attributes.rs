//! Server-known resource fields and the link relations derived from them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Name of the field carrying a resource's hyperlinks.
pub const LINKS: &str = "links";

/// Link relation name to target URL.
pub type RelationTable = BTreeMap<String, String>;

/// The fields of a resource exactly as the server knows them.
///
/// Loading a payload that has a `links` array projects every `{rel, href}`
/// entry into the [`RelationTable`]. The `links` field itself stays in the
/// store and is serialized with the rest of the fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    fields: Map<String, Value>,
    relations: RelationTable,
}

impl AttributeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store loaded from `payload`.
    pub fn from_payload(payload: Map<String, Value>) -> Self {
        let mut store = Self::new();
        store.load(payload);
        store
    }

    /// Replace all fields with `payload`.
    ///
    /// The relation table is rebuilt from `payload.links`; later duplicates
    /// win and a payload without links leaves no relations. Link entries
    /// without a string `rel` and `href` are ignored.
    pub fn load(&mut self, payload: Map<String, Value>) {
        self.relations = project_links(payload.get(LINKS));
        self.fields = payload;
    }

    /// Field value, or `None` when the field is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a field, returning its old value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Whether the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Link relation target.
    pub fn relation(&self, rel: &str) -> Option<&str> {
        self.relations.get(rel).map(String::as_str)
    }

    /// All known link relations.
    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    /// All current fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// JSON object containing exactly the current fields.
    pub fn serialize(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Relation table for a `links` value.
fn project_links(links: Option<&Value>) -> RelationTable {
    let Some(Value::Array(links)) = links else {
        return RelationTable::new();
    };
    links
        .iter()
        .filter_map(|link| {
            let rel = link.get("rel")?.as_str()?;
            let href = link.get("href")?.as_str()?;
            Some((rel.to_string(), href.to_string()))
        })
        .collect()
}

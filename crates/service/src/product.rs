use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client-supplied fields for create and update; never carries an `id`
/// once it reaches the collection.
pub type Patch = Map<String, Value>;

/// A stored product: a store-assigned `id` plus whatever fields the
/// client sent. Field order is preserved through load and save.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Build a product from client fields, dropping any `id` they carry.
    pub fn new(id: i64, mut fields: Patch) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// The `description` field, if present and a string.
    pub fn description(&self) -> Option<&str> {
        self.fields.get("description").and_then(Value::as_str)
    }

    /// Shallow merge: patch fields overwrite existing ones, `id` is kept.
    pub fn merge(&mut self, patch: Patch) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

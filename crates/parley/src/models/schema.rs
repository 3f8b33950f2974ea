//! Schemas constraining structured model output.
//!
//! A schema may be written as a JSON value or derived from a typed Rust
//! description; both end up as the same canonical string-keyed document,
//! which is what providers inspect and send.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON schema document in canonical string-keyed form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    pub fn from_value(value: Value) -> Self {
        Schema(value)
    }

    /// Build a schema from a typed description whose field names are the keys
    pub fn from_serialize<T: Serialize>(schema: &T) -> serde_json::Result<Self> {
        serde_json::to_value(schema).map(Schema)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Schema::from_value(value)
    }
}

//! Wire payload: field name to JSON value, bound to an entity kind.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{GeneratorError, Result};
use crate::schema::{self, EntityKind, Violation};

/// A generated record as the API receives it.
///
/// Unlike the typed records, a payload can hold values that break the
/// schema. Invalid-mode generation relies on that.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    kind: EntityKind,
    fields: Map<String, Value>,
}

impl Payload {
    /// Wrap a JSON object.
    pub fn from_value(kind: EntityKind, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { kind, fields }),
            other => Err(GeneratorError::Encoding(serde::de::Error::custom(format!(
                "{} payload must be a JSON object, got {}",
                kind, other
            )))),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of a field, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Override a schema field.
    ///
    /// Used to chain identifiers between steps, e.g. an account created for
    /// the customer from the previous request.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let spec = self.kind.require_field(field)?;
        self.fields.insert(spec.name.to_string(), value.into());
        Ok(())
    }

    /// Builder form of [`Payload::set`].
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Schema violations of this payload, relative to today.
    pub fn violations(&self) -> Vec<Violation> {
        schema::validate(self.kind, &self.fields)
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Pretty-printed JSON body.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    pub(crate) fn insert_raw(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

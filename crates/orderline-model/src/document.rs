//! Order documents and the wrapper handed to downstream record creation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result, json_type_name};
use crate::keys::NEW_PRODUCT_LINES;
use crate::product_line::ProductLine;

/// A loosely structured order record from the upstream export.
///
/// Only a handful of keys are interpreted; every other field is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDocument(Map<String, Value>);

impl OrderDocument {
    /// Convert a JSON value into a document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotAnObject`] if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// Lines currently held in `newProductLines`, if it is a sequence.
    pub fn product_lines(&self) -> Option<&Vec<Value>> {
        self.0.get(NEW_PRODUCT_LINES).and_then(Value::as_array)
    }

    /// Append a product line to `newProductLines`.
    ///
    /// The sequence is created when the key is absent or null. Existing
    /// entries are never removed or reordered.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ProductLinesNotSequence`] if `newProductLines`
    /// holds a non-sequence value.
    pub fn push_product_line(&mut self, line: &ProductLine) -> Result<()> {
        let value = serde_json::to_value(line)?;
        let slot = self
            .0
            .entry(NEW_PRODUCT_LINES)
            .or_insert_with(|| Value::Array(Vec::new()));
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(lines) => {
                lines.push(value);
                Ok(())
            }
            other => Err(ModelError::ProductLinesNotSequence {
                found: json_type_name(other),
            }),
        }
    }
}

impl From<Map<String, Value>> for OrderDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<OrderDocument> for Value {
    fn from(document: OrderDocument) -> Self {
        Value::Object(document.0)
    }
}

/// Result wrapper for one processed order, serialized as `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub data: Value,
}

impl ProcessedDocument {
    /// Wrap a batch element that could not be read as an order document.
    pub fn passthrough(value: Value) -> Self {
        Self { data: value }
    }

    /// The wrapped order, if the element was a JSON object.
    pub fn document(&self) -> Option<&Map<String, Value>> {
        self.data.as_object()
    }

    /// Lines held in the wrapped order's `newProductLines`.
    pub fn product_lines(&self) -> &[Value] {
        self.data
            .get(NEW_PRODUCT_LINES)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl From<OrderDocument> for ProcessedDocument {
    fn from(document: OrderDocument) -> Self {
        Self {
            data: document.into(),
        }
    }
}

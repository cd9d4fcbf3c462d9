//! Single-or-sequence shape normalization.
//!
//! The upstream export encodes a group with one entry as a bare object and a
//! group with several entries as an array. [`ensure_sequence`] rewrites such a
//! field in place so downstream stages only ever see a sequence.

use orderline_model::error::json_type_name;
use serde_json::{Map, Value};

use crate::error::ShapeFault;

/// What [`ensure_sequence`] did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOutcome {
    /// Container key absent or null; nothing to do.
    ContainerAbsent,
    /// Field already held a sequence and was left untouched.
    AlreadySequence,
    /// Field held a single record and was wrapped in a one-element sequence.
    Wrapped,
}

/// Rewrite `map[container][field]` so it is always a sequence.
///
/// # Errors
///
/// Returns a [`ShapeFault`] when the container is not an object or the inner
/// field is missing or null. The map is left unchanged in that case.
pub fn ensure_sequence(
    map: &mut Map<String, Value>,
    container: &str,
    field: &str,
) -> Result<ShapeOutcome, ShapeFault> {
    let group = match map.get_mut(container) {
        None | Some(Value::Null) => return Ok(ShapeOutcome::ContainerAbsent),
        Some(Value::Object(group)) => group,
        Some(other) => {
            return Err(ShapeFault::ContainerNotObject {
                container: container.to_string(),
                found: json_type_name(other),
            });
        }
    };

    match group.get_mut(field) {
        None | Some(Value::Null) => Err(ShapeFault::MissingField {
            container: container.to_string(),
            field: field.to_string(),
        }),
        Some(slot) => Ok(ensure_sequence_value(slot)),
    }
}

/// Wrap a bare value in a one-element sequence; sequences are left as-is.
pub fn ensure_sequence_value(slot: &mut Value) -> ShapeOutcome {
    if slot.is_array() {
        return ShapeOutcome::AlreadySequence;
    }
    let single = slot.take();
    *slot = Value::Array(vec![single]);
    ShapeOutcome::Wrapped
}

/// Borrow `map[container][field]` as a slice, if it is a sequence.
pub fn sequence_at<'a>(
    map: &'a Map<String, Value>,
    container: &str,
    field: &str,
) -> Option<&'a [Value]> {
    map.get(container)?
        .get(field)?
        .as_array()
        .map(Vec::as_slice)
}

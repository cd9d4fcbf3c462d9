use thiserror::Error;

/// Errors raised by order document accessors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A batch element or wrapper value was not a JSON object.
    #[error("order document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// `newProductLines` exists but holds something other than a sequence.
    #[error("newProductLines is {found}, expected a sequence")]
    ProductLinesNotSequence { found: &'static str },

    #[error("failed to serialize product line: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Short JSON type name used in error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "an object",
    }
}

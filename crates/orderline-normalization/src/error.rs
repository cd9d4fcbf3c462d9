//! Fault types for order normalization.
//!
//! None of these escape the batch entry points: each fault is caught at the
//! narrowest scope, recorded as a [`SkipEvent`](crate::SkipEvent), and logged.

use orderline_model::ModelError;
use thiserror::Error;

/// Faults raised while probing a single-or-sequence field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeFault {
    /// Container present but not an object.
    #[error("container '{container}' is {found}, expected an object")]
    ContainerNotObject {
        container: String,
        found: &'static str,
    },

    /// Container present but the inner field is missing or null.
    #[error("container '{container}' has no '{field}' field")]
    MissingField { container: String, field: String },
}

/// Faults raised while deriving from a single line item or payment entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryFault {
    /// Entry is not a record.
    #[error("entry is {found}, expected an object")]
    NotAnObject { found: &'static str },

    /// Required field is absent.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// Required field could not be coerced to a number.
    #[error("field '{field}' is not numeric")]
    InvalidNumber { field: &'static str, value: String },

    /// Tax rate is NaN or infinite and the policy rejects such entries.
    #[error("tax rate is not finite")]
    NonFiniteTax,

    /// The synthesized line could not be appended to the document.
    #[error("cannot append product line: {message}")]
    Append { message: String },
}

impl EntryFault {
    /// Offending raw value, when the fault carries one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidNumber { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl From<ModelError> for EntryFault {
    fn from(err: ModelError) -> Self {
        Self::Append {
            message: err.to_string(),
        }
    }
}

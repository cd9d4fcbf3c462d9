//! Field-level normalization helpers.
//!
//! - **shape**: single-or-sequence coercion of XML-derived fields
//! - **numeric**: loose numeric coercion of JSON values

pub mod numeric;
pub mod shape;

pub use numeric::{coerce_number, coerce_tax, is_truthy, parse_numeric};
pub use shape::{ShapeOutcome, ensure_sequence, ensure_sequence_value, sequence_at};

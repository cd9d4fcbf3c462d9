//! Order normalization crate.
//!
//! Converts loosely structured order documents into a uniform list of product
//! lines for downstream record creation.
//!
//! # Overview
//!
//! Each document goes through three stages, in this order:
//! - **Shape normalization**: single-or-sequence fields become sequences
//! - **Line item synthesis**: one gift certificate product line per embedded
//!   certificate line item, with derived tax metadata
//! - **Payment reconciliation**: detection of gift-certificate-funded payments
//!
//! # Example
//!
//! ```
//! use orderline_model::OrderDocument;
//! use orderline_normalization::{SynthesisContext, process_documents};
//! use serde_json::json;
//!
//! let document = OrderDocument::from_value(json!({
//!     "giftcertificate-lineitems": {
//!         "giftcertificate-lineitem": {"tax": "0", "base-price": "25.00"}
//!     },
//!     "newProductLines": []
//! }))
//! .unwrap();
//!
//! let results = process_documents(vec![document], &SynthesisContext::default());
//! assert_eq!(results[0].product_lines().len(), 1);
//! ```
//!
//! # Design Principles
//!
//! - **Log and continue**: a malformed group or entry is skipped and reported,
//!   never raised to the caller
//! - **Append only**: existing `newProductLines` entries are never touched
//! - **Independent documents**: no state is shared between documents

mod error;
mod executor;
mod payments;
mod synthesis;
mod types;

pub mod normalization;

// Core types
pub use types::{
    DocumentOutcome, DocumentReport, GiftPaymentPolicy, NonFiniteTaxPolicy, REDACTED_VALUE,
    SkipEvent, Stage, SynthesisContext,
};

// Fault types
pub use error::{EntryFault, ShapeFault};

// Stages
pub use payments::{PaymentDisposition, classify_payment, reconcile_payments};
pub use synthesis::{derive_line, resolve_tax_code, synthesize_lines};

// Orchestration
pub use executor::{
    batch_from_value, normalize_order, process_document, process_documents,
    process_documents_with_reports, process_values, process_values_parallel,
};

//! Data model for order product line derivation.
//!
//! This crate provides the types shared by the normalization core and the CLI:
//!
//! - **document**: `OrderDocument` (loosely structured upstream order) and the
//!   `ProcessedDocument` wrapper handed to downstream record creation
//! - **product_line**: the uniform `ProductLine` record appended to `newProductLines`
//! - **catalog**: fixed catalog references and the reconfigurable `CatalogConfig`
//! - **keys**: wire keys of the upstream order schema

pub mod catalog;
pub mod document;
pub mod error;
pub mod keys;
pub mod product_line;

pub use catalog::{
    CatalogConfig, GIFT_CARD_NETSUITE_ID, GIFT_CARD_SKU, GIFT_PAYMENT_OFFSET_NETSUITE_ID,
    LINE_TYPE_ITEM, NON_TAXABLE_TAX_CODE,
};
pub use document::{OrderDocument, ProcessedDocument};
pub use error::{ModelError, Result};
pub use product_line::ProductLine;

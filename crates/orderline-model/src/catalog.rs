//! Catalog references used when synthesizing product lines.
//!
//! These identify pre-existing items in the downstream record system. They are
//! configuration, not derived data: each catalog deployment can override them
//! through [`CatalogConfig`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// `line-type` of every synthesized product line.
pub const LINE_TYPE_ITEM: &str = "item";

/// SKU label of the gift certificate catalog item.
pub const GIFT_CARD_SKU: &str = "Gift Card - Test";

/// Catalog reference of the gift certificate item.
pub const GIFT_CARD_NETSUITE_ID: &str = "2282";

/// Catalog reference used for offsetting gift certificate payments.
pub const GIFT_PAYMENT_OFFSET_NETSUITE_ID: &str = "18973";

/// Tax code reference meaning "non-taxable".
pub const NON_TAXABLE_TAX_CODE: i64 = -7;

/// Catalog references applied to synthesized product lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// SKU label written to every synthesized line.
    pub sku: String,

    /// Catalog reference of the gift certificate item.
    pub netsuite_id: String,

    /// Tax code reference for zero-rated lines.
    pub non_taxable_tax_code: i64,

    /// Catalog reference for offsetting gift certificate payments.
    pub offset_netsuite_id: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sku: GIFT_CARD_SKU.to_string(),
            netsuite_id: GIFT_CARD_NETSUITE_ID.to_string(),
            non_taxable_tax_code: NON_TAXABLE_TAX_CODE,
            offset_netsuite_id: GIFT_PAYMENT_OFFSET_NETSUITE_ID.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Override the SKU label.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Override the gift certificate catalog reference.
    #[must_use]
    pub fn with_netsuite_id(mut self, netsuite_id: impl Into<String>) -> Self {
        self.netsuite_id = netsuite_id.into();
        self
    }

    /// Override the non-taxable tax code reference.
    #[must_use]
    pub fn with_non_taxable_tax_code(mut self, code: i64) -> Self {
        self.non_taxable_tax_code = code;
        self
    }

    /// Override the offsetting payment catalog reference.
    #[must_use]
    pub fn with_offset_netsuite_id(mut self, netsuite_id: impl Into<String>) -> Self {
        self.offset_netsuite_id = netsuite_id.into();
        self
    }
}

impl fmt::Display for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sku={:?} netsuiteId={} tax-code={} offset netsuiteId={}",
            self.sku, self.netsuite_id, self.non_taxable_tax_code, self.offset_netsuite_id
        )
    }
}

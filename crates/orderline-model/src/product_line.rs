//! Synthesized product line record.

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::{CatalogConfig, LINE_TYPE_ITEM};

/// A uniform product line appended to an order's `newProductLines`.
///
/// Field names follow the downstream record-creation format, so the serde
/// names differ from the Rust names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Always `"item"` for synthesized lines.
    #[serde(rename = "line-type")]
    pub line_type: String,

    pub sku: String,

    /// Opaque catalog reference in the downstream system.
    #[serde(rename = "netsuiteId")]
    pub netsuite_id: String,

    #[serde(rename = "base-price", serialize_with = "serialize_amount")]
    pub base_price: f64,

    /// Tax rate in percentage points (5.0 = 5%).
    #[serde(rename = "tax-rate", serialize_with = "serialize_amount")]
    pub tax_rate: f64,

    pub quantity: u32,

    pub description: String,

    /// Tax code override; `None` lets the downstream default apply.
    #[serde(rename = "tax-code")]
    pub tax_code: Option<i64>,

    /// Effective tax rate, only set on offsetting payment lines.
    #[serde(
        rename = "actual-tax-rate",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_amount"
    )]
    pub actual_tax_rate: Option<f64>,
}

impl ProductLine {
    /// Build a gift certificate item line from the catalog configuration.
    pub fn gift_certificate(
        catalog: &CatalogConfig,
        base_price: f64,
        tax_rate: f64,
        tax_code: Option<i64>,
    ) -> Self {
        Self {
            line_type: LINE_TYPE_ITEM.to_string(),
            sku: catalog.sku.clone(),
            netsuite_id: catalog.netsuite_id.clone(),
            base_price,
            tax_rate,
            quantity: 1,
            description: String::new(),
            tax_code,
            actual_tax_rate: None,
        }
    }

    /// Build the negative line that offsets a gift-certificate-funded payment.
    pub fn gift_payment_offset(catalog: &CatalogConfig, amount: f64) -> Self {
        Self {
            line_type: LINE_TYPE_ITEM.to_string(),
            sku: catalog.sku.clone(),
            netsuite_id: catalog.offset_netsuite_id.clone(),
            base_price: -amount,
            tax_rate: 0.0,
            quantity: 1,
            description: String::new(),
            tax_code: Some(catalog.non_taxable_tax_code),
            actual_tax_rate: Some(0.0),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exactly an `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write integral amounts as JSON integers (`25`, not `25.0`).
///
/// Fractional amounts stay floats; NaN and infinities become `null`.
fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        let integral = *value as i64;
        serializer.serialize_i64(integral)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_amount<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(amount) => serialize_amount(amount, serializer),
        None => serializer.serialize_none(),
    }
}

//! Line-Item Synthesizer.
//!
//! Derives one gift certificate [`ProductLine`] per embedded certificate line
//! item. Each item is folded into a success or a skip; a malformed item never
//! stops its siblings from being processed.

use orderline_model::error::json_type_name;
use orderline_model::keys::{
    BASE_PRICE, GIFT_CERTIFICATE_LINEITEM, GIFT_CERTIFICATE_LINEITEMS, TAX,
};
use orderline_model::{OrderDocument, ProductLine};
use serde_json::{Map, Value};

use crate::error::EntryFault;
use crate::normalization::{coerce_number, coerce_tax, sequence_at};
use crate::types::{DocumentReport, NonFiniteTaxPolicy, Stage, SynthesisContext};

/// Append one product line per certificate line item to `newProductLines`.
///
/// Expects the certificate group to have been shape-normalized already.
/// Returns the number of lines appended.
pub fn synthesize_lines(
    document: &mut OrderDocument,
    context: &SynthesisContext,
    report: &mut DocumentReport,
) -> usize {
    let Some(items) = sequence_at(
        document.as_map(),
        GIFT_CERTIFICATE_LINEITEMS,
        GIFT_CERTIFICATE_LINEITEM,
    ) else {
        tracing::trace!("No certificate line items to synthesize");
        return 0;
    };

    let derived: Vec<(usize, Result<ProductLine, EntryFault>)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (index, derive_line(item, context)))
        .collect();

    let mut appended = 0;
    for (index, derived) in derived {
        let outcome = derived.and_then(|line| {
            document.push_product_line(&line)?;
            Ok(line)
        });
        match outcome {
            Ok(line) => {
                tracing::debug!(
                    item = index,
                    tax_rate = line.tax_rate,
                    tax_code = ?line.tax_code,
                    "Appended certificate product line"
                );
                appended += 1;
            }
            Err(fault) => {
                tracing::warn!(
                    item = index,
                    value = fault.value().map(|value| context.redact(value)),
                    "Skipping certificate line item: {fault}"
                );
                report.skip(Stage::LineItem, Some(index), fault.to_string());
            }
        }
    }

    report.lines_emitted += appended;
    appended
}

/// Derive the product line for one certificate line item.
///
/// # Errors
///
/// Returns an [`EntryFault`] if the item is not a record, its `base-price` is
/// missing or not numeric, or its tax rate is non-finite under
/// [`NonFiniteTaxPolicy::Reject`].
pub fn derive_line(item: &Value, context: &SynthesisContext) -> Result<ProductLine, EntryFault> {
    let record = item.as_object().ok_or(EntryFault::NotAnObject {
        found: json_type_name(item),
    })?;

    // Blank tax is untaxed; missing or unreadable tax falls through to the
    // non-finite policy.
    let tax = record.get(TAX).and_then(coerce_tax).unwrap_or(f64::NAN);
    let tax_rate = tax * 100.0;
    let base_price = required_number(record, BASE_PRICE)?;
    let tax_code = resolve_tax_code(tax_rate, context)?;

    Ok(ProductLine::gift_certificate(
        &context.catalog,
        base_price,
        tax_rate,
        tax_code,
    ))
}

/// Pick the tax code override for a tax rate in percentage points.
///
/// # Errors
///
/// Returns [`EntryFault::NonFiniteTax`] for a NaN or infinite rate when the
/// context rejects such items.
pub fn resolve_tax_code(
    tax_rate: f64,
    context: &SynthesisContext,
) -> Result<Option<i64>, EntryFault> {
    let sentinel = context.catalog.non_taxable_tax_code;
    if tax_rate == 0.0 {
        return Ok(Some(sentinel));
    }
    if tax_rate.is_finite() {
        return Ok(None);
    }
    match context.non_finite_tax {
        NonFiniteTaxPolicy::NoOverride => Ok(None),
        NonFiniteTaxPolicy::NonTaxable => Ok(Some(sentinel)),
        NonFiniteTaxPolicy::Reject => Err(EntryFault::NonFiniteTax),
    }
}

/// Read a field that must be present and numeric.
pub(crate) fn required_number(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, EntryFault> {
    let value = record
        .get(field)
        .ok_or(EntryFault::MissingField { field })?;
    coerce_number(value).ok_or_else(|| EntryFault::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> OrderDocument {
        OrderDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_zero_tax_uses_sentinel() {
        let line = derive_line(&json!({"tax": "0", "base-price": "25.00"}), &SynthesisContext::default())
            .unwrap();
        assert_eq!(line.tax_rate, 0.0);
        assert_eq!(line.tax_code, Some(-7));
        assert_eq!(line.base_price, 25.0);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.description, "");
        assert_eq!(line.line_type, "item");
    }

    #[test]
    fn test_nonzero_tax_has_no_override() {
        let line = derive_line(&json!({"tax": "0.1", "base-price": "50"}), &SynthesisContext::default())
            .unwrap();
        assert_eq!(line.tax_rate, 10.0);
        assert_eq!(line.tax_code, None);
    }

    #[test]
    fn test_missing_base_price_is_fault() {
        let err = derive_line(&json!({"tax": "0"}), &SynthesisContext::default()).unwrap_err();
        assert_eq!(err, EntryFault::MissingField { field: "base-price" });
    }

    #[test]
    fn test_non_numeric_base_price_is_fault() {
        let err = derive_line(
            &json!({"tax": "0", "base-price": "free"}),
            &SynthesisContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EntryFault::InvalidNumber { field: "base-price", .. }));
    }

    #[test]
    fn test_non_record_item_is_fault() {
        let err = derive_line(&json!("gift"), &SynthesisContext::default()).unwrap_err();
        assert_eq!(err, EntryFault::NotAnObject { found: "a string" });
    }

    #[test]
    fn test_non_finite_tax_policies() {
        let item = json!({"tax": "n/a", "base-price": "10"});

        let line = derive_line(&item, &SynthesisContext::default()).unwrap();
        assert!(line.tax_rate.is_nan());
        assert_eq!(line.tax_code, None);

        let context = SynthesisContext::default().with_non_finite_tax(NonFiniteTaxPolicy::NonTaxable);
        let line = derive_line(&item, &context).unwrap();
        assert_eq!(line.tax_code, Some(-7));

        let context = SynthesisContext::default().with_non_finite_tax(NonFiniteTaxPolicy::Reject);
        assert_eq!(derive_line(&item, &context), Err(EntryFault::NonFiniteTax));
    }

    #[test]
    fn test_blank_tax_is_non_taxable() {
        for tax in [json!(""), json!(" "), json!(null)] {
            let line = derive_line(&json!({"tax": tax, "base-price": "6"}), &SynthesisContext::default())
                .unwrap();
            assert_eq!(line.tax_rate, 0.0);
            assert_eq!(line.tax_code, Some(-7));
            assert_eq!(line.base_price, 6.0);
        }
    }

    #[test]
    fn test_missing_tax_follows_non_finite_policy() {
        let context = SynthesisContext::default().with_non_finite_tax(NonFiniteTaxPolicy::Reject);
        let err = derive_line(&json!({"base-price": "10"}), &context).unwrap_err();
        assert_eq!(err, EntryFault::NonFiniteTax);
    }

    #[test]
    fn test_synthesize_skips_bad_items_and_keeps_order() {
        let mut doc = document(json!({
            "giftcertificate-lineitems": {"giftcertificate-lineitem": [
                {"tax": "0", "base-price": "10"},
                {"tax": "0"},
                {"tax": "0.05", "base-price": "30"}
            ]},
            "newProductLines": []
        }));
        let mut report = DocumentReport::new(0);
        let appended = synthesize_lines(&mut doc, &SynthesisContext::default(), &mut report);

        assert_eq!(appended, 2);
        assert_eq!(report.lines_emitted, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, Some(1));
        let lines = doc.product_lines().unwrap();
        assert_eq!(lines[0]["base-price"], json!(10));
        assert_eq!(lines[1]["base-price"], json!(30));
    }

    #[test]
    fn test_synthesize_without_group_is_noop() {
        let mut doc = document(json!({"newProductLines": []}));
        let mut report = DocumentReport::new(0);
        assert_eq!(synthesize_lines(&mut doc, &SynthesisContext::default(), &mut report), 0);
        assert!(report.is_clean());
        assert_eq!(doc.product_lines().map(Vec::len), Some(0));
    }

    #[test]
    fn test_synthesize_reports_unappendable_lines() {
        let mut doc = document(json!({
            "giftcertificate-lineitems": {"giftcertificate-lineitem": [{"tax": "0", "base-price": "1"}]},
            "newProductLines": "broken"
        }));
        let mut report = DocumentReport::new(0);
        assert_eq!(synthesize_lines(&mut doc, &SynthesisContext::default(), &mut report), 0);
        assert_eq!(report.skipped_in(Stage::LineItem), 1);
    }
}

//! Payment Reconciler.
//!
//! Walks the payment entries of an order and classifies each one. Payments
//! funded by a gift certificate are detected; whether they produce an
//! offsetting product line is decided by [`GiftPaymentPolicy`].

use orderline_model::error::json_type_name;
use orderline_model::keys::{AMOUNT, GIFT_CERTIFICATE, PAYMENT, PAYMENTS};
use orderline_model::{OrderDocument, ProductLine};
use serde_json::Value;

use crate::error::EntryFault;
use crate::normalization::{is_truthy, sequence_at};
use crate::synthesis::required_number;
use crate::types::{DocumentReport, GiftPaymentPolicy, Stage, SynthesisContext};

/// Classification of one payment entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDisposition {
    /// Regular payment; nothing to do.
    Plain { amount: f64 },
    /// Gift certificate payment under [`GiftPaymentPolicy::DetectOnly`].
    GiftCertificateDetected { amount: f64 },
    /// Gift certificate payment offset by a negative product line.
    GiftCertificateOffset(ProductLine),
}

/// Reconcile every payment entry of an already shape-normalized document.
///
/// Returns the number of offsetting lines appended.
pub fn reconcile_payments(
    document: &mut OrderDocument,
    context: &SynthesisContext,
    report: &mut DocumentReport,
) -> usize {
    let Some(payments) = sequence_at(document.as_map(), PAYMENTS, PAYMENT) else {
        tracing::trace!("No payments to reconcile");
        return 0;
    };

    let classified: Vec<(usize, Result<PaymentDisposition, EntryFault>)> = payments
        .iter()
        .enumerate()
        .map(|(index, payment)| (index, classify_payment(payment, context)))
        .collect();

    let mut appended = 0;
    for (index, classified) in classified {
        let outcome = classified.and_then(|disposition| {
            if let PaymentDisposition::GiftCertificateOffset(line) = &disposition {
                document.push_product_line(line)?;
            }
            Ok(disposition)
        });
        match outcome {
            Ok(PaymentDisposition::Plain { .. }) => {}
            Ok(PaymentDisposition::GiftCertificateDetected { amount }) => {
                let amount = amount.to_string();
                tracing::debug!(
                    payment = index,
                    amount = context.redact(&amount),
                    "Gift certificate payment detected, no offset emitted"
                );
                report.gift_payments += 1;
            }
            Ok(PaymentDisposition::GiftCertificateOffset(line)) => {
                let base_price = line.base_price.to_string();
                tracing::debug!(
                    payment = index,
                    base_price = context.redact(&base_price),
                    "Appended gift certificate offset line"
                );
                report.gift_payments += 1;
                report.offsets_emitted += 1;
                appended += 1;
            }
            Err(fault) => {
                tracing::warn!(
                    payment = index,
                    value = fault.value().map(|value| context.redact(value)),
                    "Skipping payment entry: {fault}"
                );
                report.skip(Stage::Payment, Some(index), fault.to_string());
            }
        }
    }

    appended
}

/// Classify one payment entry.
///
/// # Errors
///
/// Returns an [`EntryFault`] if the entry is not a record or its `amount` is
/// missing or not numeric.
pub fn classify_payment(
    payment: &Value,
    context: &SynthesisContext,
) -> Result<PaymentDisposition, EntryFault> {
    let record = payment.as_object().ok_or(EntryFault::NotAnObject {
        found: json_type_name(payment),
    })?;
    let amount = required_number(record, AMOUNT)?;

    let gift_funded = record.get(GIFT_CERTIFICATE).is_some_and(is_truthy);
    if !gift_funded {
        return Ok(PaymentDisposition::Plain { amount });
    }

    Ok(match context.gift_payments {
        GiftPaymentPolicy::DetectOnly => PaymentDisposition::GiftCertificateDetected { amount },
        GiftPaymentPolicy::EmitOffset => PaymentDisposition::GiftCertificateOffset(
            ProductLine::gift_payment_offset(&context.catalog, amount),
        ),
    })
}

//! Core types for order normalization.

use std::fmt;

use orderline_model::{CatalogConfig, ProcessedDocument};
use serde::{Deserialize, Serialize};

/// Placeholder logged instead of raw field values when data logging is off.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// What the Payment Reconciler does with gift-certificate-funded payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftPaymentPolicy {
    /// Detect and count gift certificate payments, emit nothing.
    #[default]
    DetectOnly,
    /// Append a negative offsetting line per gift certificate payment.
    EmitOffset,
}

/// How a NaN or infinite `tax-rate` maps to a `tax-code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFiniteTaxPolicy {
    /// Null tax code; the downstream default applies.
    #[default]
    NoOverride,
    /// Treat the line as non-taxable and use the sentinel tax code.
    NonTaxable,
    /// Skip the line item as a per-item fault.
    Reject,
}

impl NonFiniteTaxPolicy {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoOverride => "no-override",
            Self::NonTaxable => "non-taxable",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for NonFiniteTaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for GiftPaymentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetectOnly => write!(f, "detect-only"),
            Self::EmitOffset => write!(f, "emit-offset"),
        }
    }
}

/// Context for one normalization run.
///
/// Holds the catalog references and the policies applied to every document.
/// Shared read-only across documents and worker threads.
#[derive(Debug, Clone, Default)]
pub struct SynthesisContext {
    pub catalog: CatalogConfig,
    pub gift_payments: GiftPaymentPolicy,
    pub non_finite_tax: NonFiniteTaxPolicy,
    /// Whether raw field values may appear in log events.
    pub log_data: bool,
}

impl SynthesisContext {
    pub fn new(catalog: CatalogConfig) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_gift_payments(mut self, policy: GiftPaymentPolicy) -> Self {
        self.gift_payments = policy;
        self
    }

    #[must_use]
    pub fn with_non_finite_tax(mut self, policy: NonFiniteTaxPolicy) -> Self {
        self.non_finite_tax = policy;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Returns the value when data logging is enabled, otherwise a placeholder.
    pub fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.log_data { value } else { REDACTED_VALUE }
    }
}

/// Processing stage that produced a skip event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The batch element itself was not an order document.
    Document,
    /// Single-or-sequence normalization of a group.
    Shape,
    /// Certificate line item synthesis.
    LineItem,
    /// Payment reconciliation.
    Payment,
}

impl Stage {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Shape => "shape",
            Self::LineItem => "line-item",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fault that was caught and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipEvent {
    pub stage: Stage,
    /// Index of the entry within its group, when the fault is per-entry.
    pub index: Option<usize>,
    pub reason: String,
}

/// Counters and skip events for one processed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Position of the document in the batch.
    pub index: usize,
    pub lines_emitted: usize,
    pub gift_payments: usize,
    pub offsets_emitted: usize,
    pub skipped: Vec<SkipEvent>,
}

impl DocumentReport {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn skip(&mut self, stage: Stage, index: Option<usize>, reason: impl Into<String>) {
        self.skipped.push(SkipEvent {
            stage,
            index,
            reason: reason.into(),
        });
    }

    /// Number of skip events raised by one stage.
    pub fn skipped_in(&self, stage: Stage) -> usize {
        self.skipped.iter().filter(|event| event.stage == stage).count()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A processed document together with its report.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub result: ProcessedDocument,
    pub report: DocumentReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let context = SynthesisContext::default();
        assert_eq!(context.gift_payments, GiftPaymentPolicy::DetectOnly);
        assert_eq!(context.non_finite_tax, NonFiniteTaxPolicy::NoOverride);
        assert_eq!(context.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_redact() {
        let context = SynthesisContext::default();
        assert_eq!(context.redact("42.00"), REDACTED_VALUE);
        let context = context.with_log_data(true);
        assert_eq!(context.redact("42.00"), "42.00");
    }

    #[test]
    fn test_report_counts_by_stage() {
        let mut report = DocumentReport::new(3);
        assert!(report.is_clean());
        report.skip(Stage::LineItem, Some(1), "missing required field 'base-price'");
        report.skip(Stage::Payment, Some(0), "missing required field 'amount'");
        report.skip(Stage::LineItem, Some(4), "entry is null, expected an object");
        assert_eq!(report.skipped_in(Stage::LineItem), 2);
        assert_eq!(report.skipped_in(Stage::Shape), 0);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_policy_labels() {
        assert_eq!(NonFiniteTaxPolicy::NonTaxable.to_string(), "non-taxable");
        assert_eq!(GiftPaymentPolicy::EmitOffset.to_string(), "emit-offset");
        assert_eq!(Stage::LineItem.to_string(), "line-item");
    }
}

use std::path::PathBuf;

use orderline_normalization::{DocumentReport, GiftPaymentPolicy, NonFiniteTaxPolicy, Stage};

#[derive(Debug)]
pub struct BatchResult {
    /// Input path as given ("-" for stdin).
    pub source: String,
    /// Output file, or None when written to stdout.
    pub output: Option<PathBuf>,
    pub gift_payments: GiftPaymentPolicy,
    pub non_finite_tax: NonFiniteTaxPolicy,
    pub reports: Vec<DocumentReport>,
}

impl BatchResult {
    pub fn document_count(&self) -> usize {
        self.reports.len()
    }

    pub fn lines_emitted(&self) -> usize {
        self.reports.iter().map(|report| report.lines_emitted).sum()
    }

    pub fn gift_payments_detected(&self) -> usize {
        self.reports.iter().map(|report| report.gift_payments).sum()
    }

    pub fn offsets_emitted(&self) -> usize {
        self.reports.iter().map(|report| report.offsets_emitted).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.reports.iter().map(|report| report.skipped.len()).sum()
    }

    /// Skip events of one stage across the batch.
    pub fn skipped_in(&self, stage: Stage) -> usize {
        self.reports.iter().map(|report| report.skipped_in(stage)).sum()
    }
}

//! Per-document and batch orchestration.
//!
//! Stage order within a document is fixed: shape normalization, then line
//! item synthesis, then payment reconciliation. Documents are independent of
//! each other, so a batch can be split across worker threads.

use std::num::NonZeroUsize;
use std::thread;

use orderline_model::error::json_type_name;
use orderline_model::keys::{
    GIFT_CERTIFICATE_LINEITEM, GIFT_CERTIFICATE_LINEITEMS, PAYMENT, PAYMENTS,
};
use orderline_model::{ModelError, OrderDocument, ProcessedDocument};
use serde_json::Value;

use crate::normalization::{ShapeOutcome, ensure_sequence, ensure_sequence_value};
use crate::payments::reconcile_payments;
use crate::synthesis::synthesize_lines;
use crate::types::{DocumentOutcome, DocumentReport, Stage, SynthesisContext};

/// Groups whose single-or-sequence field is normalized on every document.
const SEQUENCE_GROUPS: [(&str, &str); 2] = [
    (GIFT_CERTIFICATE_LINEITEMS, GIFT_CERTIFICATE_LINEITEM),
    (PAYMENTS, PAYMENT),
];

/// Normalize one order document in place.
///
/// Appends synthesized lines to `newProductLines` and returns the report.
/// Never fails: every fault is recorded in the report and logged.
pub fn normalize_order(
    document: &mut OrderDocument,
    context: &SynthesisContext,
    index: usize,
) -> DocumentReport {
    let mut report = DocumentReport::new(index);

    for (container, field) in SEQUENCE_GROUPS {
        match ensure_sequence(document.as_map_mut(), container, field) {
            Ok(ShapeOutcome::Wrapped) => {
                tracing::trace!(container, "Wrapped single record in a sequence");
            }
            Ok(_) => {}
            Err(fault) => {
                tracing::debug!(container, "Shape normalization skipped: {fault}");
                report.skip(Stage::Shape, None, fault.to_string());
            }
        }
    }

    synthesize_lines(document, context, &mut report);
    reconcile_payments(document, context, &mut report);
    report
}

/// Normalize one document and wrap it for downstream record creation.
pub fn process_document(
    mut document: OrderDocument,
    context: &SynthesisContext,
    index: usize,
) -> DocumentOutcome {
    let span = tracing::debug_span!("document", index);
    let _guard = span.enter();
    let report = normalize_order(&mut document, context, index);
    DocumentOutcome {
        result: ProcessedDocument::from(document),
        report,
    }
}

/// Process a batch of documents, one result per input in the same order.
pub fn process_documents(
    documents: Vec<OrderDocument>,
    context: &SynthesisContext,
) -> Vec<ProcessedDocument> {
    process_documents_with_reports(documents, context)
        .into_iter()
        .map(|outcome| outcome.result)
        .collect()
}

/// Like [`process_documents`], keeping the per-document reports.
pub fn process_documents_with_reports(
    documents: Vec<OrderDocument>,
    context: &SynthesisContext,
) -> Vec<DocumentOutcome> {
    let outcomes: Vec<DocumentOutcome> = documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| process_document(document, context, index))
        .collect();
    log_batch(&outcomes);
    outcomes
}

/// Split a raw batch into its elements.
///
/// Accepts a sequence of documents or a single bare document; null is an
/// empty batch.
pub fn batch_from_value(mut batch: Value) -> Vec<Value> {
    if batch.is_null() {
        return Vec::new();
    }
    ensure_sequence_value(&mut batch);
    match batch {
        Value::Array(elements) => elements,
        _ => Vec::new(),
    }
}

/// Process raw batch elements sequentially.
///
/// Elements that are not JSON objects are passed through untouched with a
/// document-level skip event, so the output always has one entry per input.
pub fn process_values(values: Vec<Value>, context: &SynthesisContext) -> Vec<DocumentOutcome> {
    let outcomes: Vec<DocumentOutcome> = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| process_value(value, context, index))
        .collect();
    log_batch(&outcomes);
    outcomes
}

/// Process raw batch elements on scoped worker threads.
///
/// The batch is split into contiguous chunks, one per available core, and
/// the results are concatenated back in input order.
pub fn process_values_parallel(
    values: Vec<Value>,
    context: &SynthesisContext,
) -> Vec<DocumentOutcome> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    if workers <= 1 || values.len() < 2 {
        return process_values(values, context);
    }

    let chunk_size = values.len().div_ceil(workers);
    let mut chunks: Vec<Vec<(usize, Value)>> = Vec::with_capacity(workers);
    for (index, value) in values.into_iter().enumerate() {
        if index % chunk_size == 0 {
            chunks.push(Vec::with_capacity(chunk_size));
        }
        if let Some(chunk) = chunks.last_mut() {
            chunk.push((index, value));
        }
    }
    tracing::debug!(
        workers = chunks.len(),
        chunk_size,
        "Processing batch in parallel"
    );

    let outcomes: Vec<DocumentOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .into_iter()
                        .map(|(index, value)| process_value(value, context, index))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(chunk) => outcomes.extend(chunk),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        outcomes
    });
    log_batch(&outcomes);
    outcomes
}

fn process_value(value: Value, context: &SynthesisContext, index: usize) -> DocumentOutcome {
    let value = match value {
        Value::Object(map) => return process_document(OrderDocument::from(map), context, index),
        other => other,
    };

    let err = ModelError::NotAnObject {
        found: json_type_name(&value),
    };
    tracing::warn!(document = index, "Passing through batch element: {err}");
    let mut report = DocumentReport::new(index);
    report.skip(Stage::Document, None, err.to_string());
    DocumentOutcome {
        result: ProcessedDocument::passthrough(value),
        report,
    }
}

fn log_batch(outcomes: &[DocumentOutcome]) {
    let lines: usize = outcomes.iter().map(|o| o.report.lines_emitted).sum();
    let offsets: usize = outcomes.iter().map(|o| o.report.offsets_emitted).sum();
    let skipped: usize = outcomes.iter().map(|o| o.report.skipped.len()).sum();
    tracing::info!(
        documents = outcomes.len(),
        lines,
        offsets,
        skipped,
        "Batch normalized"
    );
}

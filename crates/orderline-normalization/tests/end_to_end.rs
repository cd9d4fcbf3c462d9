//! End-to-end tests for order normalization.

use orderline_model::{OrderDocument, ProcessedDocument, ProductLine};
use orderline_normalization::{
    GiftPaymentPolicy, Stage, SynthesisContext, batch_from_value, process_documents,
    process_documents_with_reports, process_values, process_values_parallel,
};
use serde_json::{Value, json};

fn document(value: Value) -> OrderDocument {
    OrderDocument::from_value(value).unwrap()
}

fn lines(result: &ProcessedDocument) -> Vec<ProductLine> {
    result
        .product_lines()
        .iter()
        .map(|line| serde_json::from_value(line.clone()).unwrap())
        .collect()
}

fn certificates(items: Value) -> Value {
    json!({
        "order-no": "00042",
        "giftcertificate-lineitems": {"giftcertificate-lineitem": items},
        "newProductLines": []
    })
}

#[test]
fn single_zero_tax_certificate_produces_non_taxable_line() {
    let input = document(certificates(json!({"tax": "0", "base-price": "25.00"})));

    let results = process_documents(vec![input], &SynthesisContext::default());

    assert_eq!(results.len(), 1);
    let lines = lines(&results[0]);
    assert_eq!(lines.len(), 1);
    let rendered = serde_json::to_string_pretty(&lines[0]).unwrap();
    insta::assert_snapshot!(rendered, @r#"
    {
      "line-type": "item",
      "sku": "Gift Card - Test",
      "netsuiteId": "2282",
      "base-price": 25,
      "tax-rate": 0,
      "quantity": 1,
      "description": "",
      "tax-code": -7
    }
    "#);
}

#[test]
fn taxed_certificate_has_null_tax_code() {
    let input = document(certificates(json!({"tax": "0.1", "base-price": "50"})));

    let results = process_documents(vec![input], &SynthesisContext::default());

    let lines = lines(&results[0]);
    assert_eq!(lines[0].tax_rate, 10.0);
    assert_eq!(lines[0].tax_code, None);
    assert!(results[0].product_lines()[0]["tax-code"].is_null());
}

#[test]
fn blank_tax_produces_non_taxable_line() {
    let input = document(certificates(json!({"tax": "", "base-price": "6"})));

    let results = process_documents(vec![input], &SynthesisContext::default());

    let line = &results[0].product_lines()[0];
    assert_eq!(line["tax-rate"], json!(0));
    assert_eq!(line["tax-code"], json!(-7));
    assert_eq!(line["base-price"], json!(6));
}

#[test]
fn single_record_is_normalized_to_sequence_in_output() {
    let input = document(certificates(json!({"tax": "0", "base-price": "5"})));

    let results = process_documents(vec![input], &SynthesisContext::default());

    let data = &results[0].data;
    let items = data["giftcertificate-lineitems"]["giftcertificate-lineitem"]
        .as_array()
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(data["order-no"], "00042");
}

#[test]
fn multiple_certificates_keep_input_order() {
    let input = document(certificates(json!([
        {"tax": "0", "base-price": "10"},
        {"tax": "0.05", "base-price": "20"},
        {"tax": 0.0825, "base-price": 30}
    ])));

    let results = process_documents(vec![input], &SynthesisContext::default());

    let lines = lines(&results[0]);
    let prices: Vec<f64> = lines.iter().map(|line| line.base_price).collect();
    assert_eq!(prices, vec![10.0, 20.0, 30.0]);
    assert_eq!(lines[1].tax_rate, 5.0);
    assert!((lines[2].tax_rate - 8.25).abs() < 1e-9);
    assert_eq!(lines[2].tax_code, None);
}

#[test]
fn missing_base_price_skips_only_that_item() {
    let input = document(certificates(json!([
        {"tax": "0", "base-price": "1"},
        {"tax": "0"},
        {"tax": "0", "base-price": "3"}
    ])));

    let outcomes = process_documents_with_reports(vec![input], &SynthesisContext::default());

    let outcome = &outcomes[0];
    let prices: Vec<f64> = lines(&outcome.result).iter().map(|l| l.base_price).collect();
    assert_eq!(prices, vec![1.0, 3.0]);
    assert_eq!(outcome.report.lines_emitted, 2);
    assert_eq!(outcome.report.skipped.len(), 1);
    assert_eq!(outcome.report.skipped[0].stage, Stage::LineItem);
    assert_eq!(outcome.report.skipped[0].index, Some(1));
}

#[test]
fn absent_certificate_group_appends_nothing() {
    let input = document(json!({"order-no": "1", "newProductLines": []}));

    let outcomes = process_documents_with_reports(vec![input], &SynthesisContext::default());

    assert!(outcomes[0].result.product_lines().is_empty());
    assert!(outcomes[0].report.is_clean());
}

#[test]
fn existing_product_lines_are_preserved() {
    let mut raw = certificates(json!({"tax": "0", "base-price": "9"}));
    raw["newProductLines"] = json!([{"sku": "SHIRT-1", "base-price": 20}]);

    let results = process_documents(vec![document(raw)], &SynthesisContext::default());

    let stored = results[0].product_lines();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], json!({"sku": "SHIRT-1", "base-price": 20}));
    assert_eq!(stored[1]["netsuiteId"], "2282");
}

#[test]
fn one_broken_group_does_not_block_the_other() {
    let input = document(json!({
        "giftcertificate-lineitems": {"unexpected": true},
        "payments": {"payment": {"amount": "10", "gift-certificate": "GC-1"}},
        "newProductLines": []
    }));

    let outcomes = process_documents_with_reports(vec![input], &SynthesisContext::default());

    let outcome = &outcomes[0];
    assert_eq!(outcome.report.skipped_in(Stage::Shape), 1);
    assert_eq!(outcome.report.gift_payments, 1);
    assert!(outcome.result.data["payments"]["payment"].is_array());
    assert!(outcome.result.product_lines().is_empty());
}

#[test]
fn gift_payments_emit_nothing_by_default() {
    let mut raw = certificates(json!({"tax": "0", "base-price": "25"}));
    raw["payments"] = json!({"payment": [
        {"amount": "25", "gift-certificate": {"code": "GC-9"}},
        {"amount": "10"}
    ]});

    let outcomes = process_documents_with_reports(vec![document(raw)], &SynthesisContext::default());

    assert_eq!(outcomes[0].result.product_lines().len(), 1);
    assert_eq!(outcomes[0].report.gift_payments, 1);
    assert_eq!(outcomes[0].report.offsets_emitted, 0);
}

#[test]
fn gift_payments_emit_offsets_when_enabled() {
    let mut raw = certificates(json!({"tax": "0", "base-price": "25"}));
    raw["payments"] = json!({"payment": {"amount": "25", "gift-certificate": "GC-9"}});
    let context = SynthesisContext::default().with_gift_payments(GiftPaymentPolicy::EmitOffset);

    let results = process_documents(vec![document(raw)], &context);

    let lines = lines(&results[0]);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].base_price, -25.0);
    assert_eq!(lines[1].netsuite_id, "18973");
    assert_eq!(lines[1].actual_tax_rate, Some(0.0));
}

#[test]
fn malformed_documents_never_abort_the_batch() {
    let inputs = vec![
        json!({"giftcertificate-lineitems": "nonsense", "payments": 7}),
        json!({"giftcertificate-lineitems": {"giftcertificate-lineitem": [null, 3, "x", []]}}),
        json!({"payments": {"payment": [{"amount": {}}, {"amount": "NaN"}]}}),
        json!({"giftcertificate-lineitems": {"giftcertificate-lineitem": {"tax": "0", "base-price": "2"}},
               "newProductLines": {"not": "a list"}}),
        json!([1, 2, 3]),
        json!(null),
        certificates(json!({"tax": "0", "base-price": "4"})),
    ];

    let outcomes = process_values(inputs, &SynthesisContext::default());

    assert_eq!(outcomes.len(), 7);
    assert_eq!(outcomes[1].report.skipped_in(Stage::LineItem), 4);
    assert_eq!(outcomes[3].report.skipped_in(Stage::LineItem), 1);
    assert_eq!(outcomes[4].report.skipped_in(Stage::Document), 1);
    assert_eq!(outcomes[4].result.data, json!([1, 2, 3]));
    assert_eq!(outcomes[5].result.data, Value::Null);
    assert_eq!(outcomes[6].result.product_lines().len(), 1);
    for (index, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.report.index, index);
    }
}

#[test]
fn missing_product_lines_sequence_is_created() {
    let raw = json!({"giftcertificate-lineitems": {"giftcertificate-lineitem": {"tax": "0", "base-price": "2"}}});

    let results = process_documents(vec![document(raw)], &SynthesisContext::default());

    assert_eq!(results[0].product_lines().len(), 1);
}

#[test]
fn parallel_processing_matches_sequential_order() {
    let inputs: Vec<Value> = (0..37)
        .map(|i| certificates(json!({"tax": "0", "base-price": i.to_string()})))
        .collect();
    let context = SynthesisContext::default();

    let sequential = process_values(inputs.clone(), &context);
    let parallel = process_values_parallel(inputs, &context);

    assert_eq!(sequential.len(), parallel.len());
    for (left, right) in sequential.iter().zip(&parallel) {
        assert_eq!(left.result, right.result);
        assert_eq!(left.report, right.report);
    }
}

#[test]
fn batch_accepts_single_document_or_sequence() {
    assert_eq!(batch_from_value(json!({"order-no": "1"})).len(), 1);
    assert_eq!(batch_from_value(json!([{"a": 1}, {"b": 2}])).len(), 2);
    assert!(batch_from_value(Value::Null).is_empty());
}

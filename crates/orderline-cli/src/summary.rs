use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use orderline_model::CatalogConfig;
use orderline_normalization::{DocumentReport, Stage};

use crate::types::BatchResult;

/// Print the per-document summary to stderr, keeping stdout for the batch.
pub fn print_summary(result: &BatchResult) {
    eprintln!("Input: {}", result.source);
    match &result.output {
        Some(path) => eprintln!("Output: {}", path.display()),
        None => eprintln!("Output: stdout"),
    }
    eprintln!(
        "Policies: gift payments {}, non-finite tax {}",
        result.gift_payments, result.non_finite_tax
    );
    eprintln!("{}", summary_table(result));
    print_skip_table(&result.reports);
}

/// Per-document counts with a TOTAL row; each column totals its own stage.
pub fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Lines"),
        header_cell("Gift payments"),
        header_cell("Offsets"),
        header_cell("Skipped items"),
        header_cell("Skipped payments"),
        header_cell("Shape faults"),
        header_cell("Not an order"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for report in &result.reports {
        table.add_row(vec![
            document_cell(report),
            Cell::new(report.lines_emitted),
            count_cell(report.gift_payments, Color::Blue),
            count_cell(report.offsets_emitted, Color::Blue),
            count_cell(report.skipped_in(Stage::LineItem), Color::Yellow),
            count_cell(report.skipped_in(Stage::Payment), Color::Yellow),
            count_cell(report.skipped_in(Stage::Shape), Color::Yellow),
            count_cell(report.skipped_in(Stage::Document), Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.lines_emitted()).add_attribute(Attribute::Bold),
        total_cell(result.gift_payments_detected(), Color::Blue),
        total_cell(result.offsets_emitted(), Color::Blue),
        total_cell(result.skipped_in(Stage::LineItem), Color::Yellow),
        total_cell(result.skipped_in(Stage::Payment), Color::Yellow),
        total_cell(result.skipped_in(Stage::Shape), Color::Yellow),
        total_cell(result.skipped_in(Stage::Document), Color::Red),
    ]);
    table
}

fn print_skip_table(reports: &[DocumentReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Stage"),
        header_cell("Entry"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut rows = 0usize;
    for report in reports {
        for event in &report.skipped {
            table.add_row(vec![
                Cell::new(report.index),
                stage_cell(event.stage),
                event.index.map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(&event.reason),
            ]);
            rows += 1;
        }
    }
    if rows == 0 {
        return;
    }
    eprintln!();
    eprintln!("Skipped:");
    eprintln!("{table}");
}

/// Print the catalog references as a two-column table.
pub fn print_catalog(catalog: &CatalogConfig) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("sku"), Cell::new(&catalog.sku)]);
    table.add_row(vec![Cell::new("netsuiteId"), Cell::new(&catalog.netsuite_id)]);
    table.add_row(vec![
        Cell::new("non-taxable tax-code"),
        Cell::new(catalog.non_taxable_tax_code),
    ]);
    table.add_row(vec![
        Cell::new("offset netsuiteId"),
        Cell::new(&catalog.offset_netsuite_id),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn document_cell(report: &DocumentReport) -> Cell {
    if report.skipped_in(Stage::Document) > 0 {
        Cell::new(format!("#{} (not an order)", report.index)).fg(Color::Red)
    } else {
        Cell::new(format!("#{}", report.index))
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    }
}

fn stage_cell(stage: Stage) -> Cell {
    match stage {
        Stage::Document => Cell::new(stage).fg(Color::Red),
        Stage::Shape => Cell::new(stage).fg(Color::DarkGrey),
        Stage::LineItem | Stage::Payment => Cell::new(stage).fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn total_cell(count: usize, color: Color) -> Cell {
    count_cell(count, color).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderline_normalization::{GiftPaymentPolicy, NonFiniteTaxPolicy};

    fn report(index: usize, stages: &[Stage]) -> DocumentReport {
        let mut report = DocumentReport::new(index);
        for (entry, stage) in stages.iter().enumerate() {
            report.skip(*stage, Some(entry), "bad entry");
        }
        report
    }

    fn row_contents(table: &Table, index: usize) -> Vec<String> {
        table
            .row(index)
            .unwrap()
            .cell_iter()
            .map(Cell::content)
            .collect()
    }

    #[test]
    fn test_total_row_sums_each_stage_separately() {
        let mut first = report(0, &[Stage::LineItem, Stage::LineItem, Stage::Shape]);
        first.lines_emitted = 3;
        first.gift_payments = 1;
        let mut second = report(1, &[Stage::Payment]);
        second.lines_emitted = 2;
        second.gift_payments = 1;
        second.offsets_emitted = 1;
        let third = report(2, &[Stage::Document]);
        let result = BatchResult {
            source: "orders.json".to_string(),
            output: None,
            gift_payments: GiftPaymentPolicy::EmitOffset,
            non_finite_tax: NonFiniteTaxPolicy::NoOverride,
            reports: vec![first, second, third],
        };

        let table = summary_table(&result);

        assert_eq!(table.row_iter().count(), 4);
        assert_eq!(row_contents(&table, 0), ["#0", "3", "1", "0", "2", "0", "1", "0"]);
        assert_eq!(
            row_contents(&table, 2),
            ["#2 (not an order)", "0", "0", "0", "0", "0", "0", "1"]
        );
        assert_eq!(row_contents(&table, 3), ["TOTAL", "5", "2", "1", "2", "1", "1", "1"]);
    }
}

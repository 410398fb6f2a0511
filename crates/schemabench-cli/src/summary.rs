use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::report::JobReport;

/// Builds the metrics table shown after a run.
pub fn metrics_table(report: &JobReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, value) in &report.metrics {
        table.add_row(vec![Cell::new(name), value_cell(*value)]);
    }
    if report.metrics.is_empty() {
        table.add_row(vec![dim_cell("(none)"), dim_cell("-")]);
    }
    table
}

pub fn print_summary(report: &JobReport, output: &Path) {
    println!("Job: {}", report.name);
    println!("Dataset: {}", report.dataset_name);
    println!("Matches: {}", report.matches.len());
    println!("Output: {}", output.display());
    println!("{}", metrics_table(report));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}")).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

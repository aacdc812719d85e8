//! Terminal rendering of survey summaries and tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use svy_common::{any_to_f64, any_to_string};
use svy_core::LabeledFrame;
use svy_model::VariableKind;
use svy_report::{PERCENT, WEIGHTED_N, WeightedStats};

pub fn print_overview(frame: &LabeledFrame) {
    println!(
        "Survey: {} respondents, {} columns, {} declared variables",
        frame.record_count(),
        frame.width(),
        frame.metadata.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Kind"),
        header_cell("Label"),
        header_cell("Values"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for (name, meta) in frame.metadata.iter() {
        let kind = match meta.kind {
            VariableKind::Single => Cell::new("single"),
            VariableKind::Multi => Cell::new("multi").fg(Color::Blue),
        };
        let label = match meta.variable_label.as_deref() {
            Some(label) => Cell::new(label),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            kind,
            label,
            count_cell(meta.value_labels.len()),
            count_cell(meta.option_count()),
        ]);
    }
    println!("{table}");

    let unlabeled = frame
        .column_names()
        .iter()
        .filter(|name| frame.metadata.variable(name).is_none())
        .count();
    if unlabeled > 0 {
        println!("({unlabeled} data columns without metadata)");
    }
}

pub fn print_freq(frame: &LabeledFrame, variable: &str, freq: &DataFrame) {
    if let Some(label) = frame.variable_label(variable) {
        println!("{variable}: {label}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(variable),
        header_cell(WEIGHTED_N),
        header_cell(PERCENT),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let values = freq.column(variable).ok();
    let counts = freq.column(WEIGHTED_N).ok();
    let percents = freq.column(PERCENT).ok();
    for idx in 0..freq.height() {
        let value = values
            .map(|col| any_to_string(col.get(idx).unwrap_or(AnyValue::Null)))
            .unwrap_or_default();
        let count = counts
            .and_then(|col| any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)))
            .unwrap_or_default();
        let percent = percents
            .and_then(|col| any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(value),
            Cell::new(format!("{count:.2}")),
            Cell::new(format!("{percent:.1}")),
        ]);
    }
    println!("{table}");
}

pub fn print_stats(frame: &LabeledFrame, variable: &str, stats: &WeightedStats) {
    match frame.variable_label(variable) {
        Some(label) => println!("{variable}: {label}"),
        None => println!("{variable}"),
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (name, value) in [
        ("Mean", stats.mean),
        ("StdDev", stats.std_dev),
        ("Variance", stats.variance),
        ("Min", stats.min),
        ("Max", stats.max),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(format!("{value:.2}"))]);
    }
    table.add_row(vec![Cell::new("N"), Cell::new(stats.n)]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

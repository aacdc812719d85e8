//! Multi-response expansion.
//!
//! A multi-response group arrives as one packed column of '0'/'1' digits,
//! one digit per option. Expansion rewrites each such column into one binary
//! indicator column per declared subvariable and drops the packed original.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};

use svy_common::any_to_string;
use svy_model::SurveyMetadata;

use crate::error::Result;

/// Expands every multi-response group present in the table.
///
/// Row count and order are preserved and non-group columns pass through
/// untouched. The input frame is consumed and a new one returned. Packed
/// cells shorter than the declared option count are left-padded with '0';
/// positions beyond the cell (sparse option codes included) read as 0, and
/// cells longer than the option count keep only their leading digits. The
/// mismatch is logged, never fatal.
pub fn expand_multi_responses(df: DataFrame, metadata: &SurveyMetadata) -> Result<DataFrame> {
    let mut df = df;
    for (name, meta) in metadata.multi_groups() {
        if df.column(name).is_err() {
            tracing::debug!(group = %name, "multi group not present in table");
            continue;
        }
        if meta.subvars.is_empty() {
            tracing::warn!(group = %name, "multi group has no declared options, keeping packed column");
            continue;
        }
        df = expand_group(df, name, &meta.subvars)?;
        tracing::debug!(group = %name, options = meta.subvars.len(), "expanded multi group");
    }
    Ok(df)
}

fn expand_group(mut df: DataFrame, name: &str, subvars: &BTreeMap<u32, String>) -> Result<DataFrame> {
    let width = subvars.len();
    let packed = df.column(name)?.clone();
    let height = df.height();

    let mut cells: Vec<String> = Vec::with_capacity(height);
    let mut overflow_logged = false;
    for idx in 0..height {
        let cell = any_to_string(packed.get(idx).unwrap_or(AnyValue::Null));
        let digits = cell.trim();
        if digits.len() > width && !overflow_logged {
            tracing::warn!(
                group = %name,
                cell = %digits,
                options = width,
                "packed value longer than declared option count"
            );
            overflow_logged = true;
        }
        cells.push(pad_packed(digits, width));
    }

    for (code, subvar) in subvars {
        let position = (*code - 1) as usize;
        let flags: Vec<i32> = cells.iter().map(|cell| flag_at(cell, position)).collect();
        df.with_column(Series::new(subvar.as_str().into(), flags).into_column())?;
    }
    Ok(df.drop(name)?)
}

/// Left-pads a packed digit string with '0' to the declared option count.
fn pad_packed(digits: &str, width: usize) -> String {
    let len = digits.chars().count();
    if len >= width {
        digits.to_string()
    } else {
        let mut padded = "0".repeat(width - len);
        padded.push_str(digits);
        padded
    }
}

/// Reads the flag at a zero-based position; anything but '1' is 0.
fn flag_at(packed: &str, position: usize) -> i32 {
    match packed.chars().nth(position) {
        Some('1') => 1,
        _ => 0,
    }
}

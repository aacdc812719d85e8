//! Spreadsheet survey data reading.
//!
//! Workbooks exported from survey platforms carry the same layout as the
//! delimited files: a header row followed by one row per respondent. Every
//! cell is rendered to a string column so packed digit codes survive intact.

use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use svy_common::format_numeric;

use crate::error::{IngestError, Result};

/// Reads the first worksheet of a workbook into a string-typed DataFrame.
pub fn read_survey_sheet(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptySheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| IngestError::EmptySheet {
        path: path.to_path_buf(),
    })?;
    let headers: Vec<String> = header.iter().map(cell_to_string).collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(idx).and_then(cell_to_optional_string));
        }
    }

    let columns = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into_column())
        .collect();
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read survey worksheet"
    );
    Ok(df)
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => format_numeric(*f),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        DataType::DateTime(f) => format_numeric(*f),
        DataType::Empty | DataType::Error(_) => String::new(),
    }
}

fn cell_to_optional_string(cell: &DataType) -> Option<String> {
    let rendered = cell_to_string(cell);
    if rendered.is_empty() { None } else { Some(rendered) }
}

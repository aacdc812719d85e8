//! Survey data ingestion.
//!
//! This crate loads the two inputs of a survey analysis session:
//!
//! - **Response tables**: semicolon-delimited CSV exports or spreadsheet
//!   workbooks, read into Polars DataFrames.
//! - **Label metadata**: the companion file written in the statistical
//!   label language (`value`, `label`, `format` statements), parsed into a
//!   normalized [`svy_model::SurveyMetadata`] table.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use svy_ingest::{load_metadata_file, read_survey_table};
//!
//! let df = read_survey_table(Path::new("responses.csv"))?;
//! let parse = load_metadata_file(Path::new("labels.txt"))?;
//! println!("{} variables", parse.metadata.len());
//! ```

mod csv;
mod error;
mod metadata;
mod sheet;

use std::path::Path;

use polars::prelude::DataFrame;

pub use crate::csv::read_survey_csv;
pub use crate::error::{IngestError, Result};
pub use crate::metadata::{
    MetadataParse, ScanDiagnostic, SkipReason, Statement, load_metadata_file, parse_metadata,
    scan_statements,
};
pub use crate::sheet::read_survey_sheet;

/// Reads a survey response table, dispatching on the file extension.
///
/// Delimited text goes through the CSV reader; workbook formats go through
/// calamine. Anything else is rejected.
pub fn read_survey_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "txt" => read_survey_csv(path),
        "xlsx" | "xls" | "ods" => read_survey_sheet(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let result = read_survey_table(Path::new("survey.parquet"));
        assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
    }
}

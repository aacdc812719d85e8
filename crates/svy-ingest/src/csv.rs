//! Delimited survey data reading.
//!
//! Survey exports use semicolon-separated values with quoted fields.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Schema inference window for delimited files.
const INFER_SCHEMA_ROWS: usize = 100;

/// Reads a semicolon-delimited survey export into a DataFrame.
///
/// The first row is the header; fields may be double-quoted. Column dtypes
/// are inferred from the leading rows, so packed multi-response columns may
/// come back numeric; downstream consumers render cells through
/// `svy_common::any_to_string` before interpreting them.
pub fn read_survey_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|opts| opts.with_separator(b';').with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read survey csv"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn reads_semicolon_separated_file() {
        let file = temp_csv("id;sex;vigt\n1;2;0.8\n2;1;1.2\n");
        let df = read_survey_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let names: Vec<&str> = df.get_column_names_str();
        assert_eq!(names, vec!["id", "sex", "vigt"]);
    }

    #[test]
    fn reads_quoted_fields() {
        let file = temp_csv("id;comment\n1;\"likes; semicolons\"\n");
        let df = read_survey_csv(file.path()).unwrap();

        assert_eq!(df.height(), 1);
        let comment = df.column("comment").unwrap().get(0).unwrap();
        assert_eq!(
            svy_common::any_to_string(comment),
            "likes; semicolons"
        );
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let result = read_survey_csv(Path::new("/nonexistent/survey.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}

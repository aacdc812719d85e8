//! The labeled survey frame.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame};

use svy_model::SurveyMetadata;

use crate::error::{CoreError, Result};

/// A survey response table paired with its variable metadata.
///
/// Rows are respondents; columns are variables after multi-response
/// expansion, so every column belonging to a multi group carries its
/// subvariable name and the packed group column is gone. The frame is built
/// once by the load pipeline and treated as read-only afterwards; the only
/// supported mutation is [`LabeledFrame::set_variable_label`].
#[derive(Debug, Clone)]
pub struct LabeledFrame {
    pub data: DataFrame,
    pub metadata: SurveyMetadata,
}

impl LabeledFrame {
    pub fn new(data: DataFrame, metadata: SurveyMetadata) -> Self {
        Self { data, metadata }
    }

    /// The display label of a column. `None` when no label was declared;
    /// never an error.
    pub fn variable_label(&self, column: &str) -> Option<&str> {
        self.metadata.variable_label(column)
    }

    /// The value-label dictionary of a column. `None` when the column has no
    /// metadata record at all.
    pub fn value_labels(&self, column: &str) -> Option<&BTreeMap<u32, String>> {
        self.metadata.value_labels(column)
    }

    /// Inserts or overwrites a column's display label.
    ///
    /// Fails when the column is absent from the data table; a metadata
    /// record is never created for a column that does not exist. For a
    /// present column without a record, a fresh Single record is created.
    pub fn set_variable_label(&mut self, column: &str, label: impl Into<String>) -> Result<()> {
        if self.data.column(column).is_err() {
            return Err(CoreError::ColumnNotFound {
                column: column.to_string(),
            });
        }
        self.metadata.set_variable_label(column, label);
        Ok(())
    }

    /// Column access delegating to the underlying table.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.data.column(name).map_err(|_| CoreError::ColumnNotFound {
            column: name.to_string(),
        })
    }

    /// Number of respondents.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Number of columns after expansion.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.data.get_column_names_str()
    }
}

#[cfg(test)]
mod tests {
    use polars::df;
    use svy_model::VariableMeta;

    use super::*;

    fn sample_frame() -> LabeledFrame {
        let data = df!(
            "sex" => &[1i32, 2, 2],
            "vigt" => &[0.8f64, 1.1, 1.0],
        )
        .unwrap();
        let mut metadata = SurveyMetadata::new();
        metadata.insert(
            "sex",
            VariableMeta::single()
                .with_label("Respondent sex")
                .with_value_labels(BTreeMap::from([
                    (1, "Female".to_string()),
                    (2, "Male".to_string()),
                ])),
        );
        LabeledFrame::new(data, metadata)
    }

    #[test]
    fn label_lookups_never_error() {
        let frame = sample_frame();
        assert_eq!(frame.variable_label("sex"), Some("Respondent sex"));
        assert_eq!(frame.variable_label("vigt"), None);
        assert_eq!(frame.variable_label("not_a_column"), None);
        assert!(frame.value_labels("sex").is_some());
        assert!(frame.value_labels("vigt").is_none());
    }

    #[test]
    fn set_variable_label_rejects_unknown_columns() {
        let mut frame = sample_frame();
        let before = frame.metadata.clone();

        let err = frame
            .set_variable_label("nonexistent_col", "x")
            .unwrap_err();
        assert!(matches!(err, CoreError::ColumnNotFound { .. }));
        assert_eq!(frame.metadata, before);
    }

    #[test]
    fn set_variable_label_creates_missing_records() {
        let mut frame = sample_frame();
        frame
            .set_variable_label("vigt", "Sampling weight")
            .unwrap();
        assert_eq!(frame.variable_label("vigt"), Some("Sampling weight"));

        frame.set_variable_label("sex", "Sex of respondent").unwrap();
        assert_eq!(frame.variable_label("sex"), Some("Sex of respondent"));
        // The value-label dictionary is untouched by label mutation.
        assert_eq!(
            frame.value_labels("sex").and_then(|m| m.get(&1)).map(String::as_str),
            Some("Female")
        );
    }

    #[test]
    fn column_access_delegates_to_the_table() {
        let frame = sample_frame();
        assert_eq!(frame.record_count(), 3);
        assert_eq!(frame.width(), 2);
        assert!(frame.column("sex").is_ok());
        assert!(matches!(
            frame.column("ghost"),
            Err(CoreError::ColumnNotFound { .. })
        ));
    }
}

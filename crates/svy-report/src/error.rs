use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A named column is absent from the survey table.
    #[error("column '{column}' not found in survey table")]
    ColumnNotFound { column: String },

    /// No usable observations after dropping missing values and weights.
    #[error("no usable observations for column '{column}'")]
    NoObservations { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

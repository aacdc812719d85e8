//! The survey load pipeline.
//!
//! One synchronous pass: read the response table, parse the label metadata,
//! expand multi-response groups, and wrap the result. Both inputs are read
//! fully into memory; there is no streaming or incremental parsing.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use svy_ingest::{load_metadata_file, read_survey_table};

use crate::expand::expand_multi_responses;
use crate::frame::LabeledFrame;

/// Loads a survey from a data file and its companion metadata file.
pub fn load_survey(data_path: &Path, metadata_path: &Path) -> Result<LabeledFrame> {
    let df = read_survey_table(data_path)
        .with_context(|| format!("read survey data: {}", data_path.display()))?;
    let parse = load_metadata_file(metadata_path)
        .with_context(|| format!("read survey metadata: {}", metadata_path.display()))?;

    let df = expand_multi_responses(df, &parse.metadata)
        .context("expand multi-response groups")?;

    let frame = LabeledFrame::new(df, parse.metadata);
    info!(
        records = frame.record_count(),
        columns = frame.width(),
        variables = frame.metadata.len(),
        "loaded survey"
    );
    Ok(frame)
}

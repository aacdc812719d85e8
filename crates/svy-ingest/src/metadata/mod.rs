//! Survey label-language parsing.
//!
//! Turns the free-text companion file of a survey export into a normalized
//! [`SurveyMetadata`] table: line classification, kind/group resolution,
//! label resolution, and record assembly, in that order. Parsing is
//! best-effort by design: malformed declarations are collected as
//! diagnostics and skipped, never failing the load.

mod build;
mod resolve;
mod scan;

use std::path::Path;

use svy_model::SurveyMetadata;

use crate::error::{IngestError, Result};

pub use scan::{ScanDiagnostic, SkipReason, Statement, scan_statements};

/// A parsed metadata file: the normalized table plus everything the
/// best-effort scan dropped.
#[derive(Debug, Clone)]
pub struct MetadataParse {
    pub metadata: SurveyMetadata,
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Parses metadata text into a normalized table.
///
/// The full model is rebuilt on every call; there is no incremental update.
pub fn parse_metadata(text: &str) -> MetadataParse {
    let (statements, mut diagnostics) = scan_statements(text);
    let (kinds, groups, kind_diagnostics) = resolve::resolve_kinds(&statements);
    let (variable_labels, value_labels, label_diagnostics) =
        resolve::resolve_labels(&statements, &kinds, &groups);
    diagnostics.extend(kind_diagnostics);
    diagnostics.extend(label_diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.line_no);

    let metadata = build::build_metadata(&kinds, &groups, &variable_labels, &value_labels);
    MetadataParse {
        metadata,
        diagnostics,
    }
}

/// Loads and parses a metadata file.
///
/// Only file-level failures are errors; skipped declarations are logged at
/// warn level and surfaced through [`MetadataParse::diagnostics`].
pub fn load_metadata_file(path: &Path) -> Result<MetadataParse> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let parse = parse_metadata(&text);
    for diagnostic in &parse.diagnostics {
        tracing::warn!(
            line = diagnostic.line_no,
            reason = %diagnostic.reason,
            detail = %diagnostic.detail,
            "skipped metadata declaration"
        );
    }
    tracing::info!(
        path = %path.display(),
        variables = parse.metadata.len(),
        skipped = parse.diagnostics.len(),
        "loaded survey metadata"
    );
    Ok(parse)
}

//! Survey metadata model definitions.
//!
//! The types in this crate describe a survey's variables independently of
//! any data table: single vs. multi-response kinds, display labels, coded
//! value dictionaries, and the option mapping of multi-response groups.

pub mod metadata;

pub use metadata::{SurveyMetadata, VariableKind, VariableMeta};

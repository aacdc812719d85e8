//! Survey variable metadata.
//!
//! This module defines the normalized metadata model built from a survey's
//! companion label file: per-variable display labels, coded-value
//! dictionaries, and the option mapping of multi-response groups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a variable holds one coded answer or a packed multi-response item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// One discrete coded answer per respondent.
    Single,
    /// A "choose all that apply" group, stored as one packed digit string.
    Multi,
}

/// Metadata record for one top-level survey variable.
///
/// Multi-response groups are represented by a single record named after the
/// group; their subvariables never get records of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMeta {
    /// Single variable or multi-response group.
    pub kind: VariableKind,
    /// Human-readable question/item text.
    pub variable_label: Option<String>,
    /// Map of option codes to display text. Empty if none declared.
    pub value_labels: BTreeMap<u32, String>,
    /// Option code to subvariable column name. Populated only for Multi,
    /// so the expander and downstream consumers can recover the original
    /// column identities.
    pub subvars: BTreeMap<u32, String>,
}

impl VariableMeta {
    /// Creates a record for a single-response variable.
    pub fn single() -> Self {
        Self {
            kind: VariableKind::Single,
            variable_label: None,
            value_labels: BTreeMap::new(),
            subvars: BTreeMap::new(),
        }
    }

    /// Creates a record for a multi-response group with its option mapping.
    pub fn multi(subvars: BTreeMap<u32, String>) -> Self {
        Self {
            kind: VariableKind::Multi,
            variable_label: None,
            value_labels: BTreeMap::new(),
            subvars,
        }
    }

    /// Sets the variable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.variable_label = Some(label.into());
        self
    }

    /// Sets the value-label dictionary.
    pub fn with_value_labels(mut self, value_labels: BTreeMap<u32, String>) -> Self {
        self.value_labels = value_labels;
        self
    }

    /// Looks up the display text for one option code.
    pub fn value_label(&self, code: u32) -> Option<&str> {
        self.value_labels.get(&code).map(String::as_str)
    }

    /// Number of declared options of a multi-response group.
    pub fn option_count(&self) -> usize {
        self.subvars.len()
    }

    pub fn is_multi(&self) -> bool {
        self.kind == VariableKind::Multi
    }
}

/// Registry of variable metadata keyed by variable name.
///
/// Built once per metadata-file parse and treated as immutable afterwards;
/// the only supported post-hoc mutation is [`SurveyMetadata::set_variable_label`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyMetadata {
    variables: BTreeMap<String, VariableMeta>,
}

impl SurveyMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for a variable.
    pub fn insert(&mut self, name: impl Into<String>, meta: VariableMeta) {
        self.variables.insert(name.into(), meta);
    }

    /// Gets the record for a variable, if one was declared.
    pub fn variable(&self, name: &str) -> Option<&VariableMeta> {
        self.variables.get(name)
    }

    /// Gets the display label for a variable. `None` when the variable has
    /// no record or no declared label.
    pub fn variable_label(&self, name: &str) -> Option<&str> {
        self.variables
            .get(name)
            .and_then(|meta| meta.variable_label.as_deref())
    }

    /// Gets the value-label dictionary for a variable. `None` when the
    /// variable has no record; the dictionary itself may be empty.
    pub fn value_labels(&self, name: &str) -> Option<&BTreeMap<u32, String>> {
        self.variables.get(name).map(|meta| &meta.value_labels)
    }

    /// Inserts or overwrites a variable's display label, creating a Single
    /// record when none exists yet.
    pub fn set_variable_label(&mut self, name: &str, label: impl Into<String>) {
        self.variables
            .entry(name.to_string())
            .or_insert_with(VariableMeta::single)
            .variable_label = Some(label.into());
    }

    /// Iterates over all records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariableMeta)> {
        self.variables.iter()
    }

    /// Iterates over the multi-response groups only.
    pub fn multi_groups(&self) -> impl Iterator<Item = (&String, &VariableMeta)> {
        self.variables.iter().filter(|(_, meta)| meta.is_multi())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

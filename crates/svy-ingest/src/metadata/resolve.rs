//! Variable kind, group, and label resolution.
//!
//! Works over the classified statements of [`super::scan`]. `format` lines
//! are the authoritative variable registry: they decide which names become
//! top-level variables and which are subvariables of a multi-response group.
//! Resolution is a single forward pass with last-write-wins semantics on
//! redeclared variables; iteration follows input line order.

use std::collections::BTreeMap;

use svy_model::VariableKind;

use super::scan::{ScanDiagnostic, SkipReason, Statement};

/// Variable name to resolved kind.
pub type Kinds = BTreeMap<String, VariableKind>;
/// Group name to `{option code -> subvariable name}`.
pub type Groups = BTreeMap<String, BTreeMap<u32, String>>;

const MULTI_PREFIX: &str = "Multi_";

/// Resolves variable kinds and multi-response groups from `format` lines.
///
/// A format of shape `Multi_<G>` marks the group `G` (not the subvariable
/// named on the line) as a Multi top-level variable and registers the
/// subvariable under its trailing numeric suffix. Any other format marks the
/// line's variable Single. Redeclaring a variable overwrites its earlier
/// kind: the last `format` line wins.
pub fn resolve_kinds(statements: &[Statement]) -> (Kinds, Groups, Vec<ScanDiagnostic>) {
    let mut kinds = Kinds::new();
    let mut groups = Groups::new();
    let mut diagnostics = Vec::new();

    for statement in statements {
        let Statement::Format {
            variable,
            format,
            line_no,
        } = statement
        else {
            continue;
        };
        match format.strip_prefix(MULTI_PREFIX) {
            Some(group) if !group.is_empty() => {
                kinds.insert(group.to_string(), VariableKind::Multi);
                match trailing_code(variable) {
                    Some(code) => {
                        groups
                            .entry(group.to_string())
                            .or_default()
                            .insert(code, variable.clone());
                    }
                    None => diagnostics.push(ScanDiagnostic::new(
                        *line_no,
                        SkipReason::MissingSubvariableCode,
                        variable.clone(),
                    )),
                }
            }
            _ => {
                kinds.insert(variable.clone(), VariableKind::Single);
            }
        }
    }

    (kinds, groups, diagnostics)
}

/// Variable name to display label.
pub type VariableLabels = BTreeMap<String, String>;
/// Variable name to `{code -> value label}`.
pub type ValueLabels = BTreeMap<String, BTreeMap<u32, String>>;

/// Resolves display labels and value-label dictionaries.
///
/// Value blocks are merged first and are authoritative for their codes.
/// `label` lines then attach question text: directly for Single variables,
/// and split into question/option text for multi-group subvariables. A
/// label-derived option text never overwrites a value-block entry; it only
/// fills codes that have none. Labels for names known neither as Single
/// variables nor as any group's subvariable are dropped with a diagnostic.
pub fn resolve_labels(
    statements: &[Statement],
    kinds: &Kinds,
    groups: &Groups,
) -> (VariableLabels, ValueLabels, Vec<ScanDiagnostic>) {
    let mut variable_labels = VariableLabels::new();
    let mut value_labels = ValueLabels::new();
    let mut diagnostics = Vec::new();

    for statement in statements {
        if let Statement::ValueEntry {
            variable,
            code,
            text,
            ..
        } = statement
        {
            value_labels
                .entry(variable.clone())
                .or_default()
                .insert(*code, text.clone());
        }
    }

    for statement in statements {
        let Statement::Label {
            variable,
            text,
            line_no,
        } = statement
        else {
            continue;
        };
        if kinds.get(variable) == Some(&VariableKind::Single) {
            variable_labels.insert(variable.clone(), text.clone());
            continue;
        }
        match parent_group(groups, variable) {
            Some((group, code)) => {
                let (question, option) = split_label_text(text);
                variable_labels.insert(group.to_string(), question.to_string());
                value_labels
                    .entry(group.to_string())
                    .or_default()
                    .entry(code)
                    .or_insert_with(|| option.to_string());
            }
            None => diagnostics.push(ScanDiagnostic::new(
                *line_no,
                SkipReason::UnknownLabelTarget,
                variable.clone(),
            )),
        }
    }

    (variable_labels, value_labels, diagnostics)
}

/// Finds the group owning `subvar` and the code it is registered under.
fn parent_group<'a>(groups: &'a Groups, subvar: &str) -> Option<(&'a str, u32)> {
    for (group, subvars) in groups {
        if let Some((code, _)) = subvars.iter().find(|(_, name)| name.as_str() == subvar) {
            return Some((group.as_str(), *code));
        }
    }
    None
}

/// Splits a subvariable label into question and option text.
///
/// An en-dash separator is tried before a plain hyphen; with neither, the
/// whole text serves as both halves.
fn split_label_text(text: &str) -> (&str, &str) {
    for separator in ['\u{2013}', '-'] {
        if let Some((left, right)) = text.split_once(separator) {
            return (left.trim(), right.trim());
        }
    }
    (text.trim(), text.trim())
}

/// Parses the trailing decimal digits of a subvariable name as its option
/// code. Codes must be positive: the expander indexes packed strings at
/// `code - 1`.
fn trailing_code(name: &str) -> Option<u32> {
    let stem_len = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let code = name[stem_len..].parse::<u32>().ok()?;
    if code == 0 { None } else { Some(code) }
}

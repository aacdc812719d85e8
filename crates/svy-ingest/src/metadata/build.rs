//! Assembly of resolved kinds, groups, and labels into [`SurveyMetadata`].

use svy_model::{SurveyMetadata, VariableKind, VariableMeta};

use super::resolve::{Groups, Kinds, ValueLabels, VariableLabels};

/// Merges resolver output into one metadata record per top-level variable.
///
/// Only `format`-declared variables become records: names that appear solely
/// in label or value declarations are not promoted, because the format lines
/// are the authoritative variable registry.
pub fn build_metadata(
    kinds: &Kinds,
    groups: &Groups,
    variable_labels: &VariableLabels,
    value_labels: &ValueLabels,
) -> SurveyMetadata {
    let mut metadata = SurveyMetadata::new();
    for (name, kind) in kinds {
        let mut meta = match kind {
            VariableKind::Multi => {
                VariableMeta::multi(groups.get(name).cloned().unwrap_or_default())
            }
            VariableKind::Single => VariableMeta::single(),
        };
        if let Some(label) = variable_labels.get(name) {
            meta = meta.with_label(label);
        }
        if let Some(values) = value_labels.get(name) {
            meta = meta.with_value_labels(values.clone());
        }
        metadata.insert(name.clone(), meta);
    }
    metadata
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn multi_records_carry_their_subvars() {
        let kinds = Kinds::from([("media".to_string(), VariableKind::Multi)]);
        let groups = Groups::from([(
            "media".to_string(),
            BTreeMap::from([(1, "media_1".to_string()), (2, "media_2".to_string())]),
        )]);
        let variable_labels =
            VariableLabels::from([("media".to_string(), "News sources".to_string())]);
        let value_labels = ValueLabels::from([(
            "media".to_string(),
            BTreeMap::from([(1, "Radio".to_string()), (2, "TV".to_string())]),
        )]);

        let metadata = build_metadata(&kinds, &groups, &variable_labels, &value_labels);
        let media = metadata.variable("media").expect("media record");

        assert!(media.is_multi());
        assert_eq!(media.option_count(), 2);
        assert_eq!(media.variable_label.as_deref(), Some("News sources"));
        assert_eq!(media.value_label(2), Some("TV"));
    }

    #[test]
    fn single_records_have_no_subvars() {
        let kinds = Kinds::from([("sex".to_string(), VariableKind::Single)]);
        let value_labels = ValueLabels::from([(
            "sex".to_string(),
            BTreeMap::from([(1, "Female".to_string())]),
        )]);

        let metadata = build_metadata(
            &kinds,
            &Groups::new(),
            &VariableLabels::new(),
            &value_labels,
        );
        let sex = metadata.variable("sex").expect("sex record");

        assert!(!sex.is_multi());
        assert!(sex.subvars.is_empty());
        assert_eq!(sex.value_label(1), Some("Female"));
        assert_eq!(sex.variable_label, None);
    }

    #[test]
    fn label_only_variables_are_not_promoted() {
        let variable_labels =
            VariableLabels::from([("ghost".to_string(), "No format line".to_string())]);
        let value_labels = ValueLabels::from([(
            "phantom".to_string(),
            BTreeMap::from([(1, "Never declared".to_string())]),
        )]);

        let metadata = build_metadata(
            &Kinds::new(),
            &Groups::new(),
            &variable_labels,
            &value_labels,
        );
        assert!(metadata.is_empty());
    }
}

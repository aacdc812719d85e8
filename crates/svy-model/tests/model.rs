use std::collections::BTreeMap;

use svy_model::{SurveyMetadata, VariableKind, VariableMeta};

#[test]
fn metadata_serializes_round_trip() {
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
    metadata.insert(
        "media",
        VariableMeta::multi(BTreeMap::from([
            (1, "media_1".to_string()),
            (2, "media_2".to_string()),
        ]))
        .with_label("Media consumed"),
    );

    let json = serde_json::to_string(&metadata).expect("serialize metadata");
    let round: SurveyMetadata = serde_json::from_str(&json).expect("deserialize metadata");

    assert_eq!(round, metadata);
    let media = round.variable("media").expect("media record");
    assert_eq!(media.kind, VariableKind::Multi);
    assert_eq!(media.option_count(), 2);
    assert_eq!(round.variable_label("sex"), Some("Respondent sex"));
}

use std::collections::BTreeMap;

use proptest::prelude::{Just, Strategy, proptest};
use svy_ingest::{IngestError, load_metadata_file, parse_metadata};
use svy_model::VariableKind;

#[test]
fn load_metadata_file_reads_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("labels.txt");
    std::fs::write(
        &path,
        "\
format sex SexFmt.;
label sex = 'Respondent sex'
value sex ;
  1 = 'Female'
  2 = 'Male'
;
",
    )
    .unwrap();

    let parse = load_metadata_file(&path).unwrap();
    assert!(parse.diagnostics.is_empty());
    assert_eq!(parse.metadata.len(), 1);
    assert_eq!(parse.metadata.variable_label("sex"), Some("Respondent sex"));
}

#[test]
fn load_metadata_file_missing_path_errors() {
    let result = load_metadata_file(std::path::Path::new("/nonexistent/labels.txt"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn partially_malformed_file_still_loads() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("labels.txt");
    std::fs::write(
        &path,
        "\
format sex SexFmt.;
label = 'No variable name'
value sex ;
  one = 'Spelled-out code'
  1 = 'Female'
;
",
    )
    .unwrap();

    let parse = load_metadata_file(&path).unwrap();
    assert_eq!(parse.diagnostics.len(), 2);
    let sex = parse.metadata.variable("sex").unwrap();
    assert_eq!(sex.value_label(1), Some("Female"));
}

proptest! {
    /// Group membership must not depend on the order of format lines.
    #[test]
    fn grouping_is_independent_of_line_order(
        lines in Just(vec![
            "format media_1 Multi_media.;".to_string(),
            "format media_2 Multi_media.;".to_string(),
            "format media_3 Multi_media.;".to_string(),
            "format media_4 Multi_media.;".to_string(),
            "format sex SexFmt.;".to_string(),
            "label media_2 = 'News sources \u{2013} TV'".to_string(),
        ]).prop_shuffle()
    ) {
        let text = lines.join("\n");
        let parse = parse_metadata(&text);
        let media = parse.metadata.variable("media").expect("media group");

        assert_eq!(media.kind, VariableKind::Multi);
        assert_eq!(
            media.subvars,
            BTreeMap::from([
                (1, "media_1".to_string()),
                (2, "media_2".to_string()),
                (3, "media_3".to_string()),
                (4, "media_4".to_string()),
            ])
        );
        assert_eq!(media.variable_label.as_deref(), Some("News sources"));
        assert_eq!(media.value_label(2), Some("TV"));
        assert_eq!(
            parse.metadata.variable("sex").map(|meta| meta.kind),
            Some(VariableKind::Single)
        );
    }
}

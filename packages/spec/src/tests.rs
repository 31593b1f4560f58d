use std::io::Write;

use crate::*;

const USER_SPEC: &str = r#"
{
    "outDir": "./out",
    "lang": {
        "php": { "namespace": "App\\Model", "clazz": "User" },
        "ts": { "clazz": "User" }
    },
    "fields": [
        { "name": "id", "type": "integer", "comment": "identifier", "groups": [{ "name": "summary", "member": "user_id" }] },
        { "name": "name", "type": "string", "comment": "" },
        { "name": "createdAt", "type": "datetime", "groups": [{ "name": "audit", "member": "created" }, { "name": "summary", "member": "since" }] }
    ]
}
"#;

fn xyz() -> Vec<Field> {
    vec![
        Field::new("x", "integer"),
        Field::new("y", "string").with_group("g", "yy"),
        Field::new("z", "boolean"),
    ]
}

#[test]
fn test_parse_spec() {
    let spec = Spec::from_json_str(USER_SPEC).expect("Failed to parse spec");

    assert_eq!(spec.out_dir, "./out");
    assert_eq!(spec.php().expect("php section").namespace, "App\\Model");
    assert_eq!(spec.ts().expect("ts section").clazz, "User");
    assert_eq!(spec.fields.len(), 3);
    assert_eq!(spec.fields[0].comment.as_deref(), Some("identifier"));
    assert_eq!(spec.fields[2].ty, "datetime");
    assert_eq!(spec.fields[2].groups.len(), 2);
}

#[test]
fn test_empty_comment_is_absent() {
    let spec = Spec::from_json_str(USER_SPEC).expect("Failed to parse spec");
    assert_eq!(spec.fields[1].comment, None);
    assert_eq!(Field::new("a", "string").with_comment("").comment, None);
}

#[test]
fn test_missing_top_level_key() {
    let error = Spec::from_json_str(r#"{ "lang": {}, "fields": [] }"#).unwrap_err();
    assert!(matches!(error, SpecError::MissingKey { ref key } if key == "outDir"));
    assert_eq!(error.to_string(), "'outDir' is missing");
}

#[test]
fn test_missing_field_key_reports_path() {
    let source = r#"{ "outDir": ".", "lang": {}, "fields": [{ "name": "a", "type": "string" }, { "name": "b" }] }"#;
    let error = Spec::from_json_str(source).unwrap_err();
    assert!(matches!(error, SpecError::MissingKey { ref key } if key == "fields[1].type"));
}

#[test]
fn test_missing_group_and_lang_keys() {
    let group = r#"{ "outDir": ".", "lang": {}, "fields": [{ "name": "a", "type": "string", "groups": [{ "name": "g" }] }] }"#;
    let error = Spec::from_json_str(group).unwrap_err();
    assert!(matches!(error, SpecError::MissingKey { ref key } if key == "fields[0].groups[0].member"));

    let lang = r#"{ "outDir": ".", "lang": { "php": { "clazz": "A" } }, "fields": [] }"#;
    let error = Spec::from_json_str(lang).unwrap_err();
    assert!(matches!(error, SpecError::MissingKey { ref key } if key == "lang.php.namespace"));
}

#[test]
fn test_missing_language_section() {
    let spec = Spec::from_json_str(r#"{ "outDir": ".", "lang": {}, "fields": [] }"#)
        .expect("Failed to parse spec");
    assert!(matches!(spec.php(), Err(SpecError::MissingLanguage { .. })));
    assert!(matches!(spec.ts(), Err(SpecError::MissingLanguage { .. })));
}

#[test]
fn test_invalid_json() {
    let error = Spec::from_json_str("{ not json").unwrap_err();
    assert!(matches!(error, SpecError::InvalidJson(_)));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(USER_SPEC.as_bytes()).expect("Failed to write spec");

    let spec = Spec::from_file(file.path()).expect("Failed to load spec");
    assert_eq!(spec.fields[0].name, "id");

    let missing = Spec::from_file(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(SpecError::Io(_))));
}

#[test]
fn test_aggregate_groups_first_seen_order() {
    let spec = Spec::from_json_str(USER_SPEC).expect("Failed to parse spec");
    let groups = aggregate_groups(&spec.fields);

    let names: Vec<_> = groups.iter().map(|group| group.name()).collect();
    assert_eq!(names, ["summary", "audit"]);

    let summary = &groups[0];
    assert_eq!(summary.arity(), 3);
    let positions: Vec<_> = summary.members().iter().map(|member| member.position).collect();
    assert_eq!(positions, [0, 2]);
    assert_eq!(summary.members()[1].group.member, "since");
}

#[test]
fn test_ungrouped_fields_have_no_views() {
    let fields = vec![Field::new("a", "string"), Field::new("b", "string")];
    assert!(aggregate_groups(&fields).is_empty());
    assert_eq!(serialize_views(&fields).len(), 1);
    assert_eq!(deserialize_views(&fields).len(), 1);
}

#[test]
fn test_grouped_serialize_view() {
    let fields = xyz();
    let views = serialize_views(&fields);
    assert_eq!(views.len(), 2);

    let all = &views[0];
    assert_eq!(all.method_name("toArray", "to"), "toArray");
    let keys: Vec<_> = all.entries.iter().map(|entry| entry.key).collect();
    assert_eq!(keys, ["x", "y", "z"]);

    let grouped = &views[1];
    assert_eq!(grouped.method_name("toArray", "to"), "toG");
    assert_eq!(grouped.entries.len(), 1);
    assert_eq!(grouped.entries[0].key, "yy");
    assert_eq!(grouped.entries[0].field.name, "y");
}

#[test]
fn test_grouped_deserialize_view_keeps_positions() {
    let fields = xyz();
    let views = deserialize_views(&fields);
    let grouped = &views[1];

    assert_eq!(grouped.method_name("fromArray", "from"), "fromG");
    assert_eq!(grouped.arity(), 3);
    assert!(grouped.slots[0].is_none());
    assert_eq!(grouped.slots[1].map(|entry| entry.key), Some("yy"));
    assert!(grouped.slots[2].is_none());

    assert!(views[0].slots.iter().all(Option::is_some));
}

#[test]
fn test_upper_first() {
    assert_eq!(upper_first("summary"), "Summary");
    assert_eq!(upper_first("Already"), "Already");
    assert_eq!(upper_first(""), "");
    assert_eq!(upper_first("élan"), "Élan");
}

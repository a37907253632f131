use super::*;
use serde_json::json;

const POINT: &[FieldSpec] = &[
    FieldSpec::required("label", FieldKind::String),
    FieldSpec::required("value", FieldKind::Number),
];

const SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("accent", FieldKind::Color),
        FieldSpec::required("tags", FieldKind::StringList),
        FieldSpec::required("points", FieldKind::RecordList(POINT)),
        FieldSpec::optional("image", FieldKind::String),
    ],
};

fn params(v: serde_json::Value) -> ParameterSet {
    v.as_object().cloned().unwrap()
}

fn good() -> ParameterSet {
    params(json!({
        "title": "t",
        "accent": "#abc",
        "tags": ["a", "b"],
        "points": [{"label": "x", "value": 1.5}],
    }))
}

#[test]
fn accepts_well_formed_params() {
    SCHEMA.check(&good()).unwrap();

    let mut with_image = good();
    with_image.insert("image".to_string(), json!("https://example.com/a.png"));
    SCHEMA.check(&with_image).unwrap();

    let mut null_image = good();
    null_image.insert("image".to_string(), json!(null));
    SCHEMA.check(&null_image).unwrap();
}

#[test]
fn reports_missing_and_mistyped_fields() {
    let mut p = good();
    p.remove("title");
    p.insert("accent".to_string(), json!(42));
    let errs = SCHEMA.check(&p).unwrap_err();
    assert_eq!(errs.errors.len(), 2);
    assert_eq!(errs.errors[0].field_path(), "title");
    assert_eq!(errs.errors[0].message, "required field is missing");
    assert_eq!(errs.errors[1].field_path(), "accent");
}

#[test]
fn nested_paths_point_at_the_element() {
    let mut p = good();
    p.insert(
        "points".to_string(),
        json!([{"label": "a", "value": 1}, {"label": "b", "value": "2"}, 3]),
    );
    p.insert("tags".to_string(), json!(["ok", false]));
    let errs = SCHEMA.check(&p).unwrap_err();
    let paths: Vec<String> = errs.errors.iter().map(SchemaError::field_path).collect();
    assert_eq!(paths, vec!["tags[1]", "points[1].value", "points[2]"]);
}

#[test]
fn unknown_fields_are_rejected() {
    let mut p = good();
    p.insert("extra".to_string(), json!(1));
    let errs = SCHEMA.check(&p).unwrap_err();
    assert_eq!(errs.errors[0].field_path(), "extra");
    assert_eq!(errs.errors[0].message, "unknown field");
}

#[test]
fn bad_color_message_is_kept() {
    let mut p = good();
    p.insert("accent".to_string(), json!("blue"));
    let errs = SCHEMA.check(&p).unwrap_err();
    assert!(errs.to_string().starts_with("accent: color \"blue\""));
}

#[test]
fn converts_to_top_level_validation_error() {
    let mut p = good();
    p.insert("title".to_string(), json!(123));
    let err: VideoGenError = SCHEMA.check(&p).unwrap_err().into();
    assert_eq!(err.field(), Some("title"));
    assert!(err.to_string().contains("expected string"));
}

#[test]
fn field_lookup() {
    assert_eq!(SCHEMA.field("tags").unwrap().kind, FieldKind::StringList);
    assert!(SCHEMA.field("nope").is_none());
}

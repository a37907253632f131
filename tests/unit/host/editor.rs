use super::*;
use serde_json::json;

#[test]
fn open_starts_from_defaults() {
    let s = EditorSession::open("birthday").unwrap();
    assert_eq!(s.template().id, "birthday");
    assert_eq!(s.params(), &registry::defaults("birthday").unwrap());
    assert!(s.validated().is_ok());
}

#[test]
fn open_unknown_template_fails() {
    let err = EditorSession::open("wedding").unwrap_err();
    assert!(matches!(err, VideoGenError::TemplateNotFound(_)));
}

#[test]
fn fields_follow_schema_order_and_skip_lists() {
    let s = EditorSession::open("product-showcase").unwrap();
    let keys: Vec<_> = s.fields().into_iter().map(|f| f.key).collect();
    assert_eq!(
        keys,
        ["productName", "tagline", "price", "primaryColor", "imageUrl"]
    );

    let s = EditorSession::open("birthday").unwrap();
    let fields = s.fields();
    let widgets: Vec<_> = fields.iter().map(|f| f.widget).collect();
    assert_eq!(
        widgets,
        [
            WidgetKind::Text,
            WidgetKind::Number,
            WidgetKind::Text,
            WidgetKind::Color,
            WidgetKind::Color
        ]
    );
    assert_eq!(fields[3].label, "primary color");
}

#[test]
fn set_text_and_number_fields() {
    let mut s = EditorSession::open("birthday").unwrap();
    s.set("name", "小红").unwrap();
    s.set("age", " 30 ").unwrap();
    assert_eq!(s.params()["name"], json!("小红"));
    assert_eq!(s.params()["age"].as_f64(), Some(30.0));

    let tree = s.preview(FrameIndex(40)).unwrap();
    assert_eq!(tree.find("name-text").unwrap().text_content(), Some("小红"));
    assert_eq!(tree.find("age-value").unwrap().text_content(), Some("30"));
}

#[test]
fn set_rejects_bad_input() {
    let mut s = EditorSession::open("birthday").unwrap();
    let err = s.set("age", "thirty").unwrap_err();
    assert_eq!(err.field(), Some("age"));
    assert_eq!(s.params()["age"].as_f64(), Some(25.0));

    let err = s.set("nickname", "x").unwrap_err();
    assert_eq!(err.field(), Some("nickname"));

    let mut s = EditorSession::open("product-showcase").unwrap();
    let err = s.set("features", "a,b").unwrap_err();
    assert_eq!(err.field(), Some("features"));
}

#[test]
fn bad_color_is_kept_until_preview() {
    let mut s = EditorSession::open("birthday").unwrap();
    s.set("primaryColor", "red").unwrap();
    let err = s.preview(FrameIndex(0)).unwrap_err();
    assert_eq!(err.field(), Some("primaryColor"));
    s.reset().unwrap();
    assert!(s.preview(FrameIndex(0)).is_ok());
}

#[test]
fn set_value_replaces_lists() {
    let mut s = EditorSession::open("data-report").unwrap();
    s.set_value(
        "dataPoints",
        json!([{"label": "A", "value": 1, "color": "#ff0000"}]),
    )
    .unwrap();
    let tree = s.preview(FrameIndex(199)).unwrap();
    assert_eq!(tree.find("total-value").unwrap().text_content(), Some("1"));
    assert!(tree.find("segment-1").is_none());
}

#[test]
fn caption_and_generate() {
    let s = EditorSession::open("social-promo").unwrap();
    assert_eq!(s.preview_caption(), "1080x1350 @ 30fps");
    let artifact = s.generate(&RenderThreading::default()).unwrap();
    let direct = crate::host::generate::generate(
        "social-promo",
        s.params(),
        &RenderThreading::default(),
    )
    .unwrap();
    assert_eq!(artifact, direct);
}

#[test]
fn labels_split_camel_case() {
    assert_eq!(field_label("name"), "name");
    assert_eq!(field_label("bgImage"), "bg image");
    assert_eq!(field_label("secondaryColor"), "secondary color");
}

use super::*;
use serde_json::json;

fn params(v: serde_json::Value) -> ParameterSet {
    v.as_object().cloned().unwrap()
}

#[test]
fn scatter_is_deterministic_and_in_unit_range() {
    let mut a = Scatter::new(7);
    let mut b = Scatter::new(7);
    for _ in 0..1000 {
        let x = a.next_unit();
        assert!((0.0..1.0).contains(&x));
        assert_eq!(x, b.next_unit());
    }
    assert_ne!(Scatter::new(1).next_unit(), Scatter::new(2).next_unit());
}

#[test]
fn text_width_counts_wide_glyphs_as_full_em() {
    assert_eq!(estimate_text_width("", 10.0), 0.0);
    assert!((estimate_text_width("ab", 10.0) - 11.0).abs() < 1e-12);
    assert_eq!(estimate_text_width("生日", 10.0), 20.0);
}

#[test]
fn grid_spans_canvas() {
    let g = grid(100.0, 50.0, 50.0, "red");
    match &g.kind {
        crate::scene::node::NodeKind::Path { d, stroke, .. } => {
            assert_eq!(d.matches('V').count(), 3);
            assert_eq!(d.matches('H').count(), 2);
            assert_eq!(stroke.as_ref().map(|s| s.color.as_str()), Some("red"));
        }
        other => panic!("expected path, got {other:?}"),
    }
}

#[test]
fn defaults_pass_their_own_schema() {
    for kind in [
        TemplateKind::Birthday,
        TemplateKind::ProductShowcase,
        TemplateKind::DataReport,
        TemplateKind::SocialPromo,
    ] {
        let set = kind.default_params().to_parameter_set().unwrap();
        kind.schema().check(&set).unwrap();
        let typed = TemplateParams::from_params(kind, &set).unwrap();
        assert_eq!(typed.kind(), kind);
        assert_eq!(typed, kind.default_params());
    }
}

#[test]
fn parameter_set_uses_camel_case_keys() {
    let set = TemplateKind::DataReport
        .default_params()
        .to_parameter_set()
        .unwrap();
    assert_eq!(set["primaryColor"], json!("#667EEA"));
    assert_eq!(set["dataPoints"][1]["value"], json!(120.0));
}

#[test]
fn wrong_type_reports_field() {
    let mut set = TemplateKind::Birthday
        .default_params()
        .to_parameter_set()
        .unwrap();
    set.insert("name".to_string(), json!(123));
    let err = TemplateParams::from_params(TemplateKind::Birthday, &set).unwrap_err();
    assert_eq!(err.field(), Some("name"));
}

#[test]
fn optional_image_may_be_omitted_or_null() {
    let base = json!({
        "productName": "p",
        "tagline": "t",
        "price": "$1",
        "features": [],
        "primaryColor": "#123456",
    });
    let typed = TemplateParams::from_params(TemplateKind::ProductShowcase, &params(base.clone())).unwrap();
    let TemplateParams::ProductShowcase(props) = typed else {
        panic!("wrong variant");
    };
    assert_eq!(props.image_url, None);

    let mut with_null = params(base);
    with_null.insert("imageUrl".to_string(), serde_json::Value::Null);
    TemplateParams::from_params(TemplateKind::ProductShowcase, &with_null).unwrap();
}

#[test]
fn nested_record_errors_carry_index() {
    let set = params(json!({
        "title": "t",
        "subtitle": "s",
        "dataPoints": [
            {"label": "a", "value": 1, "color": "#fff"},
            {"label": "b", "value": "lots", "color": "#fff"},
        ],
        "primaryColor": "#000000",
    }));
    let err = TemplateParams::from_params(TemplateKind::DataReport, &set).unwrap_err();
    assert_eq!(err.field(), Some("dataPoints[1].value"));
}

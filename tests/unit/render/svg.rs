use super::*;
use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Vec2};

fn tree(nodes: Vec<Node>) -> RenderTree {
    RenderTree {
        template_id: "t".to_string(),
        frame: FrameIndex(0),
        canvas: Canvas {
            width: 100,
            height: 50,
        },
        background: Paint::solid("#000"),
        nodes,
    }
}

#[test]
fn document_is_sized_to_canvas() {
    let svg = to_svg(&tree(vec![]));
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">"#));
    assert!(svg.contains(r##"<rect width="100" height="50" fill="#000"/>"##));
    assert!(svg.ends_with("</svg>"));
    assert!(!svg.contains("<defs>"));
}

#[test]
fn text_is_escaped() {
    let svg = to_svg(&tree(vec![Node::text(
        "t",
        TextSpec::centered("a < b & \"c\"", Point::new(1.0, 2.0), 10.0, "white"),
    )]));
    assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"), "{svg}");
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn gradients_go_to_defs() {
    let svg = to_svg(&tree(vec![Node::rect(
        "r",
        Rect::new(0.0, 0.0, 10.0, 10.0),
        2.0,
        Paint::linear(90.0, "#fff", "#000"),
    )]));
    assert!(svg.contains(r#"<defs><linearGradient id="lg1" x1="0" y1="0.5" x2="1" y2="0.5">"#), "{svg}");
    assert!(svg.contains(r#"fill="url(#lg1)""#));
}

#[test]
fn css_angles_map_to_box_edges() {
    assert_eq!(num_list(css_angle_endpoints(180.0)), ["0.5", "0", "0.5", "1"]);
    assert_eq!(num_list(css_angle_endpoints(135.0)), ["0", "0", "1", "1"]);
    assert_eq!(num_list(css_angle_endpoints(0.0)), ["0.5", "1", "0.5", "0"]);
}

fn num_list((a, b, c, d): (f64, f64, f64, f64)) -> Vec<String> {
    vec![num(a), num(b), num(c), num(d)]
}

#[test]
fn transparent_nodes_carry_opacity_and_transform() {
    let node = Node::circle("c", Point::new(5.0, 5.0), 2.0, Paint::solid("red"))
        .with_opacity(0.5)
        .with_transform(crate::foundation::core::Transform2D::translate(3.0, 4.0));
    let svg = to_svg(&tree(vec![node]));
    assert!(svg.contains(r#"<g id="c" transform="matrix(1 0 0 1 3 4)" opacity="0.5">"#), "{svg}");
    assert!(svg.contains(r#"<ellipse cx="5" cy="5" rx="2" ry="2" fill="red"/>"#), "{svg}");
}

#[test]
fn empty_paths_are_skipped() {
    let svg = to_svg(&tree(vec![Node::path("p", "", Some(Paint::solid("red")), None)]));
    assert!(!svg.contains("<path"));
    assert!(svg.contains(r#"<g id="p"></g>"#));
}

#[test]
fn images_are_placeholders() {
    let svg = to_svg(&tree(vec![Node::image(
        "i",
        "https://example.com/a.png?x=1&y=2",
        Rect::new(0.0, 0.0, 4.0, 4.0),
        1.0,
    )]));
    assert!(svg.contains(r#"data-href="https://example.com/a.png?x=1&amp;y=2""#), "{svg}");
    assert!(!svg.contains("<image"));
}

#[test]
fn hard_text_shadow_draws_offset_copy_first() {
    let spec = TextSpec::centered("hi", Point::new(0.0, 0.0), 10.0, "red").with_shadow(Shadow {
        offset: Vec2::new(4.0, 4.0),
        blur: 0.0,
        color: "blue".to_string(),
    });
    let svg = to_svg(&tree(vec![Node::text("t", spec)]));
    let blue = svg.find(r#"fill="blue""#).unwrap();
    let red = svg.find(r#"fill="red""#).unwrap();
    assert!(blue < red);
    assert!(svg.contains(r#"<text x="4" y="4""#));
}

#[test]
fn blurred_shadow_uses_filter() {
    let node = Node::rect("r", Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, Paint::solid("white")).with_shadow(Shadow {
        offset: Vec2::new(0.0, 10.0),
        blur: 40.0,
        color: "rgba(0,0,0,0.3)".to_string(),
    });
    let svg = to_svg(&tree(vec![node]));
    assert!(svg.contains(r#"<feDropShadow dx="0" dy="10" stdDeviation="20" flood-color="rgba(0,0,0,0.3)"/>"#), "{svg}");
    assert!(svg.contains(r#"filter="url(#sh1)""#));
}

#[test]
fn numbers_are_compact() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(0.25), "0.25");
    assert_eq!(num(-1e-9), "0");
    assert_eq!(num(f64::NAN), "0");
    assert_eq!(num(1.23456), "1.2346");
}

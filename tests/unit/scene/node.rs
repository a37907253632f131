use super::*;

fn sample_tree() -> RenderTree {
    RenderTree {
        template_id: "t".to_string(),
        frame: FrameIndex(3),
        canvas: Canvas {
            width: 100,
            height: 50,
        },
        background: Paint::solid("#000000"),
        nodes: vec![
            Node::rect("bg", Rect::new(0.0, 0.0, 100.0, 50.0), 0.0, Paint::solid("#fff")),
            Node::group(
                "content",
                vec![
                    Node::text(
                        "label",
                        TextSpec::centered("hi", Point::new(50.0, 25.0), 12.0, "#333"),
                    )
                    .with_opacity(0.5),
                    Node::group(
                        "inner",
                        vec![Node::circle(
                            "dot",
                            Point::ZERO,
                            4.0,
                            Paint::solid("#f00"),
                        )],
                    ),
                ],
            )
            .with_transform(Transform2D::translate(10.0, 0.0)),
        ],
    }
}

#[test]
fn find_walks_nested_groups() {
    let tree = sample_tree();
    assert_eq!(tree.find("label").unwrap().opacity, 0.5);
    assert_eq!(tree.find("label").unwrap().text_content(), Some("hi"));
    assert!(tree.find("dot").is_some());
    assert!(tree.find("missing").is_none());
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn shadow_builder_only_touches_rects() {
    let shadow = Shadow {
        offset: Vec2::new(0.0, 10.0),
        blur: 20.0,
        color: "rgba(0,0,0,0.3)".to_string(),
    };
    let r = Node::rect("r", Rect::new(0.0, 0.0, 1.0, 1.0), 2.0, Paint::solid("#fff"))
        .with_shadow(shadow.clone());
    assert!(matches!(r.kind, NodeKind::Rect { shadow: Some(_), .. }));

    let c = Node::circle("c", Point::ZERO, 1.0, Paint::solid("#fff")).with_shadow(shadow);
    assert!(matches!(c.kind, NodeKind::Ellipse { .. }));
}

#[test]
fn serializes_with_type_tags() {
    let v = serde_json::to_value(sample_tree()).unwrap();
    assert_eq!(v["nodes"][0]["kind"]["type"], "rect");
    assert_eq!(v["nodes"][1]["kind"]["type"], "group");
    assert_eq!(v["background"]["type"], "solid");
}

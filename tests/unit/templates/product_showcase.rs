use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::scene::node::NodeKind;

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        fps: Fps(30),
        duration: 180,
    }
}

fn find<'a>(frame: &'a TemplateFrame, id: &str) -> &'a Node {
    frame
        .nodes
        .iter()
        .find_map(|n| n.find(id))
        .unwrap_or_else(|| panic!("node {id} missing"))
}

fn has(frame: &TemplateFrame, id: &str) -> bool {
    frame.nodes.iter().any(|n| n.find(id).is_some())
}

#[test]
fn title_rises_into_place() {
    let start = build(&defaults(), &ctx(10));
    assert_eq!(find(&start, "title").opacity, 0.0);
    assert_eq!(find(&start, "title").transform.translate.y, 100.0);

    let end = build(&defaults(), &ctx(40));
    assert_eq!(find(&end, "title").opacity, 1.0);
    assert_eq!(find(&end, "title").transform.translate.y, 0.0);
    assert_eq!(find(&end, "title-text").text_content(), Some("超级产品"));
}

#[test]
fn features_stagger_by_fifteen_frames() {
    assert_eq!(feature_window(0), (60.0, 75.0));
    assert_eq!(feature_window(2), (90.0, 105.0));

    let out = build(&defaults(), &ctx(75));
    assert_eq!(find(&out, "feature-0").opacity, 1.0);
    assert_eq!(find(&out, "feature-0").transform.translate.x, 0.0);
    assert_eq!(find(&out, "feature-1").opacity, 0.0);
    assert_eq!(find(&out, "feature-1").transform.translate.x, -50.0);
    assert_eq!(find(&out, "feature-2-text").text_content(), Some("超值"));
}

#[test]
fn feature_count_follows_params() {
    let mut p = defaults();
    p.features = vec!["a".to_string()];
    let out = build(&p, &ctx(100));
    assert!(has(&out, "feature-0"));
    assert!(!has(&out, "feature-1"));

    p.features.clear();
    let out = build(&p, &ctx(100));
    assert!(find(&out, "features").children().is_empty());
}

#[test]
fn price_pops_in_late() {
    let early = build(&defaults(), &ctx(119));
    assert_eq!(find(&early, "price").opacity, 0.0);
    assert_eq!(find(&early, "price").transform.scale.x, 0.8);

    let late = build(&defaults(), &ctx(150));
    assert_eq!(find(&late, "price").opacity, 1.0);
    assert_eq!(find(&late, "price").transform.scale.x, 1.0);
    assert_eq!(find(&late, "price-value").text_content(), Some("¥99"));
    assert_eq!(find(&late, "price-label").text_content(), Some("仅售"));
}

#[test]
fn card_tilts_across_whole_timeline() {
    let first = build(&defaults(), &ctx(0));
    let last = build(&defaults(), &ctx(180));
    assert!((find(&first, "showcase").transform.rotation_rad + 5f64.to_radians()).abs() < 1e-12);
    assert!((find(&last, "showcase").transform.rotation_rad - 5f64.to_radians()).abs() < 1e-12);
}

#[test]
fn placeholder_without_image() {
    let out = build(&defaults(), &ctx(60));
    assert!(has(&out, "product-placeholder"));
    assert!(!has(&out, "product-image"));
}

#[test]
fn image_url_replaces_placeholder() {
    let mut p = defaults();
    p.image_url = Some("https://example.com/p.png".to_string());
    let out = build(&p, &ctx(60));
    assert!(!has(&out, "product-placeholder"));
    match &find(&out, "product-image").kind {
        NodeKind::Image { href, .. } => assert_eq!(href, "https://example.com/p.png"),
        other => panic!("expected image, got {other:?}"),
    }
}

#[test]
fn empty_image_url_counts_as_absent() {
    let mut p = defaults();
    p.image_url = None;
    assert_eq!(p.image(), None);
    p.image_url = Some(String::new());
    assert_eq!(p.image(), None);
}

#[test]
fn glow_and_cta_follow_their_windows() {
    let out = build(&defaults(), &ctx(60));
    let glow = find(&out, "product-glow");
    assert_eq!(glow.opacity, 0.5);
    assert_eq!(glow.transform.scale.x, 1.2);
    assert_eq!(find(&out, "cta").opacity, 0.0);

    let end = build(&defaults(), &ctx(170));
    assert_eq!(find(&end, "cta").opacity, 1.0);
    assert_eq!(find(&end, "cta-text").text_content(), Some("立即购买 →"));
}

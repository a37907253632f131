use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex};

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        canvas: Canvas {
            width: 1080,
            height: 1350,
        },
        fps: Fps(30),
        duration: 120,
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
fn pulse_peaks_at_thirty_and_settles() {
    let pulse = pulse_curve().unwrap();
    assert_eq!(pulse.sample(0.0), 1.0);
    assert!((pulse.sample(30.0) - 1.1).abs() < 1e-12);
    assert!((pulse.sample(60.0) - 1.0).abs() < 1e-12);
    assert_eq!(pulse.sample(90.0), 1.0);
    assert!(pulse.sample(15.0) > 1.0 && pulse.sample(15.0) < 1.1);

    let out = build(&defaults(), &ctx(30)).unwrap();
    assert!((find(&out, "discount-card").transform.scale.x - 1.1).abs() < 1e-12);
}

#[test]
fn discount_springs_in_between_fifteen_and_thirty_five() {
    let before = build(&defaults(), &ctx(15)).unwrap();
    assert_eq!(find(&before, "discount").transform.scale.x, 0.0);
    assert_eq!(find(&before, "discount").opacity, 0.0);

    let after = build(&defaults(), &ctx(35)).unwrap();
    assert_eq!(find(&after, "discount").transform.scale.x, 1.0);
    assert_eq!(find(&after, "discount").opacity, 1.0);
    assert_eq!(find(&after, "discount-text").text_content(), Some("50% OFF"));
}

#[test]
fn headline_and_badge_enter_first() {
    let start = build(&defaults(), &ctx(0)).unwrap();
    assert_eq!(find(&start, "headline").opacity, 0.0);
    assert_eq!(find(&start, "headline").transform.translate.y, 100.0);
    assert_eq!(find(&start, "badge").transform.translate.y, -20.0);

    let settled = build(&defaults(), &ctx(20)).unwrap();
    assert_eq!(find(&settled, "headline").opacity, 1.0);
    assert_eq!(find(&settled, "badge").opacity, 1.0);
    assert_eq!(find(&settled, "headline-text").text_content(), Some("限时优惠！"));
}

#[test]
fn cta_appends_arrow_and_slides_up() {
    let early = build(&defaults(), &ctx(35)).unwrap();
    assert_eq!(find(&early, "cta").opacity, 0.0);
    assert_eq!(find(&early, "cta").transform.translate.y, 30.0);

    let late = build(&defaults(), &ctx(50)).unwrap();
    assert_eq!(find(&late, "cta").opacity, 1.0);
    assert_eq!(find(&late, "cta").transform.translate.y, 0.0);
    assert_eq!(find(&late, "cta-text").text_content(), Some("立即抢购 →"));
}

#[test]
fn urgency_and_trust_badges_fade_in_late() {
    let out = build(&defaults(), &ctx(50)).unwrap();
    assert_eq!(find(&out, "urgency").opacity, 0.0);
    assert_eq!(find(&out, "trust").opacity, 0.0);

    let out = build(&defaults(), &ctx(100)).unwrap();
    assert_eq!(find(&out, "urgency").opacity, 1.0);
    assert_eq!(find(&out, "trust").opacity, 1.0);
    assert_eq!(find(&out, "trust").children().len(), 3);
    assert_eq!(find(&out, "trust-1").text_content(), Some("🚚 快速发货"));
}

#[test]
fn particles_rise_from_below() {
    let out = build(&defaults(), &ctx(0)).unwrap();
    let particles = find(&out, "particles").children();
    assert_eq!(particles.len(), 15);

    assert_eq!(particles[0].opacity, 0.3);
    assert!((particles[4].opacity - 0.7).abs() < 1e-12);
    match &particles[2].kind {
        crate::scene::node::NodeKind::Ellipse { center, radii, .. } => {
            assert_eq!(radii.x, 4.0);
            assert_eq!(center.x, 0.14 * 1080.0 + 4.0);
            assert_eq!(center.y, 1.2 * 1350.0 + 4.0);
        }
        other => panic!("expected ellipse, got {other:?}"),
    }
}

#[test]
fn background_image_swaps_gradient_for_dimmed_photo() {
    let out = build(&defaults(), &ctx(10)).unwrap();
    assert!(!has(&out, "background-image"));
    assert!(matches!(out.background, Paint::Linear { .. }));

    let mut p = defaults();
    p.bg_image = Some("https://example.com/bg.jpg".to_string());
    let out = build(&p, &ctx(10)).unwrap();
    assert_eq!(out.nodes[0].id, "background-image");
    assert_eq!(out.nodes[1].id, "background-dim");
}

#[test]
fn shine_sweeps_across() {
    let a = build(&defaults(), &ctx(0)).unwrap();
    let b = build(&defaults(), &ctx(60)).unwrap();
    assert_ne!(find(&a, "discount-shine"), find(&b, "discount-shine"));
}

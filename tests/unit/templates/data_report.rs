use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::scene::node::NodeKind;

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        canvas: Canvas {
            width: 1080,
            height: 1080,
        },
        fps: Fps(30),
        duration: 200,
    }
}

fn point(label: &str, value: f64) -> DataPoint {
    DataPoint {
        label: label.to_string(),
        value,
        color: HexColor::from_rgb(0x11, 0x22, 0x33),
    }
}

fn find<'a>(frame: &'a TemplateFrame, id: &str) -> &'a Node {
    frame
        .nodes
        .iter()
        .find_map(|n| n.find(id))
        .unwrap_or_else(|| panic!("node {id} missing"))
}

fn path_data<'a>(node: &'a Node) -> &'a str {
    match &node.kind {
        NodeKind::Path { d, .. } => d,
        other => panic!("expected path, got {other:?}"),
    }
}

#[test]
fn segments_partition_full_circle_in_input_order() {
    let segs = arc_segments(&defaults().data_points);
    assert_eq!(segs.len(), 3);
    assert_eq!(
        segs.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
        ["营收", "用户", "利润"]
    );
    assert_eq!(segs[0].start_angle, -90.0);
    for pair in segs.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
    let swept: f64 = segs.iter().map(ArcSegment::sweep).sum();
    assert!((swept - 360.0).abs() < 1e-9);
    assert!((segs[2].end_angle - 270.0).abs() < 1e-9);
    assert!((segs[1].sweep() - 160.0).abs() < 1e-9);
}

#[test]
fn huge_values_still_partition_full_circle() {
    let segs = arc_segments(&[point("a", 1e308), point("b", 1e308), point("c", -1e307)]);
    let swept: f64 = segs.iter().map(|s| s.sweep()).sum();
    assert!((swept - 360.0).abs() < 1e-9, "swept {swept}");
    assert!((segs[0].sweep() - segs[1].sweep()).abs() < 1e-9);
    assert_eq!(segs[0].percentage, 53);
}

#[test]
fn percentages_round_half_up() {
    let segs = arc_segments(&defaults().data_points);
    assert_eq!(
        segs.iter().map(|s| s.percentage).collect::<Vec<_>>(),
        [31, 44, 24]
    );

    let halves = arc_segments(&[point("a", 1.0), point("b", 7.0)]);
    assert_eq!(halves[0].percentage, 13);
    assert_eq!(halves[1].percentage, 88);
}

#[test]
fn zero_total_yields_empty_segments() {
    let segs = arc_segments(&[point("a", 0.0), point("b", 0.0)]);
    assert_eq!(segs.len(), 2);
    for s in &segs {
        assert_eq!(s.start_angle, -90.0);
        assert_eq!(s.sweep(), 0.0);
        assert_eq!(s.percentage, 0);
    }
}

#[test]
fn empty_input_yields_no_segments() {
    assert!(arc_segments(&[]).is_empty());
}

#[test]
fn segment_keeps_color_spelling() {
    let p = DataPoint {
        label: "x".to_string(),
        value: 1.0,
        color: HexColor::parse("#abc").unwrap(),
    };
    assert_eq!(arc_segments(&[p])[0].color, "#abc");
}

#[test]
fn revealed_end_scales_sweep() {
    let seg = &arc_segments(&[point("a", 1.0), point("b", 1.0)])[0];
    assert_eq!(seg.revealed_end(0.0), -90.0);
    assert_eq!(seg.revealed_end(0.5), 0.0);
    assert_eq!(seg.revealed_end(1.0), 90.0);
}

#[test]
fn wedges_reveal_on_staggered_windows() {
    assert_eq!(segment_window(0), (40.0, 70.0));
    assert_eq!(segment_window(2), (80.0, 110.0));

    let start = build(&defaults(), &ctx(40));
    assert!(path_data(find(&start, "segment-0")).is_empty());

    let mid = build(&defaults(), &ctx(70));
    assert!(!path_data(find(&mid, "segment-0")).is_empty());
    assert!(!path_data(find(&mid, "segment-1")).is_empty());
    assert!(path_data(find(&mid, "segment-2")).is_empty());

    let done = build(&defaults(), &ctx(199));
    for i in 0..3 {
        assert!(!path_data(find(&done, &format!("segment-{i}"))).is_empty());
    }
}

#[test]
fn wedge_path_starts_at_center_and_closes() {
    let d = wedge_path(Point::new(300.0, 300.0), 280.0, -90.0, 0.0);
    assert!(d.starts_with('M'), "{d}");
    assert!(d.contains('L') && d.contains('C'), "{d}");
    assert!(d.trim_end().ends_with('Z'), "{d}");
}

#[test]
fn total_and_legend_fade_in_late() {
    let early = build(&defaults(), &ctx(90));
    assert_eq!(find(&early, "total-value").opacity, 0.0);
    assert_eq!(find(&early, "legend-0").opacity, 0.0);
    assert_eq!(find(&early, "total-value").text_content(), Some("270"));

    let late = build(&defaults(), &ctx(160));
    assert_eq!(find(&late, "total-value").opacity, 1.0);
    assert_eq!(find(&late, "total-label").text_content(), Some("总计"));
    for i in 0..3 {
        assert_eq!(find(&late, &format!("legend-{i}")).opacity, 1.0);
    }
    assert_eq!(find(&late, "legend-1-percentage").text_content(), Some("44%"));
    assert_eq!(find(&late, "legend-2-label").text_content(), Some("利润"));
}

#[test]
fn legend_slides_up_twenty_pixels() {
    let before = build(&defaults(), &ctx(0));
    let after = build(&defaults(), &ctx(199));
    let dy = find(&before, "legend-0").transform.translate.y
        - find(&after, "legend-0").transform.translate.y;
    assert!((dy - 20.0).abs() < 1e-9);
}

use crate::animation::ease::{Curve, Ease};
use crate::animation::interpolate::tween;
use crate::foundation::core::{BezPath, Point, Rect, Transform2D, Vec2};
use crate::params::color::HexColor;
use crate::params::schema::{FieldKind, FieldSpec, Schema};
use crate::scene::node::{GradientStop, Node, Paint, Stroke, TextAnchor, TextSpec};
use crate::templates::{FrameCtx, TemplateFrame, baseline, estimate_text_width, grid};

const DATA_POINT: &[FieldSpec] = &[
    FieldSpec::required("label", FieldKind::String),
    FieldSpec::required("value", FieldKind::Number),
    FieldSpec::required("color", FieldKind::Color),
];

pub(crate) const SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("subtitle", FieldKind::String),
        FieldSpec::required("dataPoints", FieldKind::RecordList(DATA_POINT)),
        FieldSpec::required("primaryColor", FieldKind::Color),
    ],
};

/// One labeled value of the chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataPoint {
    /// Legend label.
    pub label: String,
    /// Weight of the wedge.
    pub value: f64,
    /// Wedge and swatch color.
    pub color: HexColor,
}

/// Parameters of the `data-report` template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataReportProps {
    /// Heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Chart data in display order.
    pub data_points: Vec<DataPoint>,
    /// Halo and total color.
    pub primary_color: HexColor,
}

pub(crate) fn defaults() -> DataReportProps {
    DataReportProps {
        title: "2024年度报告".to_string(),
        subtitle: "公司业绩增长情况".to_string(),
        data_points: vec![
            DataPoint {
                label: "营收".to_string(),
                value: 85.0,
                color: HexColor::from_rgb(0xFF, 0x6B, 0x6B),
            },
            DataPoint {
                label: "用户".to_string(),
                value: 120.0,
                color: HexColor::from_rgb(0x4E, 0xCD, 0xC4),
            },
            DataPoint {
                label: "利润".to_string(),
                value: 65.0,
                color: HexColor::from_rgb(0xFF, 0xE6, 0x6D),
            },
        ],
        primary_color: HexColor::from_rgb(0x66, 0x7E, 0xEA),
    }
}

/// Angle where the first wedge starts: straight up.
pub const START_ANGLE_DEG: f64 = -90.0;

/// Wedge of the donut chart, angles in degrees clockwise from +x.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArcSegment {
    /// Legend label.
    pub label: String,
    /// Source value.
    pub value: f64,
    /// Wedge color as provided.
    pub color: String,
    /// Where the wedge begins.
    pub start_angle: f64,
    /// Where the wedge ends at full reveal.
    pub end_angle: f64,
    /// Share of the total rounded to a whole percent (halves round up).
    pub percentage: i64,
}

impl ArcSegment {
    /// Full angular extent.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// End angle after revealing `progress` of the sweep.
    pub fn revealed_end(&self, progress: f64) -> f64 {
        self.start_angle + self.sweep() * progress
    }
}

/// Partition 360° across `points` proportionally to their values, in input order.
///
/// A zero total yields zero-width segments rather than dividing by zero. Values are scaled by
/// the largest magnitude before summing, so huge finite values cannot overflow the total.
pub fn arc_segments(points: &[DataPoint]) -> Vec<ArcSegment> {
    let scale = points.iter().map(|p| p.value.abs()).fold(0.0, f64::max);
    let scaled = |v: f64| if scale > 0.0 { v / scale } else { 0.0 };
    let total: f64 = points.iter().map(|p| scaled(p.value)).sum();
    let mut current = START_ANGLE_DEG;
    points
        .iter()
        .map(|p| {
            let share = if total == 0.0 { 0.0 } else { scaled(p.value) / total };
            let start = current;
            current += share * 360.0;
            ArcSegment {
                label: p.label.clone(),
                value: p.value,
                color: p.color.as_str().to_owned(),
                start_angle: start,
                end_angle: current,
                percentage: (share * 100.0 + 0.5).floor() as i64,
            }
        })
        .collect()
}

const MAX_RADIUS: f64 = 300.0;
const STROKE_WIDTH: f64 = 40.0;
const GRID_STEP: f64 = 40.0;
const ARC_TOLERANCE: f64 = 0.1;

/// Reveal window of wedge `i`: starts `40 + 20i`, lasts 30 frames.
pub(crate) fn segment_window(i: usize) -> (f64, f64) {
    let delay = 40.0 + 20.0 * i as f64;
    (delay, delay + 30.0)
}

/// Reveal window of legend entry `i`: starts `120 + 10i`, lasts 20 frames.
pub(crate) fn legend_window(i: usize) -> (f64, f64) {
    let delay = 120.0 + 10.0 * i as f64;
    (delay, delay + 20.0)
}

pub(crate) fn build(p: &DataReportProps, ctx: &FrameCtx) -> TemplateFrame {
    let f = ctx.f();
    let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
    let center = ctx.canvas.center();
    let primary = p.primary_color.as_str();

    let title_opacity = tween(f, (0.0, 20.0), 0.0, 1.0, Ease::LINEAR);
    let subtitle_opacity = tween(f, (15.0, 35.0), 0.0, 1.0, Ease::LINEAR);
    let halo_scale = tween(f, (0.0, 60.0), 0.8, 1.2, Ease::LINEAR);
    let total_opacity = tween(f, (100.0, 120.0), 0.0, 1.0, Ease::LINEAR);

    let total: f64 = p.data_points.iter().map(|d| d.value).sum();
    let segments = arc_segments(&p.data_points);

    let halo_r = MAX_RADIUS + 50.0;
    let halo = Node::rect(
        "halo",
        Rect::new(
            center.x - halo_r,
            center.y - halo_r,
            center.x + halo_r,
            center.y + halo_r,
        ),
        halo_r,
        Paint::glow(p.primary_color.tint(0x22), 0.7),
    )
    .with_transform(
        Transform2D::default()
            .with_scale(halo_scale)
            .with_anchor(center.x, center.y),
    );

    let heading = Node::group(
        "heading",
        vec![
            Node::text(
                "title",
                TextSpec::centered(p.title.as_str(), Point::new(w / 2.0, baseline(89.0, 48.0)), 48.0, "white")
                    .bold(),
            )
            .with_opacity(title_opacity),
            Node::text(
                "subtitle",
                TextSpec::centered(
                    p.subtitle.as_str(),
                    Point::new(w / 2.0, baseline(142.0, 24.0)),
                    24.0,
                    "rgba(255,255,255,0.6)",
                ),
            )
            .with_opacity(subtitle_opacity),
        ],
    );

    // Chart-local space: a MAX_RADIUS*2 square whose center is the ring center.
    let ring_center = Point::new(MAX_RADIUS, MAX_RADIUS);
    let radius = MAX_RADIUS - STROKE_WIDTH / 2.0;
    let mut chart = vec![Node::ring(
        "ring-track",
        ring_center,
        radius,
        Stroke {
            color: "rgba(255,255,255,0.1)".to_string(),
            width: STROKE_WIDTH,
        },
    )];
    for (i, seg) in segments.iter().enumerate() {
        let (a, b) = segment_window(i);
        let progress = tween(f, (a, b), 0.0, 1.0, Ease::out(Curve::Cubic));
        let d = if progress > 0.0 && seg.sweep() != 0.0 {
            wedge_path(ring_center, radius, seg.start_angle, seg.revealed_end(progress))
        } else {
            String::new()
        };
        chart.push(
            Node::path(format!("segment-{i}"), d, Some(Paint::solid(seg.color.as_str())), None)
                .with_opacity(0.9),
        );
    }
    chart.push(Node::circle(
        "ring-hole",
        ring_center,
        MAX_RADIUS - STROKE_WIDTH - 20.0,
        Paint::solid("#0f0f23"),
    ));
    chart.push(
        Node::text(
            "total-label",
            TextSpec::centered("总计", Point::new(MAX_RADIUS, MAX_RADIUS - 20.0), 24.0, "white").bold(),
        )
        .with_opacity(total_opacity),
    );
    chart.push(
        Node::text(
            "total-value",
            TextSpec::centered(total.to_string(), Point::new(MAX_RADIUS, MAX_RADIUS + 40.0), 48.0, primary)
                .bold(),
        )
        .with_opacity(total_opacity),
    );
    let chart = Node::group("chart", chart).with_transform(Transform2D::translate(
        center.x - MAX_RADIUS,
        center.y - MAX_RADIUS - 20.0,
    ));

    TemplateFrame {
        background: Paint::Linear {
            angle_deg: 135.0,
            stops: vec![
                GradientStop::new(0.0, "#0f0f23"),
                GradientStop::new(0.5, "#1a1a3e"),
                GradientStop::new(1.0, "#16213e"),
            ],
        },
        nodes: vec![
            grid(w, h, GRID_STEP, "rgba(255,255,255,0.02)"),
            halo,
            heading,
            chart,
            legend(&segments, f, w, h),
        ],
    }
}

/// Pie wedge from the center out to an arc between two angles (degrees).
pub(crate) fn wedge_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let start = start_deg.to_radians();
    let sweep = (end_deg - start_deg).to_radians();
    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(center + Vec2::new(radius * start.cos(), radius * start.sin()));
    let arc = kurbo::Arc::new(center, Vec2::new(radius, radius), start, sweep, 0.0);
    path.extend(arc.append_iter(ARC_TOLERANCE));
    path.close_path();
    path.to_svg()
}

fn legend(segments: &[ArcSegment], f: f64, w: f64, h: f64) -> Node {
    const SWATCH: f64 = 20.0;
    const GAP: f64 = 40.0;
    const INNER_GAP: f64 = 12.0;
    const ITEM_H: f64 = 18.0 * 1.2 + 14.0 * 1.2;

    let widths: Vec<f64> = segments
        .iter()
        .map(|s| {
            let pct = estimate_text_width(&format!("{}%", s.percentage), 18.0);
            let label = estimate_text_width(&s.label, 14.0);
            SWATCH + INNER_GAP + pct.max(label)
        })
        .collect();
    let row_w = widths.iter().sum::<f64>() + GAP * widths.len().saturating_sub(1) as f64;
    let top = h - 80.0 - ITEM_H;

    let mut x = (w - row_w) / 2.0;
    let mut items = Vec::with_capacity(segments.len());
    for (i, (seg, item_w)) in segments.iter().zip(&widths).enumerate() {
        let window = legend_window(i);
        let opacity = tween(f, window, 0.0, 1.0, Ease::LINEAR);
        let dy = tween(f, window, 20.0, 0.0, Ease::out(Curve::Ease));
        let text_x = SWATCH + INNER_GAP;
        items.push(
            Node::group(
                format!("legend-{i}"),
                vec![
                    Node::rect(
                        format!("legend-{i}-swatch"),
                        Rect::new(0.0, (ITEM_H - SWATCH) / 2.0, SWATCH, (ITEM_H + SWATCH) / 2.0),
                        4.0,
                        Paint::solid(seg.color.as_str()),
                    ),
                    Node::text(
                        format!("legend-{i}-percentage"),
                        TextSpec::centered(
                            format!("{}%", seg.percentage),
                            Point::new(text_x, baseline(18.0 * 0.6, 18.0)),
                            18.0,
                            "white",
                        )
                        .bold()
                        .anchored(TextAnchor::Start),
                    ),
                    Node::text(
                        format!("legend-{i}-label"),
                        TextSpec::centered(
                            seg.label.as_str(),
                            Point::new(text_x, baseline(18.0 * 1.2 + 14.0 * 0.6, 14.0)),
                            14.0,
                            "rgba(255,255,255,0.6)",
                        )
                        .anchored(TextAnchor::Start),
                    ),
                ],
            )
            .with_transform(Transform2D::translate(x, top + dy))
            .with_opacity(opacity),
        );
        x += item_w + GAP;
    }
    Node::group("legend", items)
}

#[cfg(test)]
#[path = "../../tests/unit/templates/data_report.rs"]
mod tests;

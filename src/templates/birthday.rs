use crate::animation::ease::{Curve, Ease};
use crate::animation::interpolate::tween;
use crate::foundation::core::{Point, Rect, Transform2D, Vec2};
use crate::params::color::HexColor;
use crate::params::schema::{FieldKind, FieldSpec, Schema};
use crate::scene::node::{GradientStop, Node, Paint, Shadow, Stroke, TextSpec};
use crate::templates::{FrameCtx, Scatter, TemplateFrame, baseline, estimate_text_width};

pub(crate) const SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("age", FieldKind::Number),
        FieldSpec::required("message", FieldKind::String),
        FieldSpec::required("primaryColor", FieldKind::Color),
        FieldSpec::required("secondaryColor", FieldKind::Color),
    ],
};

/// Parameters of the `birthday` template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BirthdayProps {
    /// Person being celebrated.
    pub name: String,
    /// Age shown in the middle of the card.
    pub age: f64,
    /// Greeting in the message bubble.
    pub message: String,
    /// Title, balloons and accents.
    pub primary_color: HexColor,
    /// Age digits, shadows and alternate balloons.
    pub secondary_color: HexColor,
}

pub(crate) fn defaults() -> BirthdayProps {
    BirthdayProps {
        name: "小明".to_string(),
        age: 25.0,
        message: "祝你生日快乐，天天开心！".to_string(),
        primary_color: HexColor::from_rgb(0xFF, 0x6B, 0x6B),
        secondary_color: HexColor::from_rgb(0xFF, 0xE6, 0x6D),
    }
}

const BALLOON_COUNT: usize = 8;
const BALLOON_W: f64 = 80.0;
const BALLOON_H: f64 = 100.0;
const DOT_COUNT: usize = 20;
const DOT_SEED: u64 = 0xB1D7_0DA7;

pub(crate) fn build(p: &BirthdayProps, ctx: &FrameCtx) -> TemplateFrame {
    let f = ctx.f();
    let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
    let primary = p.primary_color.as_str();
    let secondary = p.secondary_color.as_str();

    let title_opacity = tween(f, (0.0, 15.0), 0.0, 1.0, Ease::out(Curve::Ease));
    let title_y = tween(f, (0.0, 20.0), 50.0, 0.0, Ease::out(Curve::Back(1.5)));
    let age_scale = tween(f, (20.0, 35.0), 0.0, 1.0, Ease::out(Curve::Elastic(1.0)));
    let message_opacity = tween(f, (40.0, 55.0), 0.0, 1.0, Ease::out(Curve::Ease));
    let balloon_y = tween(f, (0.0, ctx.duration_f()), h + 100.0, -200.0, Ease::LINEAR);
    let cake_opacity = tween(f, (80.0, 95.0), 0.0, 1.0, Ease::LINEAR);
    let cake_scale = tween(f, (80.0, 100.0), 0.5, 1.0, Ease::out(Curve::Elastic(1.0)));

    let mut scatter = Scatter::new(DOT_SEED);
    let dots = (0..DOT_COUNT)
        .map(|i| {
            let cx = scatter.next_unit() * w;
            let cy = scatter.next_unit() * h;
            let r = scatter.next_unit() * 30.0 + 10.0;
            let color = if i % 2 == 0 { primary } else { secondary };
            Node::circle(format!("dot-{i}"), Point::new(cx, cy), r, Paint::solid(color))
        })
        .collect();

    let balloons = (0..BALLOON_COUNT)
        .map(|i| {
            let fi = i as f64;
            let color = if i % 2 == 0 {
                &p.primary_color
            } else {
                &p.secondary_color
            };
            let x = w / 9.0 * (fi + 1.0);
            let top = balloon_y + fi * 10.0 * 3.0;
            let sway_deg = (f * 0.02 + fi).sin() * 10.0;
            let string_bend = 40.0 + (f * 0.05 + fi).sin() * 5.0;

            let body = Node::ellipse(
                format!("balloon-{i}-body"),
                Point::new(BALLOON_W / 2.0, BALLOON_H / 2.0),
                Vec2::new(BALLOON_W / 2.0, BALLOON_H / 2.0),
                Paint::Radial {
                    center: Point::new(0.3, 0.3),
                    radius: 0.7,
                    stops: vec![
                        GradientStop::new(0.0, color.tint(0x88)),
                        GradientStop::new(1.0, color.as_str()),
                    ],
                },
            );
            let string = Node::path(
                format!("balloon-{i}-string"),
                format!("M 40 95 Q {string_bend} 125 40 155"),
                None,
                Some(Stroke {
                    color: color.as_str().to_owned(),
                    width: 2.0,
                }),
            );

            Node::group(format!("balloon-{i}"), vec![body, string]).with_transform(
                Transform2D::translate(x - BALLOON_W / 2.0, top)
                    .with_rotation_deg(sway_deg)
                    .with_anchor(BALLOON_W / 2.0, BALLOON_H / 2.0),
            )
        })
        .collect();

    // Column laid out top-down around x = 0, then centered on the canvas.
    let title_line = 96.0;
    let name_line = 72.0;
    let age_line = 144.0;
    let caption_line = 48.0;
    let bubble_h = 36.0 * 1.6 + 40.0;
    let cake_line = 120.0;

    let mut y = 0.0;
    let title_center = y + title_line / 2.0;
    y += title_line + 20.0;
    let name_center = y + name_line / 2.0;
    y += name_line + 30.0;
    let age_top = y;
    let age_center = y + age_line / 2.0;
    y += age_line + 30.0;
    let caption_center = y + caption_line / 2.0;
    y += caption_line;
    let age_block_center = (age_top + y) / 2.0;
    y += 50.0;
    let bubble_top = y;
    y += bubble_h + 40.0;
    let cake_center = y + cake_line / 2.0;
    y += cake_line;
    let column_h = y;

    let title = Node::group(
        "title",
        vec![Node::text(
            "title-text",
            TextSpec::centered(
                "Happy Birthday",
                Point::new(0.0, baseline(title_center, 80.0)),
                80.0,
                primary,
            )
            .bold()
            .with_shadow(hard_shadow(secondary)),
        )],
    )
    .with_transform(Transform2D::translate(0.0, title_y))
    .with_opacity(title_opacity);

    let name = Node::group(
        "name",
        vec![Node::text(
            "name-text",
            TextSpec::centered(
                p.name.as_str(),
                Point::new(0.0, baseline(name_center, 60.0)),
                60.0,
                "#333",
            ),
        )],
    )
    .with_transform(Transform2D::translate(0.0, title_y))
    .with_opacity(title_opacity);

    let age = Node::group(
        "age",
        vec![
            Node::text(
                "age-value",
                TextSpec::centered(
                    p.age.to_string(),
                    Point::new(0.0, baseline(age_center, 120.0)),
                    120.0,
                    secondary,
                )
                .bold()
                .with_shadow(hard_shadow(primary)),
            ),
            Node::text(
                "age-caption",
                TextSpec::centered(
                    "岁生日快乐！",
                    Point::new(0.0, baseline(caption_center, 40.0)),
                    40.0,
                    "#666",
                ),
            ),
        ],
    )
    .with_transform(
        Transform2D::default()
            .with_scale(age_scale)
            .with_anchor(0.0, age_block_center),
    )
    .with_opacity(age_scale);

    let bubble_w = (estimate_text_width(&p.message, 36.0) + 80.0).min(800.0);
    let message = Node::group(
        "message",
        vec![
            Node::rect(
                "message-bubble",
                Rect::new(
                    -bubble_w / 2.0,
                    bubble_top,
                    bubble_w / 2.0,
                    bubble_top + bubble_h,
                ),
                20.0,
                Paint::solid("rgba(255,255,255,0.9)"),
            ),
            Node::text(
                "message-text",
                TextSpec::centered(
                    p.message.as_str(),
                    Point::new(0.0, baseline(bubble_top + bubble_h / 2.0, 36.0)),
                    36.0,
                    "#444",
                ),
            ),
        ],
    )
    .with_opacity(message_opacity);

    let cake = Node::text(
        "cake",
        TextSpec::centered("🎂", Point::new(0.0, baseline(cake_center, 100.0)), 100.0, "#000"),
    )
    .with_transform(
        Transform2D::default()
            .with_scale(cake_scale)
            .with_anchor(0.0, cake_center),
    )
    .with_opacity(cake_opacity);

    let content = Node::group("content", vec![title, name, age, message, cake])
        .with_transform(Transform2D::translate(w / 2.0, h / 2.0 - column_h / 2.0));

    TemplateFrame {
        background: Paint::linear(135.0, p.primary_color.tint(0x22), p.secondary_color.tint(0x22)),
        nodes: vec![
            Node::group("background-dots", dots).with_opacity(0.1),
            Node::group("balloons", balloons),
            content,
        ],
    }
}

fn hard_shadow(color: &str) -> Shadow {
    Shadow {
        offset: Vec2::new(4.0, 4.0),
        blur: 0.0,
        color: color.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/birthday.rs"]
mod tests;

use crate::animation::ease::{Curve, Ease};
use crate::animation::interpolate::{AnimationCurve, tween};
use crate::foundation::core::{Point, Rect, Transform2D, Vec2};
use crate::foundation::error::VideoGenResult;
use crate::params::color::HexColor;
use crate::params::schema::{FieldKind, FieldSpec, Schema};
use crate::scene::node::{GradientStop, Node, Paint, Shadow, TextSpec};
use crate::templates::{FrameCtx, TemplateFrame, baseline, estimate_text_width};

pub(crate) const SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("headline", FieldKind::String),
        FieldSpec::required("discount", FieldKind::String),
        FieldSpec::required("cta", FieldKind::String),
        FieldSpec::optional("bgImage", FieldKind::String),
        FieldSpec::required("primaryColor", FieldKind::Color),
    ],
};

/// Parameters of the `social-promo` template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialPromoProps {
    /// Main line.
    pub headline: String,
    /// Offer text on the gold card.
    pub discount: String,
    /// Button label; an arrow is appended.
    pub cta: String,
    /// Background photo, dimmed; an empty or absent URL draws a gradient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    /// Accent and gradient color.
    pub primary_color: HexColor,
}

impl SocialPromoProps {
    /// Background URL when one was actually provided.
    pub fn background_image(&self) -> Option<&str> {
        self.bg_image.as_deref().filter(|u| !u.is_empty())
    }
}

pub(crate) fn defaults() -> SocialPromoProps {
    SocialPromoProps {
        headline: "限时优惠！".to_string(),
        discount: "50% OFF".to_string(),
        cta: "立即抢购".to_string(),
        bg_image: Some(String::new()),
        primary_color: HexColor::from_rgb(0xFF, 0x00, 0x6E),
    }
}

const PARTICLE_COUNT: usize = 15;
const SHINE_W: f64 = 100.0;
const SHINE_SKEW_DEG: f64 = 20.0;
const TRUST_BADGES: [&str; 3] = ["✅ 正品保证", "🚚 快速发货", "💯 售后无忧"];
const URGENCY: &str = "⚡ 优惠即将结束，手慢无！";
const BADGE: &str = "🔥 限时特惠";

/// Breathing scale of the discount card: up 10% by frame 30, back by frame 60, then still.
pub(crate) fn pulse_curve() -> VideoGenResult<AnimationCurve> {
    Ok(AnimationCurve::new([0.0, 30.0, 60.0], [1.0, 1.1, 1.0])?.with_ease(Ease::in_out(Curve::Ease)))
}

pub(crate) fn build(p: &SocialPromoProps, ctx: &FrameCtx) -> VideoGenResult<TemplateFrame> {
    let f = ctx.f();
    let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
    let primary = p.primary_color.as_str();

    let pulse = pulse_curve()?.sample(f);
    let badge_opacity = tween(f, (0.0, 15.0), 0.0, 1.0, Ease::LINEAR);
    let badge_y = tween(f, (0.0, 15.0), -20.0, 0.0, Ease::LINEAR);
    let headline_y = tween(f, (0.0, 20.0), 100.0, 0.0, Ease::out(Curve::Back(1.5)));
    let headline_opacity = tween(f, (0.0, 20.0), 0.0, 1.0, Ease::LINEAR);
    let discount_scale = tween(f, (15.0, 35.0), 0.0, 1.0, Ease::out(Curve::Elastic(1.2)));
    let urgency_opacity = tween(f, (50.0, 65.0), 0.0, 1.0, Ease::LINEAR);
    let cta_opacity = tween(f, (35.0, 50.0), 0.0, 1.0, Ease::LINEAR);
    let cta_y = tween(f, (35.0, 50.0), 30.0, 0.0, Ease::out(Curve::Ease));
    let trust_opacity = tween(f, (80.0, 100.0), 0.0, 1.0, Ease::LINEAR);
    let shine_x = tween(f, (0.0, ctx.duration_f()), -w, w * 2.0, Ease::LINEAR);

    let canvas_rect = Rect::new(0.0, 0.0, w, h);
    let mut nodes = Vec::new();
    let background = match p.background_image() {
        Some(url) => {
            nodes.push(Node::image("background-image", url, canvas_rect, 0.0));
            nodes.push(Node::rect(
                "background-dim",
                canvas_rect,
                0.0,
                Paint::solid("rgba(0,0,0,0.4)"),
            ));
            Paint::solid("#000")
        }
        None => Paint::Linear {
            angle_deg: 135.0,
            stops: vec![
                GradientStop::new(0.0, primary),
                GradientStop::new(0.5, p.primary_color.tint(0xDD)),
                GradientStop::new(1.0, "#000"),
            ],
        },
    };

    nodes.push(
        Node::group(
            "ambient-light",
            vec![
                Node::rect(
                    "ambient-light-low",
                    canvas_rect,
                    0.0,
                    spotlight(Point::new(0.2, 0.8), p.primary_color.tint(0x66), 0.5),
                ),
                Node::rect(
                    "ambient-light-high",
                    canvas_rect,
                    0.0,
                    spotlight(Point::new(0.8, 0.2), "white".to_string(), 0.3),
                ),
            ],
        )
        .with_opacity(0.6),
    );

    let particles = (0..PARTICLE_COUNT)
        .map(|i| {
            let fi = i as f64;
            let size = 4.0 + (i % 3) as f64 * 2.0;
            let left = ((i * 7) % 100) as f64 / 100.0 * w;
            let top_pct = tween(f, (0.0, ctx.duration_f()), 100.0 + fi * 10.0, -20.0, Ease::LINEAR);
            let top = top_pct / 100.0 * h;
            let color = if i % 2 == 0 { "white" } else { primary };
            Node::circle(
                format!("particle-{i}"),
                Point::new(left + size / 2.0, top + size / 2.0),
                size / 2.0,
                Paint::solid(color),
            )
            .with_opacity(0.3 + (i % 5) as f64 * 0.1)
        })
        .collect();
    nodes.push(Node::group("particles", particles));

    // Centered column laid out top-down around x = 0.
    let badge_h = 18.0 * 1.2 + 20.0;
    let headline_h = 64.0 * 1.2;
    let card_h = 80.0 * 1.2 + 60.0;
    let urgency_h = 24.0 * 1.2;
    let cta_h = 32.0 * 1.2 + 50.0;
    let trust_h = 16.0 * 1.2;

    let mut y = 0.0;
    let badge_top = y;
    y += badge_h + 30.0;
    let headline_center = y + headline_h / 2.0;
    y += headline_h + 20.0;
    let card_top = y;
    y += card_h + 40.0;
    let urgency_center = y + urgency_h / 2.0;
    y += urgency_h + 40.0;
    let cta_top = y;
    y += cta_h + 50.0;
    let trust_center = y + trust_h / 2.0;
    y += trust_h;
    let column_h = y;

    let badge_w = estimate_text_width(BADGE, 18.0) + 60.0;
    let badge = Node::group(
        "badge",
        vec![
            Node::rect(
                "badge-pill",
                Rect::new(-badge_w / 2.0, badge_top, badge_w / 2.0, badge_top + badge_h),
                30.0,
                Paint::solid("white"),
            ),
            Node::text(
                "badge-text",
                TextSpec::centered(BADGE, Point::new(0.0, baseline(badge_top + badge_h / 2.0, 18.0)), 18.0, primary)
                    .bold(),
            ),
        ],
    )
    .with_transform(Transform2D::translate(0.0, badge_y))
    .with_opacity(badge_opacity);

    let headline = Node::group(
        "headline",
        vec![Node::text(
            "headline-text",
            TextSpec::centered(
                p.headline.as_str(),
                Point::new(0.0, baseline(headline_center, 64.0)),
                64.0,
                "white",
            )
            .bold()
            .with_shadow(Shadow {
                offset: Vec2::new(0.0, 4.0),
                blur: 20.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
        )],
    )
    .with_transform(Transform2D::translate(0.0, headline_y))
    .with_opacity(headline_opacity);

    let card_w = estimate_text_width(&p.discount, 80.0) + 120.0;
    let card_mid = card_top + card_h / 2.0;
    let card = Node::group(
        "discount-card",
        vec![
            Node::rect(
                "discount-card-fill",
                Rect::new(-card_w / 2.0, card_top, card_w / 2.0, card_top + card_h),
                20.0,
                Paint::linear(135.0, "#FFD700", "#FFA500"),
            )
            .with_shadow(Shadow {
                offset: Vec2::new(0.0, 10.0),
                blur: 40.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
            Node::text(
                "discount-text",
                TextSpec::centered(
                    p.discount.as_str(),
                    Point::new(0.0, baseline(card_mid, 80.0)),
                    80.0,
                    "#333",
                )
                .bold()
                .with_shadow(Shadow {
                    offset: Vec2::new(2.0, 2.0),
                    blur: 0.0,
                    color: "rgba(255,255,255,0.5)".to_string(),
                }),
            ),
        ],
    )
    .with_transform(Transform2D::default().with_scale(pulse).with_anchor(0.0, card_mid));
    let shine = Node::path(
        "discount-shine",
        shine_path(-card_w / 2.0 + shine_x, card_top, card_h),
        Some(Paint::Linear {
            angle_deg: 90.0,
            stops: vec![
                GradientStop::new(0.0, "transparent"),
                GradientStop::new(0.5, "rgba(255,255,255,0.4)"),
                GradientStop::new(1.0, "transparent"),
            ],
        }),
        None,
    );
    let discount = Node::group("discount", vec![shine, card])
        .with_transform(
            Transform2D::default()
                .with_scale(discount_scale)
                .with_anchor(0.0, card_mid),
        )
        .with_opacity(discount_scale);

    let urgency = Node::text(
        "urgency",
        TextSpec::centered(
            URGENCY,
            Point::new(0.0, baseline(urgency_center, 24.0)),
            24.0,
            "rgba(255,255,255,0.9)",
        ),
    )
    .with_opacity(urgency_opacity);

    let cta_label = format!("{} →", p.cta);
    let cta_w = estimate_text_width(&cta_label, 32.0) + 140.0;
    let cta = Node::group(
        "cta",
        vec![
            Node::rect(
                "cta-button",
                Rect::new(-cta_w / 2.0, cta_top, cta_w / 2.0, cta_top + cta_h),
                50.0,
                Paint::solid("white"),
            )
            .with_shadow(Shadow {
                offset: Vec2::new(0.0, 10.0),
                blur: 40.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
            Node::text(
                "cta-text",
                TextSpec::centered(cta_label, Point::new(0.0, baseline(cta_top + cta_h / 2.0, 32.0)), 32.0, primary)
                    .bold(),
            ),
        ],
    )
    .with_transform(Transform2D::translate(0.0, cta_y))
    .with_opacity(cta_opacity);

    let widths: Vec<f64> = TRUST_BADGES
        .iter()
        .map(|t| estimate_text_width(t, 16.0))
        .collect();
    let row_w = widths.iter().sum::<f64>() + 30.0 * (widths.len() - 1) as f64;
    let mut x = -row_w / 2.0;
    let mut trust = Vec::with_capacity(TRUST_BADGES.len());
    for (i, (label, item_w)) in TRUST_BADGES.iter().zip(&widths).enumerate() {
        trust.push(Node::text(
            format!("trust-{i}"),
            TextSpec::centered(
                *label,
                Point::new(x + item_w / 2.0, baseline(trust_center, 16.0)),
                16.0,
                "rgba(255,255,255,0.8)",
            ),
        ));
        x += item_w + 30.0;
    }
    let trust = Node::group("trust", trust).with_opacity(trust_opacity);

    nodes.push(
        Node::group("content", vec![badge, headline, discount, urgency, cta, trust])
            .with_transform(Transform2D::translate(w / 2.0, h / 2.0 - column_h / 2.0)),
    );

    Ok(TemplateFrame { background, nodes })
}

/// Radial light centered at a bounding-box fraction, fading out at `fade_at` of the
/// distance to the farthest corner.
fn spotlight(center: Point, color: String, fade_at: f64) -> Paint {
    let dx = center.x.max(1.0 - center.x);
    let dy = center.y.max(1.0 - center.y);
    Paint::Radial {
        center,
        radius: dx.hypot(dy),
        stops: vec![
            GradientStop::new(0.0, color),
            GradientStop::new(fade_at, "transparent"),
        ],
    }
}

/// Band leaning right at the top, `SHINE_W` wide, starting at `left`.
fn shine_path(left: f64, top: f64, height: f64) -> String {
    let lean = SHINE_SKEW_DEG.to_radians().tan() * height / 2.0;
    let bottom = top + height;
    format!(
        "M{} {top}L{} {top}L{} {bottom}L{} {bottom}Z",
        left + lean,
        left + SHINE_W + lean,
        left + SHINE_W - lean,
        left - lean,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/templates/social_promo.rs"]
mod tests;

use crate::animation::ease::{Curve, Ease};
use crate::animation::interpolate::tween;
use crate::foundation::core::{Point, Rect, Transform2D, Vec2};
use crate::params::color::HexColor;
use crate::params::schema::{FieldKind, FieldSpec, Schema};
use crate::scene::node::{Node, Paint, Shadow, TextAnchor, TextSpec};
use crate::templates::{FrameCtx, TemplateFrame, baseline, estimate_text_width, grid};

pub(crate) const SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("productName", FieldKind::String),
        FieldSpec::required("tagline", FieldKind::String),
        FieldSpec::required("price", FieldKind::String),
        FieldSpec::required("features", FieldKind::StringList),
        FieldSpec::required("primaryColor", FieldKind::Color),
        FieldSpec::optional("imageUrl", FieldKind::String),
    ],
};

/// Parameters of the `product-showcase` template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductShowcaseProps {
    /// Headline.
    pub product_name: String,
    /// Line under the headline.
    pub tagline: String,
    /// Price text, shown verbatim.
    pub price: String,
    /// Bullet points, revealed one after another.
    pub features: Vec<String>,
    /// Accent and background color.
    pub primary_color: HexColor,
    /// Product photo; an empty or absent URL draws a placeholder card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductShowcaseProps {
    /// Image URL when one was actually provided.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }
}

pub(crate) fn defaults() -> ProductShowcaseProps {
    ProductShowcaseProps {
        product_name: "超级产品".to_string(),
        tagline: "改变你的生活".to_string(),
        price: "¥99".to_string(),
        features: vec!["高品质".to_string(), "易使用".to_string(), "超值".to_string()],
        primary_color: HexColor::from_rgb(0x4E, 0xCD, 0xC4),
        image_url: Some(String::new()),
    }
}

const CARD_SIZE: f64 = 400.0;
const CARD_RIGHT: f64 = 100.0;
const COLUMN_LEFT: f64 = 80.0;
const FEATURES_START: f64 = 60.0;
const FEATURE_STAGGER: f64 = 15.0;

/// Reveal window of feature `i`.
pub(crate) fn feature_window(i: usize) -> (f64, f64) {
    let delay = FEATURES_START + FEATURE_STAGGER * i as f64;
    (delay, delay + FEATURE_STAGGER)
}

pub(crate) fn build(p: &ProductShowcaseProps, ctx: &FrameCtx) -> TemplateFrame {
    let f = ctx.f();
    let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
    let primary = p.primary_color.as_str();

    let bg_progress = tween(f, (0.0, 30.0), 0.0, 1.0, Ease::out(Curve::Ease));
    let title_y = tween(f, (10.0, 40.0), 100.0, 0.0, Ease::out(Curve::Back(1.2)));
    let title_opacity = tween(f, (10.0, 40.0), 0.0, 1.0, Ease::LINEAR);
    let tagline_opacity = tween(f, (35.0, 55.0), 0.0, 1.0, Ease::LINEAR);
    let price_opacity = tween(f, (120.0, 140.0), 0.0, 1.0, Ease::LINEAR);
    let price_scale = tween(f, (120.0, 150.0), 0.8, 1.0, Ease::out(Curve::Back(1.5)));
    let tilt_deg = tween(f, (0.0, ctx.duration_f()), -5.0, 5.0, Ease::LINEAR);
    let card_opacity = tween(f, (20.0, 50.0), 0.0, 1.0, Ease::LINEAR);
    let glow_scale = tween(f, (20.0, 60.0), 0.5, 1.2, Ease::LINEAR);
    let glow_opacity = tween(f, (20.0, 60.0), 0.0, 0.5, Ease::LINEAR);
    let cta_opacity = tween(f, (140.0, 160.0), 0.0, 1.0, Ease::LINEAR);

    let orb_r = w * 0.75;
    let orb = Node::rect(
        "backdrop-orb",
        Rect::new(w / 2.0 - orb_r, h / 2.0 - orb_r, w / 2.0 + orb_r, h / 2.0 + orb_r),
        orb_r,
        Paint::glow(p.primary_color.tint(0x44), 0.7),
    )
    .with_transform(
        Transform2D::default()
            .with_scale(bg_progress)
            .with_rotation_deg(f * 0.2)
            .with_anchor(w / 2.0, h / 2.0),
    );

    // Left column, laid out top-down from y = 0 and centered vertically.
    let title_line = 72.0 * 1.2;
    let tagline_line = 32.0 * 1.2;
    let feature_h = 30.0;
    let price_h = 56.0 * 1.2 + 40.0;

    let mut y = 0.0;
    let title_center = y + title_line / 2.0;
    y += title_line + 20.0;
    let tagline_center = y + tagline_line / 2.0;
    y += tagline_line + 40.0;
    let features_top = y;
    y += (feature_h + 20.0) * p.features.len() as f64 + 50.0;
    let price_top = y;
    y += price_h;
    let column_h = y;
    let column_w = w * 0.5;

    let title = Node::group(
        "title",
        vec![Node::text(
            "title-text",
            TextSpec::centered(
                p.product_name.as_str(),
                Point::new(0.0, baseline(title_center, 72.0)),
                72.0,
                "white",
            )
            .bold()
            .anchored(TextAnchor::Start)
            .with_shadow(Shadow {
                offset: Vec2::new(0.0, 4.0),
                blur: 20.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
        )],
    )
    .with_transform(Transform2D::translate(0.0, title_y))
    .with_opacity(title_opacity);

    let tagline = Node::text(
        "tagline",
        TextSpec::centered(
            p.tagline.as_str(),
            Point::new(0.0, baseline(tagline_center, 32.0)),
            32.0,
            "rgba(255,255,255,0.8)",
        )
        .anchored(TextAnchor::Start),
    )
    .with_opacity(tagline_opacity);

    let features = p
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let window = feature_window(i);
            let opacity = tween(f, window, 0.0, 1.0, Ease::LINEAR);
            let dx = tween(f, window, -50.0, 0.0, Ease::out(Curve::Ease));
            let top = features_top + (feature_h + 20.0) * i as f64;
            let mid = feature_h / 2.0;
            Node::group(
                format!("feature-{i}"),
                vec![
                    Node::circle(
                        format!("feature-{i}-check"),
                        Point::new(mid, mid),
                        mid,
                        Paint::solid(primary),
                    ),
                    Node::text(
                        format!("feature-{i}-mark"),
                        TextSpec::centered("✓", Point::new(mid, baseline(mid, 16.0)), 16.0, "white"),
                    ),
                    Node::text(
                        format!("feature-{i}-text"),
                        TextSpec::centered(
                            feature.as_str(),
                            Point::new(feature_h + 15.0, baseline(mid, 24.0)),
                            24.0,
                            "white",
                        )
                        .anchored(TextAnchor::Start),
                    ),
                ],
            )
            .with_transform(Transform2D::translate(dx, top))
            .with_opacity(opacity)
        })
        .collect();

    let label_w = estimate_text_width("仅售", 28.0);
    let price_w = 50.0 + label_w + 10.0 + estimate_text_width(&p.price, 56.0) + 50.0;
    let price_mid = price_top + price_h / 2.0;
    let price = Node::group(
        "price",
        vec![
            Node::rect(
                "price-card",
                Rect::new(0.0, price_top, price_w, price_top + price_h),
                15.0,
                Paint::solid("white"),
            )
            .with_shadow(Shadow {
                offset: Vec2::new(0.0, 10.0),
                blur: 40.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
            Node::text(
                "price-label",
                TextSpec::centered("仅售", Point::new(50.0, baseline(price_mid, 28.0)), 28.0, "#666")
                    .anchored(TextAnchor::Start),
            ),
            Node::text(
                "price-value",
                TextSpec::centered(
                    p.price.as_str(),
                    Point::new(50.0 + label_w + 10.0, baseline(price_mid, 56.0)),
                    56.0,
                    primary,
                )
                .bold()
                .anchored(TextAnchor::Start),
            ),
        ],
    )
    .with_transform(
        Transform2D::default()
            .with_scale(price_scale)
            .with_anchor(column_w / 2.0, price_mid),
    )
    .with_opacity(price_opacity);

    let column = Node::group("details", vec![title, tagline, Node::group("features", features), price])
        .with_transform(Transform2D::translate(COLUMN_LEFT, h / 2.0 - column_h / 2.0));

    let showcase = product_card(p, card_opacity, glow_scale, glow_opacity).with_transform(
        Transform2D::translate(w - CARD_RIGHT - CARD_SIZE, h / 2.0 - CARD_SIZE / 2.0)
            .with_rotation_deg(tilt_deg)
            .with_anchor(CARD_SIZE / 2.0, CARD_SIZE / 2.0),
    );

    let cta_text = "立即购买 →";
    let cta_w = estimate_text_width(cta_text, 28.0) + 120.0;
    let cta_h = 28.0 * 1.2 + 30.0;
    let cta_top = h - 60.0 - cta_h;
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
                blur: 30.0,
                color: "rgba(0,0,0,0.3)".to_string(),
            }),
            Node::text(
                "cta-text",
                TextSpec::centered(
                    cta_text,
                    Point::new(0.0, baseline(cta_top + cta_h / 2.0, 28.0)),
                    28.0,
                    primary,
                )
                .bold(),
            ),
        ],
    )
    .with_transform(Transform2D::translate(w / 2.0, 0.0))
    .with_opacity(cta_opacity);

    TemplateFrame {
        background: Paint::linear(135.0, primary, "#1a1a2e"),
        nodes: vec![
            orb,
            grid(w, h, 50.0, "rgba(255,255,255,0.03)"),
            column,
            showcase,
            cta,
        ],
    }
}

/// Product photo or placeholder, plus its pulsing glow, in a CARD_SIZE square.
fn product_card(p: &ProductShowcaseProps, opacity: f64, glow_scale: f64, glow_opacity: f64) -> Node {
    let area = Rect::new(0.0, 0.0, CARD_SIZE, CARD_SIZE);
    let shadow = Shadow {
        offset: Vec2::new(0.0, 30.0),
        blur: 60.0,
        color: "rgba(0,0,0,0.4)".to_string(),
    };
    let card = match p.image() {
        Some(url) => Node::group(
            "product-card",
            vec![
                Node::rect(
                    "product-card-frame",
                    area,
                    30.0,
                    Paint::solid(p.primary_color.tint(0x33)),
                )
                .with_shadow(shadow),
                Node::image("product-image", url, area, 30.0),
            ],
        ),
        None => Node::group(
            "product-card",
            vec![
                Node::rect(
                    "product-card-frame",
                    area,
                    30.0,
                    Paint::linear(135.0, p.primary_color.tint(0x66), p.primary_color.tint(0x33)),
                )
                .with_shadow(shadow),
                Node::text(
                    "product-placeholder",
                    TextSpec::centered(
                        "📦",
                        Point::new(CARD_SIZE / 2.0, baseline(CARD_SIZE / 2.0, 120.0)),
                        120.0,
                        "#000",
                    ),
                ),
            ],
        ),
    }
    .with_opacity(opacity);

    let glow = Node::rect(
        "product-glow",
        area.inflate(20.0, 20.0),
        40.0,
        Paint::glow(p.primary_color.tint(0x44), 0.7),
    )
    .with_transform(
        Transform2D::default()
            .with_scale(glow_scale)
            .with_anchor(CARD_SIZE / 2.0, CARD_SIZE / 2.0),
    )
    .with_opacity(glow_opacity);

    Node::group("showcase", vec![card, glow])
}

#[cfg(test)]
#[path = "../../tests/unit/templates/product_showcase.rs"]
mod tests;

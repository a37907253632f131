//! Built-in templates: typed props, schemas, and per-frame scene builders.

pub(crate) mod birthday;
pub(crate) mod data_report;
pub(crate) mod product_showcase;
pub(crate) mod registry;
pub(crate) mod social_promo;

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::params::ParameterSet;
use crate::params::schema::Schema;
use crate::scene::node::{Node, Paint, Stroke};

pub use birthday::BirthdayProps;
pub use data_report::{ArcSegment, DataPoint, DataReportProps, arc_segments};
pub use product_showcase::ProductShowcaseProps;
pub use social_promo::SocialPromoProps;

/// Timeline position and output geometry handed to a scene builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCtx {
    /// Frame being evaluated.
    pub frame: FrameIndex,
    /// Output size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Timeline length in frames.
    pub duration: u64,
}

impl FrameCtx {
    /// Current frame as a float.
    pub fn f(&self) -> f64 {
        self.frame.as_f64()
    }

    /// Timeline length as a float.
    pub fn duration_f(&self) -> f64 {
        self.duration as f64
    }
}

/// Output of a scene builder before it is wrapped into a render tree.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TemplateFrame {
    pub(crate) background: Paint,
    pub(crate) nodes: Vec<Node>,
}

/// Identifies which scene builder a template uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    /// Portrait birthday greeting.
    Birthday,
    /// Landscape product promo.
    ProductShowcase,
    /// Square donut-chart report.
    DataReport,
    /// Social-media discount promo.
    SocialPromo,
}

impl TemplateKind {
    /// Parameter schema for this template.
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Birthday => &birthday::SCHEMA,
            Self::ProductShowcase => &product_showcase::SCHEMA,
            Self::DataReport => &data_report::SCHEMA,
            Self::SocialPromo => &social_promo::SCHEMA,
        }
    }

    /// Factory default parameters.
    pub fn default_params(self) -> TemplateParams {
        match self {
            Self::Birthday => TemplateParams::Birthday(birthday::defaults()),
            Self::ProductShowcase => TemplateParams::ProductShowcase(product_showcase::defaults()),
            Self::DataReport => TemplateParams::DataReport(data_report::defaults()),
            Self::SocialPromo => TemplateParams::SocialPromo(social_promo::defaults()),
        }
    }
}

/// Parameters that passed schema validation, typed per template.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum TemplateParams {
    /// `birthday` parameters.
    Birthday(BirthdayProps),
    /// `product-showcase` parameters.
    ProductShowcase(ProductShowcaseProps),
    /// `data-report` parameters.
    DataReport(DataReportProps),
    /// `social-promo` parameters.
    SocialPromo(SocialPromoProps),
}

impl TemplateParams {
    /// Validate a raw parameter set against `kind`'s schema and convert it to typed props.
    pub fn from_params(kind: TemplateKind, params: &ParameterSet) -> VideoGenResult<Self> {
        kind.schema().check(params)?;
        let value = serde_json::Value::Object(params.clone());
        Ok(match kind {
            TemplateKind::Birthday => Self::Birthday(serde_json::from_value(value)?),
            TemplateKind::ProductShowcase => Self::ProductShowcase(serde_json::from_value(value)?),
            TemplateKind::DataReport => Self::DataReport(serde_json::from_value(value)?),
            TemplateKind::SocialPromo => Self::SocialPromo(serde_json::from_value(value)?),
        })
    }

    /// Template these props belong to.
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Birthday(_) => TemplateKind::Birthday,
            Self::ProductShowcase(_) => TemplateKind::ProductShowcase,
            Self::DataReport(_) => TemplateKind::DataReport,
            Self::SocialPromo(_) => TemplateKind::SocialPromo,
        }
    }

    /// Back to the untyped representation used by editors.
    pub fn to_parameter_set(&self) -> VideoGenResult<ParameterSet> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(VideoGenError::serde("template params must serialize to an object")),
        }
    }

    pub(crate) fn build_frame(&self, ctx: &FrameCtx) -> VideoGenResult<TemplateFrame> {
        match self {
            Self::Birthday(p) => Ok(birthday::build(p, ctx)),
            Self::ProductShowcase(p) => Ok(product_showcase::build(p, ctx)),
            Self::DataReport(p) => Ok(data_report::build(p, ctx)),
            Self::SocialPromo(p) => social_promo::build(p, ctx),
        }
    }
}

/// Rough advance width of `s`; wide (CJK, emoji) glyphs count as 1em, others as 0.55em.
pub(crate) fn estimate_text_width(s: &str, font_size: f64) -> f64 {
    s.chars()
        .map(|c| if c.is_ascii() { 0.55 } else { 1.0 })
        .sum::<f64>()
        * font_size
}

/// Baseline that vertically centers a line of `font_size` text on `center_y`.
pub(crate) fn baseline(center_y: f64, font_size: f64) -> f64 {
    center_y + font_size * 0.35
}

/// Hairline grid covering the canvas every `step` pixels.
pub(crate) fn grid(w: f64, h: f64, step: f64, color: &str) -> Node {
    let mut d = String::new();
    let mut x = 0.0;
    while x <= w {
        d.push_str(&format!("M{x} 0V{h}"));
        x += step;
    }
    let mut y = 0.0;
    while y <= h {
        d.push_str(&format!("M0 {y}H{w}"));
        y += step;
    }
    Node::path(
        "grid",
        d,
        None,
        Some(Stroke {
            color: color.to_owned(),
            width: 1.0,
        }),
    )
}

/// Deterministic SplitMix64 stream used where a design calls for scattered decoration.
pub(crate) struct Scatter(u64);

impl Scatter {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next value in `[0, 1)`.
    pub(crate) fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/templates/mod.rs"]
mod tests;

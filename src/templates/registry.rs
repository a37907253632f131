use std::fmt;
use std::sync::OnceLock;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::params::ParameterSet;
use crate::templates::{TemplateKind, TemplateParams};

/// Catalog price, stored in cents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Price(pub u32);

impl Price {
    /// Price in whole currency units.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Immutable catalog entry for one template.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    /// Stable identifier used for lookup.
    pub id: &'static str,
    /// Scene builder and schema.
    pub kind: TemplateKind,
    /// Display name.
    pub name: &'static str,
    /// One-line pitch.
    pub description: &'static str,
    /// Thumbnail path as served by the host.
    pub thumbnail: &'static str,
    /// Output size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Timeline length in frames.
    pub duration_in_frames: u64,
    /// Generation price.
    pub price: Price,
    /// Parameters a fresh editor session starts from.
    pub default_params: TemplateParams,
}

impl TemplateDescriptor {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &'static str,
        kind: TemplateKind,
        name: &'static str,
        description: &'static str,
        thumbnail: &'static str,
        (width, height): (u32, u32),
        duration_in_frames: u64,
        price: Price,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            description,
            thumbnail,
            canvas: Canvas { width, height },
            fps: Fps(30),
            duration_in_frames,
            price,
            default_params: kind.default_params(),
        }
    }

    /// Duration rounded to whole seconds.
    pub fn duration_secs(&self) -> u64 {
        self.fps.frames_to_secs(self.duration_in_frames).round() as u64
    }

    /// `"{width}x{height}"`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.canvas.width, self.canvas.height)
    }

    /// Glyph shown on catalog cards and in the editor preview.
    pub fn icon(&self) -> &'static str {
        match self.kind {
            TemplateKind::Birthday => "🎂",
            TemplateKind::ProductShowcase => "📦",
            TemplateKind::DataReport => "📊",
            TemplateKind::SocialPromo => "🔥",
        }
    }

    /// Default parameters in their untyped form.
    pub fn default_parameter_set(&self) -> VideoGenResult<ParameterSet> {
        self.default_params.to_parameter_set()
    }

    /// Validate `params` against this template's schema.
    pub fn validate(&self, params: &ParameterSet) -> VideoGenResult<TemplateParams> {
        TemplateParams::from_params(self.kind, params)
    }
}

static CATALOG: OnceLock<Vec<TemplateDescriptor>> = OnceLock::new();

fn catalog() -> &'static [TemplateDescriptor] {
    CATALOG.get_or_init(|| {
        vec![
            TemplateDescriptor::new(
                "birthday",
                TemplateKind::Birthday,
                "生日祝福",
                "温馨的生日祝福视频，适合送给朋友和家人",
                "/templates/birthday.jpg",
                (1080, 1920),
                150,
                Price(299),
            ),
            TemplateDescriptor::new(
                "product-showcase",
                TemplateKind::ProductShowcase,
                "产品展示",
                "专业的产品宣传视频，适合电商和营销",
                "/templates/product.jpg",
                (1920, 1080),
                180,
                Price(499),
            ),
            TemplateDescriptor::new(
                "data-report",
                TemplateKind::DataReport,
                "数据报告",
                "动态数据可视化视频，让数据更生动",
                "/templates/data.jpg",
                (1080, 1080),
                200,
                Price(399),
            ),
            TemplateDescriptor::new(
                "social-promo",
                TemplateKind::SocialPromo,
                "社交推广",
                "吸睛的社交媒体推广视频",
                "/templates/social.jpg",
                (1080, 1350),
                120,
                Price(199),
            ),
        ]
    })
}

/// All templates in catalog order.
pub fn list() -> &'static [TemplateDescriptor] {
    catalog()
}

/// Descriptor for `id`.
pub fn lookup(id: &str) -> VideoGenResult<&'static TemplateDescriptor> {
    catalog()
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| VideoGenError::not_found(id))
}

/// Validate `params` against the schema of template `id`.
pub fn validate(id: &str, params: &ParameterSet) -> VideoGenResult<TemplateParams> {
    lookup(id)?.validate(params)
}

/// Default parameters of template `id`.
pub fn defaults(id: &str) -> VideoGenResult<ParameterSet> {
    lookup(id)?.default_parameter_set()
}

#[cfg(test)]
#[path = "../../tests/unit/templates/registry.rs"]
mod tests;

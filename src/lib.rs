//! Videogen turns parameterized video templates into deterministic, frame-by-frame render trees.
//!
//! A template is a fixed catalog entry (canvas, frame rate, duration, price) paired with a
//! parameter schema and a pure scene builder. Every frame is a function of
//! `(template, params, frame)` only: no clocks, no IO, no global state.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: `ParameterSet -> TemplateParams` against the template's schema
//! 2. **Evaluate**: `TemplateParams + FrameIndex -> RenderTree` (what is drawn, where, how opaque)
//! 3. **Serialize**: `RenderTree -> SVG` for inspection or external rendering
//! 4. **Rasterize** (optional): `SVG -> FrameRGBA` via `resvg`
//!
//! The host layer wraps this in an editor session and a simulated `generate` that fingerprints
//! the whole evaluated timeline instead of encoding it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod host;
mod params;
mod render;
mod scene;
mod templates;

pub use animation::ease::{CubicBezier, Curve, Ease, EaseMode};
pub use animation::interpolate::{AnimationCurve, Extrapolate, interpolate, tween};
pub use eval::evaluator::{Evaluator, evaluate};
pub use foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Transform2D, Vec2,
};
pub use foundation::error::{VideoGenError, VideoGenResult};
pub use host::editor::{EditorField, EditorSession, WidgetKind, field_label};
pub use host::generate::{ArtifactRef, generate};
pub use params::ParameterSet;
pub use params::color::HexColor;
pub use params::schema::{FieldKind, FieldSpec, Schema, SchemaError, SchemaErrors, SchemaPathElem};
pub use render::fingerprint::{FrameFingerprint, fingerprint_sequence, fingerprint_tree};
pub use render::pipeline::{
    EvaluatedFrame, RenderStats, RenderThreading, eval_frames, render_frame, render_frames,
};
pub use render::raster::{FrameRGBA, RasterOpts, Rasterizer};
pub use render::svg::to_svg;
pub use scene::node::{
    GradientStop, Node, NodeKind, Paint, RenderTree, Shadow, Stroke, TextAnchor, TextSpec,
};
pub use templates::registry::{Price, TemplateDescriptor, defaults, list, lookup, validate};
pub use templates::{
    ArcSegment, BirthdayProps, DataPoint, DataReportProps, FrameCtx, ProductShowcaseProps,
    SocialPromoProps, TemplateKind, TemplateParams, arc_segments,
};

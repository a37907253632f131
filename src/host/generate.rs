use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::VideoGenResult;
use crate::params::ParameterSet;
use crate::render::fingerprint::fingerprint_sequence;
use crate::render::pipeline::{RenderThreading, eval_frames};
use crate::templates::TemplateParams;
use crate::templates::registry::{self, TemplateDescriptor};

/// Reference to a (simulated) generated video.
///
/// Nothing is encoded, billed or stored; the id is derived from the evaluated frames so that
/// identical requests yield identical references.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRef {
    /// `{template}-{first 16 fingerprint digits}`.
    pub id: String,
    /// Template that was generated.
    pub template_id: String,
    /// Number of frames evaluated.
    pub frames: u64,
    /// Distinct frames among them.
    pub unique_frames: u64,
    /// Frame rate.
    pub fps: u32,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Price as shown in the catalog.
    pub price: String,
    /// Hex fingerprint of the whole frame sequence.
    pub fingerprint: String,
}

/// Validate `params` for `template_id` and generate it.
pub fn generate(
    template_id: &str,
    params: &ParameterSet,
    threading: &RenderThreading,
) -> VideoGenResult<ArtifactRef> {
    let template = registry::lookup(template_id)?;
    let typed = template.validate(params)?;
    generate_validated(template, &typed, threading)
}

#[tracing::instrument(skip(template, params, threading), fields(template = template.id))]
pub(crate) fn generate_validated(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    threading: &RenderThreading,
) -> VideoGenResult<ArtifactRef> {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(template.duration_in_frames))?;
    let (frames, stats) = eval_frames(template, params, range, threading)?;
    let fingerprint = fingerprint_sequence(frames.iter().map(|f| &f.fingerprint)).to_hex();

    let artifact = ArtifactRef {
        id: format!("{}-{}", template.id, &fingerprint[..16]),
        template_id: template.id.to_owned(),
        frames: stats.frames_total,
        unique_frames: stats.frames_unique,
        fps: template.fps.0,
        width: template.canvas.width,
        height: template.canvas.height,
        price: template.price.to_string(),
        fingerprint,
    };
    tracing::info!(
        id = %artifact.id,
        frames = artifact.frames,
        unique = artifact.unique_frames,
        "generation simulated"
    );
    Ok(artifact)
}

#[cfg(test)]
#[path = "../../tests/unit/host/generate.rs"]
mod tests;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::params::ParameterSet;
use crate::scene::node::RenderTree;
use crate::templates::FrameCtx;
use crate::templates::TemplateParams;
use crate::templates::registry::{self, TemplateDescriptor};

/// Stateless evaluator from `(template, params, frame)` to a render tree.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(template, params), fields(template = template.id))]
    /// Evaluate one frame of already-validated params.
    pub fn eval_frame(
        template: &TemplateDescriptor,
        params: &TemplateParams,
        frame: FrameIndex,
    ) -> VideoGenResult<RenderTree> {
        if params.kind() != template.kind {
            return Err(VideoGenError::evaluation(format!(
                "params for {:?} cannot drive template '{}'",
                params.kind(),
                template.id
            )));
        }
        Self::eval_frame_unchecked(template, params, frame)
    }

    pub(crate) fn eval_frame_unchecked(
        template: &TemplateDescriptor,
        params: &TemplateParams,
        frame: FrameIndex,
    ) -> VideoGenResult<RenderTree> {
        if frame.0 >= template.duration_in_frames {
            return Err(VideoGenError::evaluation(format!(
                "frame {} is out of bounds for '{}' ({} frames)",
                frame.0, template.id, template.duration_in_frames
            )));
        }

        let ctx = FrameCtx {
            frame,
            canvas: template.canvas,
            fps: template.fps,
            duration: template.duration_in_frames,
        };
        let out = params.build_frame(&ctx)?;

        Ok(RenderTree {
            template_id: template.id.to_owned(),
            frame,
            canvas: template.canvas,
            background: out.background,
            nodes: out.nodes,
        })
    }
}

#[tracing::instrument(skip(params))]
/// Look up `template_id`, validate `params` and evaluate `frame`.
pub fn evaluate(
    template_id: &str,
    frame: FrameIndex,
    params: &ParameterSet,
) -> VideoGenResult<RenderTree> {
    let template = registry::lookup(template_id)?;
    let typed = template.validate(params)?;
    Evaluator::eval_frame_unchecked(template, &typed, frame)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;

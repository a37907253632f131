use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::eval::evaluator::Evaluator;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::render::fingerprint::{FrameFingerprint, fingerprint_tree};
use crate::render::raster::{FrameRGBA, RasterOpts, Rasterizer};
use crate::scene::node::RenderTree;
use crate::templates::TemplateParams;
use crate::templates::registry::TemplateDescriptor;

/// Batch threading and chunking configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Use a dedicated rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames per chunk; 0 is treated as 1.
    pub chunk_size: usize,
    /// Worker count override, at least 1 when set.
    pub threads: Option<usize>,
    /// Rasterize each distinct frame of a chunk once and clone it for repeats.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Counters reported by batch evaluation and rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames actually rasterized (equals `frames_total` for evaluation only).
    pub frames_rendered: u64,
    /// Frames served from an identical earlier frame of the same chunk.
    pub frames_elided: u64,
    /// Distinct fingerprints across the whole range.
    pub frames_unique: u64,
}

/// A render tree with its fingerprint.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedFrame {
    /// Evaluated tree.
    pub tree: RenderTree,
    /// Fingerprint of `tree`, frame index excluded.
    pub fingerprint: FrameFingerprint,
}

/// Evaluate every frame of `range`, in frame order.
pub fn eval_frames(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    range: FrameRange,
    threading: &RenderThreading,
) -> VideoGenResult<(Vec<EvaluatedFrame>, RenderStats)> {
    check_range(template, params, range)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| VideoGenError::evaluation(format!("invalid chunk range: {e}")))?;
        let mut frames = match &pool {
            Some(pool) => eval_chunk_parallel(template, params, chunk, pool)?,
            None => eval_chunk_sequential(template, params, chunk)?,
        };
        tracing::debug!(start = chunk_start, end = chunk_end, "evaluated chunk");
        out.append(&mut frames);
        chunk_start = chunk_end;
    }

    let total = out.len() as u64;
    let stats = RenderStats {
        frames_total: total,
        frames_rendered: total,
        frames_elided: 0,
        frames_unique: count_unique(out.iter().map(|f| f.fingerprint)),
    };
    Ok((out, stats))
}

/// Evaluate and rasterize every frame of `range`, in frame order.
pub fn render_frames(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    range: FrameRange,
    raster: &RasterOpts,
    threading: &RenderThreading,
) -> VideoGenResult<(Vec<FrameRGBA>, RenderStats)> {
    check_range(template, params, range)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let rasterizer = Rasterizer::new(raster);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    let mut seen = HashSet::<FrameFingerprint>::new();

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| VideoGenError::evaluation(format!("invalid chunk range: {e}")))?;

        let evals = match &pool {
            Some(pool) => eval_chunk_parallel(template, params, chunk, pool)?,
            None => eval_chunk_sequential(template, params, chunk)?,
        };
        for e in &evals {
            seen.insert(e.fingerprint);
        }

        let (mut frames, chunk_stats) =
            render_chunk(&evals, &rasterizer, threading.static_frame_elision, pool.as_ref())?;
        tracing::debug!(
            start = chunk_start,
            end = chunk_end,
            rendered = chunk_stats.frames_rendered,
            elided = chunk_stats.frames_elided,
            "rendered chunk"
        );
        out.append(&mut frames);
        stats.frames_total += chunk_stats.frames_total;
        stats.frames_rendered += chunk_stats.frames_rendered;
        stats.frames_elided += chunk_stats.frames_elided;
        chunk_start = chunk_end;
    }

    stats.frames_unique = seen.len() as u64;
    Ok((out, stats))
}

/// Evaluate and rasterize a single frame.
pub fn render_frame(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    frame: FrameIndex,
    raster: &RasterOpts,
) -> VideoGenResult<FrameRGBA> {
    let tree = Evaluator::eval_frame(template, params, frame)?;
    Rasterizer::new(raster).render_tree(&tree)
}

fn check_range(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    range: FrameRange,
) -> VideoGenResult<()> {
    if range.is_empty() {
        return Err(VideoGenError::evaluation("frame range must be non-empty"));
    }
    if range.end.0 > template.duration_in_frames {
        return Err(VideoGenError::evaluation(format!(
            "frame range {}..{} exceeds '{}' ({} frames)",
            range.start.0, range.end.0, template.id, template.duration_in_frames
        )));
    }
    if params.kind() != template.kind {
        return Err(VideoGenError::evaluation(format!(
            "params for {:?} cannot drive template '{}'",
            params.kind(),
            template.id
        )));
    }
    Ok(())
}

fn eval_one(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    frame: FrameIndex,
) -> VideoGenResult<EvaluatedFrame> {
    let tree = Evaluator::eval_frame_unchecked(template, params, frame)?;
    let fingerprint = fingerprint_tree(&tree);
    Ok(EvaluatedFrame { tree, fingerprint })
}

fn eval_chunk_sequential(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    range: FrameRange,
) -> VideoGenResult<Vec<EvaluatedFrame>> {
    (range.start.0..range.end.0)
        .map(|f| eval_one(template, params, FrameIndex(f)))
        .collect()
}

fn eval_chunk_parallel(
    template: &TemplateDescriptor,
    params: &TemplateParams,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> VideoGenResult<Vec<EvaluatedFrame>> {
    pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map(|f| eval_one(template, params, FrameIndex(f)))
            .collect()
    })
}

fn render_chunk(
    evals: &[EvaluatedFrame],
    rasterizer: &Rasterizer,
    static_frame_elision: bool,
    pool: Option<&rayon::ThreadPool>,
) -> VideoGenResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut unique_indices = Vec::<usize>::with_capacity(evals.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(evals.len());
    if static_frame_elision {
        let mut first = HashMap::<FrameFingerprint, usize>::new();
        for (idx, frame) in evals.iter().enumerate() {
            if let Some(existing) = first.get(&frame.fingerprint).copied() {
                frame_to_unique.push(existing);
            } else {
                let slot = unique_indices.len();
                unique_indices.push(idx);
                first.insert(frame.fingerprint, slot);
                frame_to_unique.push(slot);
            }
        }
    } else {
        for idx in 0..evals.len() {
            frame_to_unique.push(idx);
            unique_indices.push(idx);
        }
    }

    let rendered: Vec<VideoGenResult<FrameRGBA>> = match pool {
        Some(pool) => pool.install(|| {
            unique_indices
                .par_iter()
                .map_init(
                    || rasterizer.clone(),
                    |worker, idx| worker.render_tree(&evals[*idx].tree),
                )
                .collect()
        }),
        None => unique_indices
            .iter()
            .map(|idx| rasterizer.render_tree(&evals[*idx].tree))
            .collect(),
    };

    let mut unique_frames = Vec::<Option<FrameRGBA>>::with_capacity(rendered.len());
    for item in rendered {
        unique_frames.push(Some(item?));
    }

    let mut remaining = vec![0usize; unique_frames.len()];
    for &u in &frame_to_unique {
        remaining[u] += 1;
    }

    let mut out = Vec::<FrameRGBA>::with_capacity(frame_to_unique.len());
    for u in frame_to_unique {
        let frame = if remaining[u] == 1 {
            unique_frames[u].take()
        } else {
            unique_frames[u].clone()
        };
        out.push(frame.ok_or_else(|| VideoGenError::evaluation("internal error: unique frame missing"))?);
        remaining[u] -= 1;
    }

    let total = evals.len() as u64;
    let rendered_count = unique_indices.len() as u64;
    Ok((
        out,
        RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
            frames_unique: 0,
        },
    ))
}

fn count_unique(fingerprints: impl Iterator<Item = FrameFingerprint>) -> u64 {
    fingerprints.collect::<HashSet<_>>().len() as u64
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> VideoGenResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VideoGenError::validation(
            "threads",
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VideoGenError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

pub(crate) fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

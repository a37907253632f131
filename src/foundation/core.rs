use crate::foundation::error::{VideoGenError, VideoGenResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based frame number inside a template's timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame number as a float, for animation math.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> VideoGenResult<Self> {
        if start.0 > end.0 {
            return Err(VideoGenError::evaluation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Integer frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(pub u32);

impl Fps {
    /// Build a frame rate, rejecting zero.
    pub fn new(fps: u32) -> VideoGenResult<Self> {
        if fps == 0 {
            return Err(VideoGenError::evaluation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) / self.as_f64()
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width as a float.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Canvas center point.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }
}

/// Node transform: rotate and scale around `anchor`, then translate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation applied last.
    pub translate: Vec2,
    /// Rotation in radians around `anchor`.
    pub rotation_rad: f64,
    /// Scale around `anchor`, default (1,1).
    pub scale: Vec2,
    /// Pivot in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::default()
        }
    }

    /// Builder: uniform scale.
    pub fn with_scale(mut self, s: f64) -> Self {
        self.scale = Vec2::new(s, s);
        self
    }

    /// Builder: rotation in degrees.
    pub fn with_rotation_deg(mut self, deg: f64) -> Self {
        self.rotation_rad = deg.to_radians();
        self
    }

    /// Builder: pivot for rotation and scale.
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Vec2::new(x, y);
        self
    }

    /// True when the transform leaves points unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Resolve to an affine matrix.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

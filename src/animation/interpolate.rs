use crate::animation::ease::Ease;
use crate::foundation::error::{VideoGenError, VideoGenResult};

/// What a curve returns for inputs outside its key range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Hold the nearest boundary output.
    #[default]
    Clamp,
    /// Continue the outermost segment linearly.
    ///
    /// Easing is not applied outside the key range: eased progress is pinned to `[0, 1]`, so
    /// the continuation follows the straight line through the outermost keys. JavaScript
    /// `interpolate` helpers instead feed the extrapolated progress through the easing.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Keyframed scalar: `input` frames mapped onto `output` values through `ease`.
///
/// `input` is non-decreasing and has the same length as `output` (at least two keys). A
/// zero-width segment acts as a step to the later key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationCurve {
    input: Vec<f64>,
    output: Vec<f64>,
    ease: Ease,
    left: Extrapolate,
    right: Extrapolate,
}

impl AnimationCurve {
    /// Build a clamped, linear curve after checking the key invariants.
    pub fn new(input: impl Into<Vec<f64>>, output: impl Into<Vec<f64>>) -> VideoGenResult<Self> {
        let input = input.into();
        let output = output.into();
        validate_ranges(&input, &output)?;
        Ok(Self {
            input,
            output,
            ease: Ease::LINEAR,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        })
    }

    /// Builder: easing applied within every segment.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Builder: extrapolation on both sides.
    pub fn with_extrapolate(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Key frames.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Key values.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Value at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        sample_keys(&self.input, &self.output, self.ease, self.left, self.right, x)
    }
}

/// One-shot clamped interpolation, validating the ranges on every call.
pub fn interpolate(x: f64, input: &[f64], output: &[f64], ease: Ease) -> VideoGenResult<f64> {
    validate_ranges(input, output)?;
    Ok(sample_keys(
        input,
        output,
        ease,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
        x,
    ))
}

/// Clamped two-key interpolation: `from` before `window.0`, `to` after `window.1`.
///
/// `window.0 <= window.1` is assumed; an empty window steps at its frame.
pub fn tween(x: f64, window: (f64, f64), from: f64, to: f64, ease: Ease) -> f64 {
    let (a, b) = window;
    if x < a {
        return from;
    }
    if x > b {
        return to;
    }
    segment(x, a, b, from, to, ease)
}

fn validate_ranges(input: &[f64], output: &[f64]) -> VideoGenResult<()> {
    if input.len() != output.len() {
        return Err(VideoGenError::animation(format!(
            "input range has {} keys but output range has {}",
            input.len(),
            output.len()
        )));
    }
    if input.len() < 2 {
        return Err(VideoGenError::animation(
            "a curve needs at least two keyframes",
        ));
    }
    if input.iter().chain(output).any(|v| !v.is_finite()) {
        return Err(VideoGenError::animation("curve keys must be finite"));
    }
    if !input.windows(2).all(|w| w[0] <= w[1]) {
        return Err(VideoGenError::animation(
            "input range must be monotonically non-decreasing",
        ));
    }
    Ok(())
}

fn sample_keys(
    input: &[f64],
    output: &[f64],
    ease: Ease,
    left: Extrapolate,
    right: Extrapolate,
    x: f64,
) -> f64 {
    let last = input.len() - 1;

    if x < input[0] {
        match left {
            Extrapolate::Clamp => return output[0],
            Extrapolate::Identity => return x,
            Extrapolate::Extend => {}
        }
    }
    if x > input[last] {
        match right {
            Extrapolate::Clamp => return output[last],
            Extrapolate::Identity => return x,
            Extrapolate::Extend => {}
        }
    }

    let hi = input[1..last]
        .iter()
        .position(|&k| k >= x)
        .map_or(last, |p| p + 1);
    let lo = hi - 1;
    segment(x, input[lo], input[hi], output[lo], output[hi], ease)
}

fn segment(x: f64, a: f64, b: f64, from: f64, to: f64, ease: Ease) -> f64 {
    if b <= a {
        return if x < a { from } else { to };
    }
    let t = (x - a) / (b - a);
    let te = if (0.0..=1.0).contains(&t) {
        ease.apply(t)
    } else {
        t
    };
    from + (to - from) * te
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;

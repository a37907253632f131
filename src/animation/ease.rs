use std::f64::consts::PI;

/// Base easing curve, expressed as its "in" form over `t in [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Curve {
    /// Identity.
    Linear,
    /// CSS `ease-in` style bezier `(0.42, 0, 1, 1)`.
    Ease,
    /// `t^2`.
    Quad,
    /// `t^3`.
    Cubic,
    /// `t^n`.
    Poly(f64),
    /// Quarter sine.
    Sin,
    /// Quarter circle.
    Circle,
    /// `2^(10(t-1))`.
    Exp,
    /// Spring-like oscillation; the value is the bounciness.
    Elastic(f64),
    /// Pull back before moving forward; the value is the overshoot.
    Back(f64),
    /// Decaying bounces.
    Bounce,
    /// Arbitrary cubic bezier timing function.
    Bezier(CubicBezier),
}

impl Curve {
    fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Ease => CubicBezier::EASE.solve(t),
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Poly(n) => t.powf(n),
            Self::Sin => 1.0 - (t * PI / 2.0).cos(),
            Self::Circle => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Exp => 2f64.powf(10.0 * (t - 1.0)),
            Self::Elastic(bounciness) => {
                let p = bounciness * PI;
                1.0 - (t * PI / 2.0).cos().powi(3) * (t * p).cos()
            }
            Self::Back(s) => t * t * ((s + 1.0) * t - s),
            Self::Bounce => bounce(t),
            Self::Bezier(b) => b.solve(t),
        }
    }
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t2 = t - 1.5 / D;
        N * t2 * t2 + 0.75
    } else if t < 2.5 / D {
        let t2 = t - 2.25 / D;
        N * t2 * t2 + 0.9375
    } else {
        let t2 = t - 2.625 / D;
        N * t2 * t2 + 0.984375
    }
}

/// How a [`Curve`] is applied over the unit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EaseMode {
    /// Curve as-is.
    In,
    /// Mirrored: `1 - f(1 - t)`.
    Out,
    /// First half `In`, second half `Out`.
    InOut,
}

/// Easing function: a curve plus the mode it is applied in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ease {
    /// Base curve.
    pub curve: Curve,
    /// Application mode.
    pub mode: EaseMode,
}

impl Default for Ease {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl Ease {
    /// Identity easing.
    pub const LINEAR: Self = Self {
        curve: Curve::Linear,
        mode: EaseMode::In,
    };

    /// Curve applied as-is.
    pub fn in_(curve: Curve) -> Self {
        Self {
            curve,
            mode: EaseMode::In,
        }
    }

    /// Curve mirrored so it decelerates into the end value.
    pub fn out(curve: Curve) -> Self {
        Self {
            curve,
            mode: EaseMode::Out,
        }
    }

    /// Curve accelerating then decelerating.
    pub fn in_out(curve: Curve) -> Self {
        Self {
            curve,
            mode: EaseMode::InOut,
        }
    }

    /// Map linear progress `t` (clamped to `[0, 1]`) to eased progress.
    ///
    /// The endpoints map to exactly 0 and 1. `Back` and `Elastic` curves may leave
    /// `[0, 1]` in between.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self.mode {
            EaseMode::In => self.curve.sample(t),
            EaseMode::Out => 1.0 - self.curve.sample(1.0 - t),
            EaseMode::InOut => {
                if t < 0.5 {
                    self.curve.sample(t * 2.0) / 2.0
                } else {
                    1.0 - self.curve.sample((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

/// CSS-style cubic bezier timing function through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicBezier {
    /// First control point x, expected in `[0, 1]`.
    pub x1: f64,
    /// First control point y.
    pub y1: f64,
    /// Second control point x, expected in `[0, 1]`.
    pub x2: f64,
    /// Second control point y.
    pub y2: f64,
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-3;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 30;

impl CubicBezier {
    /// The `ease` keyword curve used by [`Curve::Ease`].
    pub const EASE: Self = Self::new(0.42, 0.0, 1.0, 1.0);

    /// Build a timing function from its two control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased value for input progress `x`.
    pub fn solve(self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        let t = self.t_for_x(x);
        calc_bezier(t, self.y1, self.y2)
    }

    fn t_for_x(self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let slope = slope(t, self.x1, self.x2);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            let err = calc_bezier(t, self.x1, self.x2) - x;
            if err.abs() < SUBDIVISION_PRECISION {
                return t;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            let err = calc_bezier(t, self.x1, self.x2) - x;
            if err.abs() < SUBDIVISION_PRECISION {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

fn coeffs(a1: f64, a2: f64) -> (f64, f64, f64) {
    (1.0 - 3.0 * a2 + 3.0 * a1, 3.0 * a2 - 6.0 * a1, 3.0 * a1)
}

fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    let (a, b, c) = coeffs(a1, a2);
    ((a * t + b) * t + c) * t
}

fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    let (a, b, c) = coeffs(a1, a2);
    3.0 * a * t * t + 2.0 * b * t + c
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

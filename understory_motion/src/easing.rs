// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `cos`

/// Easing curve applied to a linear animation fraction.
///
/// Every curve maps `0.0` to `0.0` and `1.0` to `1.0`; inputs outside
/// `[0, 1]` are clamped first.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Starts slowly and speeds up (`t²`).
    Accelerate,
    /// Starts quickly and slows down (`1 - (1 - t)²`).
    #[default]
    Decelerate,
    /// Slow at both ends, fastest in the middle (a half cosine).
    AccelerateDecelerate,
    /// The Material "standard" curve, `cubic-bezier(0.4, 0.0, 0.2, 1.0)`.
    FastOutSlowIn,
    /// A CSS-style cubic Bézier timing curve through `(0, 0)`, the two control
    /// points, and `(1, 1)`.
    ///
    /// `x1` and `x2` should lie in `[0, 1]` for the curve to be a function
    /// of time.
    CubicBezier {
        /// X of the first control point.
        x1: f64,
        /// Y of the first control point.
        y1: f64,
        /// X of the second control point.
        x2: f64,
        /// Y of the second control point.
        y2: f64,
    },
}

impl Easing {
    /// Applies the curve to a linear fraction.
    ///
    /// Non-finite input is treated as complete and returns `1.0`.
    #[must_use]
    pub fn transform(self, fraction: f64) -> f64 {
        if !fraction.is_finite() {
            return 1.0;
        }
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() * 0.5 + 0.5,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Evaluates a unit cubic Bézier timing curve at `x = fraction`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let derivative = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Solve x(t) = fraction for the curve parameter, then read y(t).
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..32 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-7 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

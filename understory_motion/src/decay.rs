// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spline-based fling decay.
//!
//! The constants reproduce the classic Android scroller physics, so flings
//! travel the distance users of touch UIs expect for a given release velocity.

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ln` and `powf`

/// Inflection point of the fling tension curve.
const INFLECTION: f64 = 0.35;
/// `|ln(0.78) / ln(0.9)|`.
const DECELERATION_RATE: f64 = 2.358_201_6;
/// Earth's gravity in m/s².
const GRAVITY_EARTH: f64 = 9.806_65;
const INCHES_PER_METER: f64 = 39.37;
/// Pixels per inch at a density of `1.0`.
const BASELINE_PPI: f64 = 160.0;

#[cfg(feature = "std")]
fn exp(x: f64) -> f64 {
    x.exp()
}

// Kurbo's float shim has no `exp`.
#[cfg(not(feature = "std"))]
fn exp(x: f64) -> f64 {
    core::f64::consts::E.powf(x)
}

/// Projects how far a fling travels before friction brings it to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingCalculator {
    friction: f64,
    physical_coefficient: f64,
}

impl FlingCalculator {
    /// Default scroll friction.
    pub const DEFAULT_FRICTION: f64 = 0.015;

    /// Creates a calculator.
    ///
    /// - `friction` scales deceleration; higher values stop sooner.
    /// - `density` is the number of pixels per density-independent pixel
    ///   (`1.0` for a 160 ppi baseline display).
    #[must_use]
    pub fn new(friction: f64, density: f64) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * BASELINE_PPI * density * 0.84,
        }
    }

    /// Creates a calculator with [`Self::DEFAULT_FRICTION`].
    #[must_use]
    pub fn with_density(density: f64) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    /// Natural log of the normalized release speed, or `None` when the fling
    /// cannot move (zero, non-finite, or degenerate parameters).
    fn spline_deceleration(&self, velocity: f64) -> Option<f64> {
        let deceleration = self.friction * self.physical_coefficient;
        if !velocity.is_finite() || velocity == 0.0 || deceleration.is_nan() || deceleration <= 0.0 {
            return None;
        }
        Some((INFLECTION * velocity.abs() / deceleration).ln())
    }

    /// Total unsigned distance, in pixels, a fling at `velocity` px/s travels.
    #[must_use]
    pub fn fling_distance(&self, velocity: f64) -> f64 {
        let Some(l) = self.spline_deceleration(velocity) else {
            return 0.0;
        };
        let decel_minus_one = DECELERATION_RATE - 1.0;
        self.friction * self.physical_coefficient * exp(DECELERATION_RATE / decel_minus_one * l)
    }

    /// Time a fling at `velocity` px/s takes to come to rest.
    #[must_use]
    pub fn fling_duration(&self, velocity: f64) -> Duration {
        let Some(l) = self.spline_deceleration(velocity) else {
            return Duration::ZERO;
        };
        let secs = exp(l / (DECELERATION_RATE - 1.0));
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }

    /// Resting position of a fling that starts at `start` with `velocity`,
    /// clamped into `[min, max]`.
    ///
    /// If `min > max` the bounds are swapped.
    #[must_use]
    pub fn project(&self, start: f64, velocity: f64, min: f64, max: f64) -> f64 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let end = start + self.fling_distance(velocity) * velocity.signum();
        if end.is_finite() {
            end.clamp(min, max)
        } else {
            start.clamp(min, max)
        }
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::FlingCalculator;

    #[test]
    fn faster_flings_travel_further_and_longer() {
        let calc = FlingCalculator::with_density(2.0);
        let slow = calc.fling_distance(2_000.0);
        let fast = calc.fling_distance(8_000.0);
        assert!(slow > 0.0);
        assert!(fast > slow);
        assert!(calc.fling_duration(8_000.0) > calc.fling_duration(2_000.0));
    }

    #[test]
    fn distance_is_symmetric_in_direction() {
        let calc = FlingCalculator::default();
        let right = calc.fling_distance(3_000.0);
        let left = calc.fling_distance(-3_000.0);
        assert!((right - left).abs() < 1e-9);
    }

    #[test]
    fn still_and_invalid_velocities_do_not_move() {
        let calc = FlingCalculator::default();
        assert_eq!(calc.fling_distance(0.0), 0.0);
        assert_eq!(calc.fling_distance(f64::NAN), 0.0);
        assert_eq!(calc.fling_duration(0.0), Duration::ZERO);
        assert_eq!(calc.project(12.0, 0.0, 0.0, 100.0), 12.0);
    }

    #[test]
    fn projection_respects_bounds_and_direction() {
        let calc = FlingCalculator::default();
        let down = calc.project(0.0, 50_000.0, -100.0, 100.0);
        assert_eq!(down, 100.0);
        let up = calc.project(0.0, -50_000.0, -100.0, 100.0);
        assert_eq!(up, -100.0);
        // Swapped bounds are normalized.
        assert_eq!(calc.project(0.0, 50_000.0, 100.0, -100.0), 100.0);
    }

    #[test]
    fn zero_friction_never_moves() {
        let calc = FlingCalculator::new(0.0, 1.0);
        assert_eq!(calc.fling_distance(5_000.0), 0.0);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::Easing;

/// Duration used by [`AnimationSpec::default`].
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// A fixed animation duration paired with an easing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Total running time.
    pub duration: Duration,
    /// Curve applied to the linear progress.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Creates a spec from a duration and an easing curve.
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Creates a spec from a duration in milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64, easing: Easing) -> Self {
        Self::new(Duration::from_millis(millis), easing)
    }

    /// Returns a copy with a different duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns a copy with a different easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::Decelerate)
    }
}

/// Progress of one fixed-duration animation.
///
/// A tween never reads a clock: the host advances it by explicit deltas, which
/// keeps it deterministic under test and lets one frame loop drive any number
/// of them. A zero-length tween completes on its first advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    spec: AnimationSpec,
    elapsed: Duration,
}

impl Tween {
    /// Creates a tween at progress zero.
    #[must_use]
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            spec,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the spec this tween runs.
    #[must_use]
    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Returns the time advanced so far, saturated at the duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advances by `dt` and returns the eased progress.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.spec.duration);
        self.value()
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.spec.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.spec.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress.
    ///
    /// Exactly `1.0` once the tween has finished, regardless of how the
    /// easing curve rounds at its endpoint.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            1.0
        } else {
            self.spec.easing.transform(self.fraction())
        }
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.spec.duration
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_motion::{AnimationSpec, DEFAULT_DURATION, Easing, FlingCalculator};

/// Default ratio of the maximum scale to the fit scale.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;
/// Default container translation per unit of vertical drag.
pub const DEFAULT_DRAG_FRICTION: f64 = 1.0;
/// Default dismiss distance, as a fraction of the container height.
pub const DEFAULT_DRAG_DISMISS_DISTANCE_RATIO: f64 = 0.25;
/// Default drag distance, in dp, under which a fling dismisses.
pub const DEFAULT_FLING_DISMISS_THRESHOLD_DP: f64 = 96.0;

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ConfigError {
    /// `max_zoom` must be finite and greater than `1.0`.
    #[cfg_attr(feature = "std", error("max zoom must be finite and greater than 1.0, got {0}"))]
    MaxZoomTooSmall(f64),
    /// `drag_friction` must be finite and positive.
    #[cfg_attr(feature = "std", error("drag friction must be finite and positive, got {0}"))]
    InvalidDragFriction(f64),
    /// `drag_dismiss_distance_ratio` must lie in `(0, 1]`.
    #[cfg_attr(feature = "std", error("drag dismiss distance ratio must lie in (0, 1], got {0}"))]
    InvalidDismissRatio(f64),
    /// `fling_dismiss_threshold_dp` must be finite and non-negative.
    #[cfg_attr(feature = "std", error("fling dismiss threshold must be finite and non-negative, got {0}"))]
    InvalidFlingThreshold(f64),
    /// `pixels_per_dp` must be finite and positive.
    #[cfg_attr(feature = "std", error("pixels per dp must be finite and positive, got {0}"))]
    InvalidPixelsPerDp(f64),
    /// `fling_friction` must be finite and positive.
    #[cfg_attr(feature = "std", error("fling friction must be finite and positive, got {0}"))]
    InvalidFlingFriction(f64),
}

/// Tunables for a [`ZoomPanController`](crate::ZoomPanController).
///
/// Every field has a default; use the `with_*` setters to override some of
/// them and [`ZoomPanConfig::validate`] (or the controller constructor) to
/// check the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPanConfig {
    /// Maximum scale as a multiple of the fit scale. Must be greater than `1.0`.
    pub max_zoom: f64,
    /// Animate the container off-screen on dismiss. When `false` the dismiss
    /// callback fires immediately.
    pub use_dismiss_animation: bool,
    /// Container slide-out after a dismiss decision.
    pub dismiss: AnimationSpec,
    /// Container slide-back after a cancelled drag.
    pub restore: AnimationSpec,
    /// Inertial scroll after a fling while zoomed.
    pub fling: AnimationSpec,
    /// Double-tap zoom in and out.
    pub double_tap_zoom: AnimationSpec,
    /// Snap back to the fit scale after pinching below it.
    pub over_scale: AnimationSpec,
    /// Rubber-band settle after panning past the bitmap edge.
    pub over_scroll: AnimationSpec,
    /// Container translation per unit of vertical drag. `1.0` tracks the finger.
    pub drag_friction: f64,
    /// Drag distance past which a release dismisses, as a fraction of the
    /// container height.
    pub drag_dismiss_distance_ratio: f64,
    /// A fling dismisses only while the drag distance is below this many dp.
    pub fling_dismiss_threshold_dp: f64,
    /// Display density used for dp conversions and fling physics.
    pub pixels_per_dp: f64,
    /// Friction of the fling decay projection.
    pub fling_friction: f64,
}

impl Default for ZoomPanConfig {
    fn default() -> Self {
        let settle = AnimationSpec::new(DEFAULT_DURATION, Easing::Decelerate);
        let slide = AnimationSpec::new(DEFAULT_DURATION, Easing::AccelerateDecelerate);
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            use_dismiss_animation: true,
            dismiss: slide,
            restore: slide,
            fling: settle,
            double_tap_zoom: settle,
            over_scale: settle,
            over_scroll: settle,
            drag_friction: DEFAULT_DRAG_FRICTION,
            drag_dismiss_distance_ratio: DEFAULT_DRAG_DISMISS_DISTANCE_RATIO,
            fling_dismiss_threshold_dp: DEFAULT_FLING_DISMISS_THRESHOLD_DP,
            pixels_per_dp: 1.0,
            fling_friction: FlingCalculator::DEFAULT_FRICTION,
        }
    }
}

impl ZoomPanConfig {
    /// Checks every numeric field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !(self.max_zoom.is_finite() && self.max_zoom > 1.0) {
            return Err(ConfigError::MaxZoomTooSmall(self.max_zoom));
        }
        if !finite_positive(self.drag_friction) {
            return Err(ConfigError::InvalidDragFriction(self.drag_friction));
        }
        if !(finite_positive(self.drag_dismiss_distance_ratio)
            && self.drag_dismiss_distance_ratio <= 1.0)
        {
            return Err(ConfigError::InvalidDismissRatio(
                self.drag_dismiss_distance_ratio,
            ));
        }
        if !(self.fling_dismiss_threshold_dp.is_finite() && self.fling_dismiss_threshold_dp >= 0.0)
        {
            return Err(ConfigError::InvalidFlingThreshold(
                self.fling_dismiss_threshold_dp,
            ));
        }
        if !finite_positive(self.pixels_per_dp) {
            return Err(ConfigError::InvalidPixelsPerDp(self.pixels_per_dp));
        }
        if !finite_positive(self.fling_friction) {
            return Err(ConfigError::InvalidFlingFriction(self.fling_friction));
        }
        Ok(())
    }

    /// Fling dismiss threshold converted to pixels.
    #[must_use]
    pub fn fling_dismiss_threshold_px(&self) -> f64 {
        self.fling_dismiss_threshold_dp * self.pixels_per_dp
    }

    /// Sets [`Self::max_zoom`].
    #[must_use]
    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Sets [`Self::use_dismiss_animation`].
    #[must_use]
    pub fn with_dismiss_animation(mut self, enabled: bool) -> Self {
        self.use_dismiss_animation = enabled;
        self
    }

    /// Sets [`Self::dismiss`].
    #[must_use]
    pub fn with_dismiss(mut self, spec: AnimationSpec) -> Self {
        self.dismiss = spec;
        self
    }

    /// Sets [`Self::restore`].
    #[must_use]
    pub fn with_restore(mut self, spec: AnimationSpec) -> Self {
        self.restore = spec;
        self
    }

    /// Sets [`Self::fling`].
    #[must_use]
    pub fn with_fling(mut self, spec: AnimationSpec) -> Self {
        self.fling = spec;
        self
    }

    /// Sets [`Self::double_tap_zoom`].
    #[must_use]
    pub fn with_double_tap_zoom(mut self, spec: AnimationSpec) -> Self {
        self.double_tap_zoom = spec;
        self
    }

    /// Sets [`Self::over_scale`].
    #[must_use]
    pub fn with_over_scale(mut self, spec: AnimationSpec) -> Self {
        self.over_scale = spec;
        self
    }

    /// Sets [`Self::over_scroll`].
    #[must_use]
    pub fn with_over_scroll(mut self, spec: AnimationSpec) -> Self {
        self.over_scroll = spec;
        self
    }

    /// Sets [`Self::drag_friction`].
    #[must_use]
    pub fn with_drag_friction(mut self, friction: f64) -> Self {
        self.drag_friction = friction;
        self
    }

    /// Sets [`Self::drag_dismiss_distance_ratio`].
    #[must_use]
    pub fn with_drag_dismiss_distance_ratio(mut self, ratio: f64) -> Self {
        self.drag_dismiss_distance_ratio = ratio;
        self
    }

    /// Sets [`Self::fling_dismiss_threshold_dp`].
    #[must_use]
    pub fn with_fling_dismiss_threshold_dp(mut self, dp: f64) -> Self {
        self.fling_dismiss_threshold_dp = dp;
        self
    }

    /// Sets [`Self::pixels_per_dp`].
    #[must_use]
    pub fn with_pixels_per_dp(mut self, density: f64) -> Self {
        self.pixels_per_dp = density;
        self
    }

    /// Sets [`Self::fling_friction`].
    #[must_use]
    pub fn with_fling_friction(mut self, friction: f64) -> Self {
        self.fling_friction = friction;
        self
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect, Size, Vec2};
use log::debug;

use crate::animation::Motion;
use crate::callbacks::ZoomPanCallbacks;
use crate::config::{ConfigError, ZoomPanConfig};
use crate::dismiss::{DismissPhase, DismissState};
use crate::geometry::{ContainerLayout, Geometry, ScaleZone};
use crate::gesture::GestureState;

/// Headless zoom, pan and drag-to-dismiss controller for a single bitmap.
///
/// The host feeds it layout changes ([`set_container`](Self::set_container),
/// [`set_bitmap`](Self::set_bitmap)), decoded input
/// ([`handle_event`](Self::handle_event)) and frame ticks
/// ([`advance`](Self::advance)), and reads back a render
/// [`transform`](Self::transform) plus a
/// [`container_translation`](Self::container_translation).
#[derive(Debug)]
pub struct ZoomPanController {
    pub(crate) config: ZoomPanConfig,
    pub(crate) callbacks: ZoomPanCallbacks,
    layout: Option<ContainerLayout>,
    bitmap_size: Option<Size>,
    pub(crate) geometry: Geometry,
    pub(crate) ready: bool,
    pub(crate) motion: Option<Motion>,
    pub(crate) dismiss: DismissState,
    pub(crate) pinching: bool,
    pub(crate) panning: bool,
    pub(crate) fling_dismiss_pending: bool,
}

impl Default for ZoomPanController {
    fn default() -> Self {
        Self::with_valid_config(ZoomPanConfig::default())
    }
}

impl ZoomPanController {
    /// Creates a controller with no container and no bitmap.
    ///
    /// It stays [not ready](Self::is_ready) until both are provided.
    pub fn new(config: ZoomPanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ZoomPanConfig) -> Self {
        Self {
            config,
            callbacks: ZoomPanCallbacks::default(),
            layout: None,
            bitmap_size: None,
            geometry: Geometry::default(),
            ready: false,
            motion: None,
            dismiss: DismissState::default(),
            pinching: false,
            panning: false,
            fling_dismiss_pending: false,
        }
    }

    /// Replaces the callbacks, builder style.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: ZoomPanCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Replaces the callbacks.
    pub fn set_callbacks(&mut self, callbacks: ZoomPanCallbacks) {
        self.callbacks = callbacks;
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomPanConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// An invalid configuration is rejected and the current one kept. A new
    /// `max_zoom` applies from the next layout.
    pub fn set_config(&mut self, config: ZoomPanConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            debug!("rejected config: {err:?}");
            return Err(err);
        }
        self.config = config;
        Ok(())
    }

    /// Sets the container size and padding.
    ///
    /// Resets scale and position when the layout actually changes; repeating
    /// the current layout is a no-op. Geometry animations are cancelled; a
    /// running dismiss or restore keeps going.
    pub fn set_container(&mut self, layout: ContainerLayout) {
        if self.layout == Some(layout) {
            return;
        }
        self.layout = Some(layout);
        self.cancel_geometry_motion();
        self.setup_layout();
    }

    /// Binds a bitmap by its pixel size, or unbinds it with `None`.
    ///
    /// A new bitmap resets scale and position like a resize, and brings a
    /// dismissed view back to rest.
    pub fn set_bitmap(&mut self, size: Option<Size>) {
        if self.bitmap_size == size {
            return;
        }
        self.bitmap_size = size;
        self.cancel_geometry_motion();
        if self.dismiss.phase() == DismissPhase::Dismissed {
            self.dismiss.reset();
            self.clear_gesture_flags();
        }
        self.setup_layout();
    }

    /// Recomputes all geometry from the current container and bitmap.
    fn setup_layout(&mut self) {
        let (Some(layout), Some(bitmap)) = (self.layout, self.bitmap_size) else {
            self.ready = false;
            return;
        };
        self.dismiss.set_container_height(layout.size.height);
        self.ready = self
            .geometry
            .layout(layout.content_bounds(), bitmap, self.config.max_zoom);
        if self.ready {
            debug!(
                "layout {:?} for bitmap {bitmap:?}: scale range {}..={}",
                self.geometry.container, self.geometry.min_scale, self.geometry.max_scale
            );
        } else {
            debug!("degenerate layout {layout:?} for bitmap {bitmap:?}");
        }
    }

    /// Whether both a usable container and a bitmap are bound.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Bitmap-pixel to container transform for the renderer.
    ///
    /// Identity while the controller is not ready.
    #[must_use]
    pub fn transform(&self) -> Affine {
        if self.ready {
            self.geometry.transform()
        } else {
            Affine::IDENTITY
        }
    }

    /// Translation of the whole container from a dismiss drag.
    #[must_use]
    pub fn container_translation(&self) -> Vec2 {
        Vec2::new(0.0, self.dismiss.offset())
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.geometry.scale
    }

    /// The fit scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.geometry.min_scale
    }

    /// The fit scale times `max_zoom`.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.geometry.max_scale
    }

    /// Where the scale sits relative to the fit scale.
    #[must_use]
    pub fn scale_zone(&self) -> ScaleZone {
        self.geometry.zone()
    }

    /// Displayed bitmap rectangle in container coordinates.
    #[must_use]
    pub fn bitmap_bounds(&self) -> Rect {
        self.geometry.bitmap
    }

    /// Region of the container the bitmap must cover once settled.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.geometry.viewport
    }

    /// Container area minus padding.
    #[must_use]
    pub fn container_bounds(&self) -> Rect {
        self.geometry.container
    }

    /// Vertical dismiss-drag offset; zero at rest.
    #[must_use]
    pub fn drag_offset(&self) -> f64 {
        self.dismiss.offset()
    }

    /// Phase of the drag-to-dismiss interaction.
    #[must_use]
    pub fn dismiss_phase(&self) -> DismissPhase {
        self.dismiss.phase()
    }

    /// Whether an animation is waiting for frames; keep calling
    /// [`advance`](Self::advance) while this is `true`.
    ///
    /// `false` while the controller is not ready. A dismiss or restore that
    /// was running when the bitmap was unbound resumes once it is ready again.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.ready && self.motion.is_some()
    }

    /// Whether the host should keep touches from its parents, such as a
    /// surrounding scroll view. `true` while zoomed away from the fit scale.
    #[must_use]
    pub fn wants_exclusive_touch(&self) -> bool {
        self.ready && self.geometry.scale != self.geometry.min_scale
    }

    /// Brings a dismissed, dismissing or restoring view back to rest at once.
    pub fn reset_dismiss(&mut self) {
        if let Some(m) = self.motion.take_if(|m| !m.is_geometry()) {
            debug!("cancelled {:?} on dismiss reset", m.gesture_state());
        }
        self.dismiss.reset();
        self.clear_gesture_flags();
    }

    /// Returns a snapshot of the controller state for logging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomPanDebugInfo {
        let g = &self.geometry;
        ZoomPanDebugInfo {
            ready: self.ready,
            container_bounds: g.container,
            bitmap_bounds: g.bitmap,
            viewport: g.viewport,
            scale: g.scale,
            min_scale: g.min_scale,
            max_scale: g.max_scale,
            horizontal_pan: g.horizontal_pan,
            vertical_pan: g.vertical_pan,
            gesture_state: self.gesture_state(),
            dismiss_phase: self.dismiss.phase(),
            drag_offset: self.dismiss.offset(),
        }
    }
}

/// Snapshot of a [`ZoomPanController`], as returned by
/// [`ZoomPanController::debug_info`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPanDebugInfo {
    /// Whether the controller had a usable container and bitmap.
    pub ready: bool,
    /// Container area minus padding.
    pub container_bounds: Rect,
    /// Displayed bitmap rectangle.
    pub bitmap_bounds: Rect,
    /// Region the bitmap must cover once settled.
    pub viewport: Rect,
    /// Current scale.
    pub scale: f64,
    /// Fit scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Whether the bitmap is wider than the container.
    pub horizontal_pan: bool,
    /// Whether the bitmap is taller than the container.
    pub vertical_pan: bool,
    /// What governed the transform.
    pub gesture_state: GestureState,
    /// Dismiss phase.
    pub dismiss_phase: DismissPhase,
    /// Vertical dismiss-drag offset.
    pub drag_offset: f64,
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: decoded input events and how each one is routed.
//!
//! ## Dispatch
//!
//! - Pinches scale about their focal point, capped at the maximum scale but
//!   free to undershoot the fit scale until release.
//! - Single-pointer moves pan when zoomed in and drive the dismiss drag at the
//!   fit scale. The zone is checked on every move.
//! - Flings scroll inertially when zoomed in and dismiss at the fit scale.
//! - Double taps toggle between the fit scale and a medium zoom. Zooming
//!   out shares the snap-back path, timed by the double-tap spec.
//! - Everything except [`GestureEvent::Down`], [`GestureEvent::Up`] and
//!   [`GestureEvent::Cancel`] is ignored while an animation runs.

use kurbo::{Point, Vec2};
use log::{debug, trace};

use crate::ZoomPanController;
use crate::dismiss::{DismissPhase, Release};
use crate::geometry::ScaleZone;

/// A decoded input event.
///
/// Raw touch decoding happens upstream; the controller only sees these
/// intents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// The first pointer touched down.
    Down {
        /// Touch location in container coordinates.
        position: Point,
    },
    /// Pointer movement since the previous event.
    Move {
        /// Finger motion; positive is right and down.
        delta: Vec2,
        /// Number of pointers currently down. Only `1` pans or drags.
        pointer_count: usize,
    },
    /// One step of a two-finger pinch.
    Pinch {
        /// Incremental scale factor for this step.
        factor: f64,
        /// Pinch center in container coordinates.
        focal: Point,
    },
    /// A high-velocity release, delivered before the matching [`GestureEvent::Up`].
    Fling {
        /// Release velocity in pixels per second.
        velocity: Vec2,
    },
    /// A double tap.
    DoubleTap {
        /// Tap location in container coordinates.
        position: Point,
    },
    /// The last pointer lifted.
    Up,
    /// The host cancelled the gesture. Handled like [`GestureEvent::Up`].
    Cancel,
}

/// What currently governs the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A pinch is in progress.
    Scaling,
    /// A single-pointer pan is in progress.
    Panning,
    /// An inertial fling is animating.
    Flinging,
    /// Snapping back to the fit scale.
    AnimatingSnap,
    /// Animating a double-tap zoom.
    AnimatingDoubleTap,
    /// Settling a pan that went past the bitmap edge.
    AnimatingOverScroll,
    /// A dismiss drag is in progress.
    Dragging,
    /// Sliding the container off-screen.
    AnimatingDismiss,
    /// Sliding the container back to rest.
    AnimatingRestore,
    /// The view has been dismissed.
    Dismissed,
}

impl ZoomPanController {
    /// Feeds one input event.
    ///
    /// Returns `true` if the event was consumed. Events are consumed even
    /// when they are ignored for the current state; only a controller that
    /// is not ready, or has been dismissed, declines them.
    pub fn handle_event(&mut self, event: GestureEvent) -> bool {
        if !self.ready || self.dismiss.phase() == DismissPhase::Dismissed {
            trace!("declined {event:?}");
            return false;
        }
        trace!("event {event:?}");
        match event {
            GestureEvent::Down { .. } => self.clear_gesture_flags(),
            GestureEvent::Move {
                delta,
                pointer_count,
            } => self.on_move(delta, pointer_count),
            GestureEvent::Pinch { factor, focal } => self.on_pinch(factor, focal),
            GestureEvent::Fling { velocity } => self.on_fling(velocity),
            GestureEvent::DoubleTap { position } => self.on_double_tap(position),
            GestureEvent::Up | GestureEvent::Cancel => self.on_release(),
        }
        true
    }

    /// What currently governs the transform.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        if let Some(motion) = &self.motion {
            return motion.gesture_state();
        }
        match self.dismiss.phase() {
            DismissPhase::Dragging => GestureState::Dragging,
            DismissPhase::Dismissed => GestureState::Dismissed,
            _ if self.pinching => GestureState::Scaling,
            _ if self.panning => GestureState::Panning,
            _ => GestureState::Idle,
        }
    }

    pub(crate) fn clear_gesture_flags(&mut self) {
        self.pinching = false;
        self.panning = false;
        self.fling_dismiss_pending = false;
    }

    fn on_move(&mut self, delta: Vec2, pointer_count: usize) {
        if pointer_count != 1 || self.motion.is_some() {
            return;
        }
        match self.geometry.zone() {
            ScaleZone::Below => {}
            ScaleZone::Above => {
                self.panning = true;
                let applied = self.geometry.pan(delta);
                trace!("pan {applied:?}");
            }
            ScaleZone::AtMin => {
                let Some(step) = self.dismiss.drag(delta.y * self.config.drag_friction) else {
                    return;
                };
                if step.started {
                    debug!("dismiss drag started");
                    self.callbacks.drag_start();
                }
                self.callbacks.drag_progress(step.amount);
            }
        }
    }

    fn on_pinch(&mut self, factor: f64, focal: Point) {
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return;
        }
        if self.motion.is_some() || self.dismiss.phase() != DismissPhase::AtRest {
            return;
        }
        let target = (self.geometry.scale * factor).min(self.geometry.max_scale);
        if target == self.geometry.scale {
            return;
        }
        if !self.pinching {
            debug!("pinch started at scale {}", self.geometry.scale);
        }
        self.pinching = true;
        self.geometry.zoom(target, focal);
        self.callbacks.scale_changed(target, focal);
    }

    fn on_fling(&mut self, velocity: Vec2) {
        if self.motion.is_some() {
            return;
        }
        match self.geometry.zone() {
            ScaleZone::Below => {}
            ScaleZone::Above => self.start_fling(velocity),
            ScaleZone::AtMin => {
                let threshold = self.config.fling_dismiss_threshold_px();
                if velocity.y.is_finite()
                    && velocity.y != 0.0
                    && self.dismiss.can_fling_dismiss(threshold)
                {
                    debug!("fling dismiss at velocity {}", velocity.y);
                    self.fling_dismiss_pending = true;
                    self.begin_dismiss(velocity.y.signum());
                }
            }
        }
    }

    fn on_double_tap(&mut self, position: Point) {
        if self.motion.is_some() || self.dismiss.phase() != DismissPhase::AtRest {
            return;
        }
        let g = &self.geometry;
        match g.zone() {
            ScaleZone::Below => {}
            ScaleZone::AtMin => {
                let medium = g.min_scale * self.config.max_zoom * 0.5;
                let target = medium.clamp(g.min_scale, g.max_scale);
                if target == g.scale {
                    return;
                }
                debug!("double tap zoom {} -> {target}", g.scale);
                self.start_double_tap_zoom(target, position);
            }
            ScaleZone::Above => {
                // Scale and origin travel together toward the centered fit.
                debug!("double tap zoom {} -> fit", g.scale);
                self.start_snap_to_min(self.config.double_tap_zoom);
            }
        }
    }

    fn on_release(&mut self) {
        let fling_dismissed = self.fling_dismiss_pending;
        self.clear_gesture_flags();
        if self.motion.is_some() || fling_dismissed {
            return;
        }
        match self.geometry.zone() {
            ScaleZone::Below => {
                debug!("released below fit scale; snapping back");
                self.start_snap_to_min(self.config.over_scale);
            }
            ScaleZone::AtMin => self.release_drag(),
            ScaleZone::Above => self.constrain_bounds(true),
        }
    }

    fn release_drag(&mut self) {
        let distance = self.dismiss.container_height() * self.config.drag_dismiss_distance_ratio;
        match self.dismiss.release(distance) {
            Release::Ignore => self.constrain_bounds(true),
            Release::Settled => {
                self.dismiss.finish_restore();
                debug!("drag released at rest");
                self.callbacks.restore();
            }
            Release::Dismiss(direction) => self.begin_dismiss(direction),
            Release::Restore => self.start_restore(),
        }
    }
}

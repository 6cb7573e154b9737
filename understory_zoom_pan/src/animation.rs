// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation driver: one active [`Motion`] at a time, stepped by
//! [`ZoomPanController::advance`].
//!
//! Starting a motion replaces whatever ran before it. Completion logic runs
//! with the slot already empty, so a completion that starts a follow-up motion
//! (a double-tap zoom chaining into an over-scroll settle) sees a fully
//! unwound controller.

use core::time::Duration;

use kurbo::{Point, Vec2};
use log::{debug, trace};
use understory_motion::{AnimationSpec, FlingCalculator, Tween, lerp};

use crate::ZoomPanController;
use crate::gesture::GestureState;

/// A running animation and the values it interpolates between.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Motion {
    /// Scale and origin back to the centered fit scale.
    SnapToMin {
        tween: Tween,
        from_scale: f64,
        from_origin: Point,
        to_origin: Point,
    },
    /// Scale up about a fixed focal point.
    DoubleTapZoom {
        tween: Tween,
        from_scale: f64,
        to_scale: f64,
        focal: Point,
    },
    /// Bitmap origin toward a decay-projected resting point.
    Fling {
        tween: Tween,
        from: Point,
        to: Point,
    },
    /// Bitmap origin back inside the viewport.
    OverScroll {
        tween: Tween,
        from: Point,
        to: Point,
    },
    /// Container offset off-screen in `direction` (`±1`). The target is
    /// read from the current container height on every step.
    Dismiss {
        tween: Tween,
        from: f64,
        direction: f64,
    },
    /// Container offset back to zero.
    Restore { tween: Tween, from: f64 },
}

impl Motion {
    fn tween_mut(&mut self) -> &mut Tween {
        match self {
            Self::SnapToMin { tween, .. }
            | Self::DoubleTapZoom { tween, .. }
            | Self::Fling { tween, .. }
            | Self::OverScroll { tween, .. }
            | Self::Dismiss { tween, .. }
            | Self::Restore { tween, .. } => tween,
        }
    }

    /// Whether this motion drives the bitmap geometry rather than the
    /// container offset.
    pub(crate) fn is_geometry(&self) -> bool {
        !matches!(self, Self::Dismiss { .. } | Self::Restore { .. })
    }

    pub(crate) fn gesture_state(&self) -> GestureState {
        match self {
            Self::SnapToMin { .. } => GestureState::AnimatingSnap,
            Self::DoubleTapZoom { .. } => GestureState::AnimatingDoubleTap,
            Self::Fling { .. } => GestureState::Flinging,
            Self::OverScroll { .. } => GestureState::AnimatingOverScroll,
            Self::Dismiss { .. } => GestureState::AnimatingDismiss,
            Self::Restore { .. } => GestureState::AnimatingRestore,
        }
    }
}

fn lerp_point(from: Point, to: Point, t: f64) -> Point {
    Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

impl ZoomPanController {
    /// Steps the active animation by `dt`.
    ///
    /// Call once per frame while [`is_animating`](Self::is_animating) is
    /// `true`. Every step applies the interpolated value, so observers see
    /// the transform and container translation change on every frame, not
    /// only at completion. Returns `true` if anything was updated.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.ready {
            return false;
        }
        let Some(mut motion) = self.motion.take() else {
            return false;
        };
        let tween = motion.tween_mut();
        let t = tween.advance(dt);
        let finished = tween.is_finished();
        trace!("advance {:?} by {dt:?}: t = {t:.4}", motion.gesture_state());
        self.apply_motion(&motion, t);
        if finished {
            debug!("finished {:?}", motion.gesture_state());
            self.finish_motion(motion);
        } else {
            self.motion = Some(motion);
        }
        true
    }

    /// Installs `motion` as the single active animation.
    pub(crate) fn start_motion(&mut self, motion: Motion) {
        match self.motion.replace(motion) {
            Some(previous) => debug!(
                "cancelled {:?} for {:?}",
                previous.gesture_state(),
                motion.gesture_state()
            ),
            None => debug!("started {:?}", motion.gesture_state()),
        }
    }

    /// Drops the active motion if it animates the bitmap geometry.
    ///
    /// Dismiss and restore only move the container and survive relayouts.
    pub(crate) fn cancel_geometry_motion(&mut self) {
        if let Some(m) = self.motion.take_if(|m| m.is_geometry()) {
            debug!("cancelled {:?} on relayout", m.gesture_state());
        }
    }

    /// Animates scale and position back to the centered fit scale.
    pub(crate) fn start_snap_to_min(&mut self, spec: AnimationSpec) {
        let g = &self.geometry;
        let motion = Motion::SnapToMin {
            tween: Tween::new(spec),
            from_scale: g.scale,
            from_origin: g.bitmap.origin(),
            to_origin: g.centered_bitmap(g.min_scale).origin(),
        };
        self.start_motion(motion);
    }

    pub(crate) fn start_double_tap_zoom(&mut self, to_scale: f64, focal: Point) {
        let motion = Motion::DoubleTapZoom {
            tween: Tween::new(self.config.double_tap_zoom),
            from_scale: self.geometry.scale,
            to_scale,
            focal,
        };
        self.start_motion(motion);
    }

    /// Projects a fling per axis and animates the bitmap origin toward it.
    pub(crate) fn start_fling(&mut self, velocity: Vec2) {
        let calculator = FlingCalculator::new(self.config.fling_friction, self.config.pixels_per_dp);
        let (min, max) = self.geometry.origin_limits();
        let from = self.geometry.bitmap.origin();
        let to = Point::new(
            calculator.project(from.x, velocity.x, min.x, max.x),
            calculator.project(from.y, velocity.y, min.y, max.y),
        );
        if to == from {
            trace!("fling {velocity:?} projects nowhere");
            return;
        }
        self.start_motion(Motion::Fling {
            tween: Tween::new(self.config.fling),
            from,
            to,
        });
    }

    /// Moves the bitmap so the viewport is covered again.
    ///
    /// A no-op while any motion runs. When `animated`, corrections on axes
    /// that cannot pan are applied at once and only the rest is animated.
    pub(crate) fn constrain_bounds(&mut self, animated: bool) {
        if self.motion.is_some() {
            return;
        }
        let offset = self.geometry.containment_offset();
        if offset == Vec2::ZERO {
            return;
        }
        if !animated {
            self.geometry.constrain();
            return;
        }
        let instant = Vec2::new(
            if self.geometry.horizontal_pan { 0.0 } else { offset.x },
            if self.geometry.vertical_pan { 0.0 } else { offset.y },
        );
        self.geometry.bitmap = self.geometry.bitmap + instant;
        let remaining = offset - instant;
        if remaining == Vec2::ZERO {
            return;
        }
        let from = self.geometry.bitmap.origin();
        self.start_motion(Motion::OverScroll {
            tween: Tween::new(self.config.over_scroll),
            from,
            to: from + remaining,
        });
    }

    /// Starts sliding the container off-screen in `direction` (`±1`).
    ///
    /// Without a dismiss animation the dismiss completes immediately.
    pub(crate) fn begin_dismiss(&mut self, direction: f64) {
        let from = self.dismiss.offset();
        let to = self.dismiss.begin_dismiss(direction);
        debug!("dismissing from offset {from} toward {to}");
        if !self.config.use_dismiss_animation {
            self.dismiss.set_offset(to);
            self.complete_dismiss();
            return;
        }
        self.start_motion(Motion::Dismiss {
            tween: Tween::new(self.config.dismiss),
            from,
            direction: direction.signum(),
        });
    }

    pub(crate) fn start_restore(&mut self) {
        self.dismiss.begin_restore();
        debug!("restoring from offset {}", self.dismiss.offset());
        self.start_motion(Motion::Restore {
            tween: Tween::new(self.config.restore),
            from: self.dismiss.offset(),
        });
    }

    fn complete_dismiss(&mut self) {
        self.dismiss.finish_dismiss();
        debug!("dismissed");
        self.callbacks.dismiss();
    }

    fn apply_motion(&mut self, motion: &Motion, t: f64) {
        match *motion {
            Motion::SnapToMin {
                from_scale,
                from_origin,
                to_origin,
                ..
            } => {
                let g = &mut self.geometry;
                g.scale = lerp(from_scale, g.min_scale, t);
                g.recompute_bounds();
                g.offset_to(lerp_point(from_origin, to_origin, t));
                let focal = g.container.center();
                self.callbacks.scale_changed(g.scale, focal);
            }
            Motion::DoubleTapZoom {
                from_scale,
                to_scale,
                focal,
                ..
            } => {
                let scale = lerp(from_scale, to_scale, t);
                self.geometry.zoom(scale, focal);
                self.callbacks.scale_changed(scale, focal);
            }
            Motion::Fling { from, to, .. } | Motion::OverScroll { from, to, .. } => {
                self.geometry.offset_to(lerp_point(from, to, t));
            }
            Motion::Dismiss {
                from, direction, ..
            } => {
                let to = direction * self.dismiss.container_height();
                self.dismiss.set_offset(lerp(from, to, t));
                self.callbacks.drag_progress(self.dismiss.amount());
            }
            Motion::Restore { from, .. } => {
                self.dismiss.set_offset(lerp(from, 0.0, t));
                self.callbacks.drag_progress(self.dismiss.amount());
            }
        }
    }

    /// Pins the exact end state of a finished motion and runs its follow-up.
    fn finish_motion(&mut self, motion: Motion) {
        match motion {
            Motion::SnapToMin { .. } => {
                self.geometry.scale = self.geometry.min_scale;
                self.geometry.recompute_bounds();
                self.geometry.constrain();
            }
            Motion::DoubleTapZoom {
                to_scale, focal, ..
            } => {
                if self.geometry.scale != to_scale {
                    self.geometry.zoom(to_scale, focal);
                }
                self.constrain_bounds(true);
            }
            Motion::Fling { to, .. } => {
                self.geometry.offset_to(to);
                self.geometry.constrain();
            }
            Motion::OverScroll { to, .. } => {
                self.geometry.offset_to(to);
            }
            Motion::Dismiss { direction, .. } => {
                self.dismiss
                    .set_offset(direction * self.dismiss.container_height());
                self.complete_dismiss();
            }
            Motion::Restore { .. } => {
                self.dismiss.finish_restore();
                debug!("restored");
                self.callbacks.restore();
            }
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;

type ScaleChanged = Box<dyn FnMut(f64, Point)>;
type Notify = Box<dyn FnMut()>;
type Progress = Box<dyn FnMut(f64)>;

/// Lifecycle callbacks a host can register on the controller.
///
/// Each callback is independently optional. The controller owns them, so a
/// callback cannot reach back into the controller that invoked it.
#[derive(Default)]
pub struct ZoomPanCallbacks {
    on_scale_changed: Option<ScaleChanged>,
    on_drag_start: Option<Notify>,
    on_drag_progress: Option<Progress>,
    on_restore: Option<Notify>,
    on_dismiss: Option<Notify>,
}

impl ZoomPanCallbacks {
    /// Creates an empty set of callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the new scale and the focal point after every scale change.
    #[must_use]
    pub fn on_scale_changed<F>(mut self, f: F) -> Self
    where
        F: FnMut(f64, Point) + 'static,
    {
        self.on_scale_changed = Some(Box::new(f));
        self
    }

    /// Called when a dismiss drag starts.
    #[must_use]
    pub fn on_drag_start<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    /// Called with the normalized drag distance (`0..=1`) on every drag move
    /// and every dismiss or restore frame.
    #[must_use]
    pub fn on_drag_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        self.on_drag_progress = Some(Box::new(f));
        self
    }

    /// Called once the container is back at rest after a cancelled drag.
    #[must_use]
    pub fn on_restore<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_restore = Some(Box::new(f));
        self
    }

    /// Called once the view has been dismissed.
    #[must_use]
    pub fn on_dismiss<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_dismiss = Some(Box::new(f));
        self
    }

    pub(crate) fn scale_changed(&mut self, scale: f64, focal: Point) {
        if let Some(f) = self.on_scale_changed.as_mut() {
            f(scale, focal);
        }
    }

    pub(crate) fn drag_start(&mut self) {
        if let Some(f) = self.on_drag_start.as_mut() {
            f();
        }
    }

    pub(crate) fn drag_progress(&mut self, amount: f64) {
        if let Some(f) = self.on_drag_progress.as_mut() {
            f(amount);
        }
    }

    pub(crate) fn restore(&mut self) {
        if let Some(f) = self.on_restore.as_mut() {
            f();
        }
    }

    pub(crate) fn dismiss(&mut self) {
        if let Some(f) = self.on_dismiss.as_mut() {
            f();
        }
    }
}

impl fmt::Debug for ZoomPanCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomPanCallbacks")
            .field("on_scale_changed", &self.on_scale_changed.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_progress", &self.on_drag_progress.is_some())
            .field("on_restore", &self.on_restore.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

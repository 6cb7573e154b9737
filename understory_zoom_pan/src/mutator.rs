// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale and translation mutations on the shared geometry.

use kurbo::{Point, Rect, Vec2};

use crate::geometry::Geometry;

/// Maps `value` from `[src_start, src_stop]` onto `[dst_start, dst_stop]`.
///
/// Returns `0.0` when the source range is empty.
#[must_use]
pub fn map_range(value: f64, src_start: f64, src_stop: f64, dst_start: f64, dst_stop: f64) -> f64 {
    let src = src_stop - src_start;
    if src == 0.0 {
        return 0.0;
    }
    (value - src_start) * (dst_stop - dst_start) / src + dst_start
}

impl Geometry {
    /// Sets the scale and keeps the bitmap pixel under `focal` fixed.
    ///
    /// The focal point is clamped into the viewport first, so a pinch whose
    /// fingers sit outside the bitmap anchors on the nearest visible edge.
    pub(crate) fn zoom(&mut self, target_scale: f64, focal: Point) {
        let old = self.bitmap;
        self.scale = target_scale;
        self.recompute_bounds();
        let anchored = self.anchor_offset(focal, old, self.bitmap);
        self.bitmap = self.bitmap + anchored;
    }

    /// Offset that puts the bitmap fraction under `focal` in `old` back under
    /// `focal` in `new`.
    fn anchor_offset(&self, focal: Point, old: Rect, new: Rect) -> Vec2 {
        if old.width() == 0.0 || old.height() == 0.0 {
            return Vec2::ZERO;
        }
        let x = focal.x.clamp(self.viewport.x0, self.viewport.x1);
        let y = focal.y.clamp(self.viewport.y0, self.viewport.y1);
        let new_x = map_range(x, old.x0, old.x1, new.x0, new.x1);
        let new_y = map_range(y, old.y0, old.y1, new.y0, new.y1);
        Vec2::new(x - new_x, y - new_y)
    }

    /// Translates the bitmap, dropping motion on axes that cannot pan.
    ///
    /// Returns the translation actually applied.
    pub(crate) fn pan(&mut self, delta: Vec2) -> Vec2 {
        let applied = Vec2::new(
            if self.horizontal_pan { delta.x } else { 0.0 },
            if self.vertical_pan { delta.y } else { 0.0 },
        );
        self.bitmap = self.bitmap + applied;
        applied
    }

    /// Moves the bitmap origin without changing its size.
    pub(crate) fn offset_to(&mut self, origin: Point) {
        self.bitmap = self.bitmap.with_origin(origin);
    }

    /// Applies the containment correction immediately.
    pub(crate) fn constrain(&mut self) -> Vec2 {
        let offset = self.containment_offset();
        self.bitmap = self.bitmap + offset;
        offset
    }
}

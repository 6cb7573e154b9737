// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};

/// Size and padding of the host container, delivered on every resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerLayout {
    /// Outer size of the container.
    pub size: Size,
    /// Padding subtracted from the outer size to get the drawable area.
    pub padding: Insets,
}

impl ContainerLayout {
    /// Creates a layout with no padding.
    #[must_use]
    pub fn new(size: impl Into<Size>) -> Self {
        Self {
            size: size.into(),
            padding: Insets::ZERO,
        }
    }

    /// Returns a copy with the given padding.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Insets>) -> Self {
        self.padding = padding.into();
        self
    }

    /// The drawable area: the container rect minus padding.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        Rect::new(
            self.padding.x0,
            self.padding.y0,
            self.size.width - self.padding.x1,
            self.size.height - self.padding.y1,
        )
    }
}

/// Where the current scale sits relative to the fit scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleZone {
    /// Below the fit scale, only reachable transiently during a pinch.
    Below,
    /// Exactly at the fit scale.
    AtMin,
    /// Zoomed in past the fit scale.
    Above,
}

/// Computes `(min_scale, max_scale)` for a bitmap shown in a container.
///
/// The minimum is the fit scale: the bitmap fills the container exactly on
/// its constraining axis. The maximum is the minimum times `max_zoom`.
/// Returns `None` for empty or non-finite sizes.
#[must_use]
pub fn scale_range(container: Size, bitmap: Size, max_zoom: f64) -> Option<(f64, f64)> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !(positive(container.width)
        && positive(container.height)
        && positive(bitmap.width)
        && positive(bitmap.height))
    {
        return None;
    }
    let container_ratio = container.height / container.width;
    let bitmap_ratio = bitmap.height / bitmap.width;
    let min_scale = if container_ratio > bitmap_ratio {
        container.width / bitmap.width
    } else {
        container.height / bitmap.height
    };
    Some((min_scale, min_scale * max_zoom))
}

/// Shared geometry state of one controller.
///
/// `bitmap` always has the size `bitmap_size * scale`; only its origin is
/// moved by panning, flinging, and animations. `viewport` is the container
/// intersected with the *centered* bitmap rect at the current scale: the
/// region the bitmap must cover once the view settles.
#[derive(Clone, Debug)]
pub(crate) struct Geometry {
    pub(crate) container: Rect,
    pub(crate) bitmap: Rect,
    pub(crate) viewport: Rect,
    pub(crate) bitmap_size: Size,
    pub(crate) scale: f64,
    pub(crate) min_scale: f64,
    pub(crate) max_scale: f64,
    pub(crate) horizontal_pan: bool,
    pub(crate) vertical_pan: bool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            container: Rect::ZERO,
            bitmap: Rect::ZERO,
            viewport: Rect::ZERO,
            bitmap_size: Size::ZERO,
            scale: 1.0,
            min_scale: 1.0,
            max_scale: 1.0,
            horizontal_pan: false,
            vertical_pan: false,
        }
    }
}

impl Geometry {
    /// Resets all geometry for a container and bitmap.
    ///
    /// The scale is reset to the fit scale and the bitmap centered. Returns
    /// `false`, leaving `self` untouched, when the inputs are degenerate.
    pub(crate) fn layout(&mut self, container: Rect, bitmap_size: Size, max_zoom: f64) -> bool {
        let Some((min_scale, max_scale)) = scale_range(container.size(), bitmap_size, max_zoom)
        else {
            return false;
        };
        self.container = container;
        self.bitmap_size = bitmap_size;
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale = min_scale;
        self.recompute_bounds();
        let correction = self.containment_offset();
        self.bitmap = self.bitmap + correction;
        true
    }

    /// Re-centers the bitmap rect for the current scale and derives the
    /// viewport and per-axis pan availability from it.
    ///
    /// Must run after every scale change and before any translation, since
    /// translations are expressed relative to the new bounds.
    pub(crate) fn recompute_bounds(&mut self) {
        self.bitmap = self.centered_bitmap(self.scale);
        self.viewport = self.container.intersect(self.bitmap);
        self.horizontal_pan = self.bitmap.width() > self.container.width();
        self.vertical_pan = self.bitmap.height() > self.container.height();
    }

    /// The bitmap rect centered in the container at `scale`.
    pub(crate) fn centered_bitmap(&self, scale: f64) -> Rect {
        Rect::from_center_size(self.container.center(), self.bitmap_size * scale)
    }

    /// Translation that moves the bitmap so it covers the viewport again.
    ///
    /// Zero when no empty space shows inside the viewport.
    pub(crate) fn containment_offset(&self) -> Vec2 {
        let mut offset = Vec2::ZERO;
        if self.viewport.x0 < self.bitmap.x0 {
            offset.x += self.viewport.x0 - self.bitmap.x0;
        }
        if self.viewport.y0 < self.bitmap.y0 {
            offset.y += self.viewport.y0 - self.bitmap.y0;
        }
        if self.viewport.x1 > self.bitmap.x1 {
            offset.x += self.viewport.x1 - self.bitmap.x1;
        }
        if self.viewport.y1 > self.bitmap.y1 {
            offset.y += self.viewport.y1 - self.bitmap.y1;
        }
        offset
    }

    /// Range of bitmap origins that keep the viewport covered: `(min, max)`.
    pub(crate) fn origin_limits(&self) -> (Point, Point) {
        let min = Point::new(
            self.viewport.x1 - self.bitmap.width(),
            self.viewport.y1 - self.bitmap.height(),
        );
        let max = Point::new(self.viewport.x0, self.viewport.y0);
        (min, max)
    }

    pub(crate) fn zone(&self) -> ScaleZone {
        if self.scale < self.min_scale {
            ScaleZone::Below
        } else if self.scale > self.min_scale {
            ScaleZone::Above
        } else {
            ScaleZone::AtMin
        }
    }

    /// Bitmap-space to container-space transform for the renderer.
    pub(crate) fn transform(&self) -> Affine {
        let half = self.bitmap_size.to_vec2() * 0.5;
        Affine::translate(self.bitmap.center().to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(-half)
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_pan --heading-base-level=0

//! Understory Zoom Pan: a headless gesture-to-transform controller for image views.
//!
//! This crate turns decoded touch intents into a continuously valid view of a
//! single bitmap inside a container:
//! - Pinch zoom about a focal point, capped at a maximum scale.
//! - Panning when zoomed in, with an animated settle past the edges.
//! - Inertial flings driven by a spline decay projection.
//! - Double tap to toggle between the fit scale and a medium zoom.
//! - Vertical drag to dismiss at the fit scale, with restore and dismiss
//!   animations and lifecycle callbacks.
//!
//! It does **not** decode images, capture raw touches, or draw. Callers are
//! expected to:
//! - Report container layout and bitmap size with
//!   [`ZoomPanController::set_container`] and [`ZoomPanController::set_bitmap`].
//! - Translate their input into [`GestureEvent`]s.
//! - Call [`ZoomPanController::advance`] once per frame while
//!   [`ZoomPanController::is_animating`] is `true`.
//! - Draw the bitmap with [`ZoomPanController::transform`] and offset the
//!   container by [`ZoomPanController::container_translation`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect, Size};
//! use understory_zoom_pan::{ContainerLayout, GestureEvent, ZoomPanController};
//!
//! let mut view = ZoomPanController::default();
//! view.set_container(ContainerLayout::new((1000.0, 1000.0)));
//! view.set_bitmap(Some(Size::new(500.0, 1000.0)));
//! assert_eq!(view.min_scale(), 1.0);
//!
//! // Pinch out around the center.
//! view.handle_event(GestureEvent::Pinch { factor: 2.0, focal: Point::new(500.0, 500.0) });
//! assert_eq!(view.bitmap_bounds(), Rect::new(0.0, -500.0, 1000.0, 1500.0));
//! assert_eq!(view.viewport(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
//!
//! // Release and run the frame loop until the view settles.
//! view.handle_event(GestureEvent::Up);
//! while view.advance(Duration::from_millis(16)) {}
//!
//! // Draw with the transform.
//! let top_left = view.transform() * Point::ZERO;
//! assert_eq!(top_left, Point::new(0.0, -500.0));
//! ```
//!
//! ## Drag to dismiss
//!
//! ```rust
//! use core::time::Duration;
//! use std::{cell::Cell, rc::Rc};
//!
//! use kurbo::{Size, Vec2};
//! use understory_zoom_pan::{
//!     ContainerLayout, DismissPhase, GestureEvent, ZoomPanCallbacks, ZoomPanController,
//! };
//!
//! let dismissed = Rc::new(Cell::new(false));
//! let flag = dismissed.clone();
//! let mut view = ZoomPanController::default()
//!     .with_callbacks(ZoomPanCallbacks::new().on_dismiss(move || flag.set(true)));
//! view.set_container(ContainerLayout::new((1000.0, 1000.0)));
//! view.set_bitmap(Some(Size::new(500.0, 1000.0)));
//!
//! view.handle_event(GestureEvent::Move { delta: Vec2::new(0.0, 300.0), pointer_count: 1 });
//! view.handle_event(GestureEvent::Up);
//! assert_eq!(view.dismiss_phase(), DismissPhase::Dismissing);
//!
//! view.advance(Duration::from_millis(250));
//! assert!(dismissed.get());
//! assert_eq!(view.container_translation(), Vec2::new(0.0, 1000.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc` for boxed callbacks.
//! [`ConfigError`] implements `std::error::Error` with the `std` feature.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod animation;
mod callbacks;
mod config;
mod controller;
mod dismiss;
mod geometry;
mod gesture;
mod mutator;

pub use callbacks::ZoomPanCallbacks;
pub use config::{
    ConfigError, DEFAULT_DRAG_DISMISS_DISTANCE_RATIO, DEFAULT_DRAG_FRICTION,
    DEFAULT_FLING_DISMISS_THRESHOLD_DP, DEFAULT_MAX_ZOOM, ZoomPanConfig,
};
pub use controller::{ZoomPanController, ZoomPanDebugInfo};
pub use dismiss::DismissPhase;
pub use geometry::{ContainerLayout, ScaleZone, scale_range};
pub use gesture::{GestureEvent, GestureState};
pub use mutator::map_range;

pub use understory_motion::{AnimationSpec, Easing};

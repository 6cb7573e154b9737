// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_motion --heading-base-level=0

//! Understory Motion: timed motion primitives for UI runtimes.
//!
//! This crate provides a few small, host-agnostic building blocks for driving
//! animations from a frame loop:
//! - [`Easing`]: easing curves mapping a linear fraction in `[0, 1]` onto an
//!   eased fraction.
//! - [`AnimationSpec`]: a duration paired with an easing curve.
//! - [`Tween`]: a fixed-duration progress tracker advanced by explicit time
//!   deltas, rather than by reading a clock.
//! - [`FlingCalculator`]: spline-based fling decay that projects where a
//!   released scroll with a given velocity comes to rest.
//!
//! It does **not** own a clock, a scheduler, or any animated values. Callers
//! are expected to:
//! - Keep one [`Tween`] per running animation and call [`Tween::advance`]
//!   once per frame with the elapsed time.
//! - Interpolate their own values with the returned eased fraction (for
//!   example with [`lerp`]).
//! - Drop or replace the tween to cancel the animation.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_motion::{AnimationSpec, Easing, Tween, lerp};
//!
//! let spec = AnimationSpec::new(Duration::from_millis(200), Easing::Linear);
//! let mut tween = Tween::new(spec);
//!
//! let t = tween.advance(Duration::from_millis(50));
//! assert_eq!(lerp(0.0, 100.0, t), 25.0);
//!
//! let t = tween.advance(Duration::from_millis(500));
//! assert!(tween.is_finished());
//! assert_eq!(t, 1.0);
//! ```
//!
//! ## Fling projection
//!
//! ```rust
//! use understory_motion::FlingCalculator;
//!
//! let fling = FlingCalculator::with_density(1.0);
//!
//! // A rightward fling from x = 0, bounded to [-400, 0]: it cannot move right.
//! assert_eq!(fling.project(0.0, 2_000.0, -400.0, 0.0), 0.0);
//!
//! // A leftward fling travels some distance, but never past the lower bound.
//! let end = fling.project(0.0, -2_000.0, -400.0, 0.0);
//! assert!(end < 0.0 && end >= -400.0);
//! ```
//!
//! This crate is `no_std`. Float math comes from `std` or, with the `libm`
//! feature, from Kurbo's `libm` backend.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod decay;
mod easing;
mod tween;

pub use decay::FlingCalculator;
pub use easing::Easing;
pub use tween::{AnimationSpec, DEFAULT_DURATION, Tween};

/// Linearly interpolates between `start` and `end` by `t`.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate.
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-dismiss state: vertical container offset and the dismiss decision.
//!
//! ## Usage
//!
//! 1) Feed vertical drag deltas with [`DismissState::drag`] while the view is
//!    at its fit scale. The first nonzero delta moves the machine from
//!    [`DismissPhase::AtRest`] to [`DismissPhase::Dragging`].
//! 2) On release, ask [`DismissState::release`] whether to dismiss or restore.
//! 3) Animate (or jump) the offset with [`DismissState::set_offset`] and
//!    finish with [`DismissState::finish_dismiss`] or
//!    [`DismissState::finish_restore`].

/// Phase of the drag-to-dismiss interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DismissPhase {
    /// Container at its rest position.
    #[default]
    AtRest,
    /// Following a vertical drag.
    Dragging,
    /// Sliding off-screen after a dismiss decision.
    Dismissing,
    /// Sliding back to rest after a cancelled drag.
    Restoring,
    /// Dismissed; input is ignored until the host resets the view.
    Dismissed,
}

/// What a release should do with the current drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Release {
    /// Nothing is being dragged.
    Ignore,
    /// The offset passed the threshold; slide out in this direction (`±1`).
    Dismiss(f64),
    /// Below the threshold; slide back.
    Restore,
    /// Dragged back to exactly zero; already at rest.
    Settled,
}

/// Result of one drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DragStep {
    /// This step started the drag.
    pub(crate) started: bool,
    /// Normalized distance after the step.
    pub(crate) amount: f64,
}

/// Tracks the container offset of a dismiss drag.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DismissState {
    phase: DismissPhase,
    offset: f64,
    container_height: f64,
}

impl DismissState {
    pub(crate) fn phase(&self) -> DismissPhase {
        self.phase
    }

    pub(crate) fn offset(&self) -> f64 {
        self.offset
    }

    pub(crate) fn set_container_height(&mut self, height: f64) {
        self.container_height = height;
    }

    pub(crate) fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Normalized drag distance: `|offset| / container_height`, clamped to `[0, 1]`.
    pub(crate) fn amount(&self) -> f64 {
        if self.container_height.is_nan() || self.container_height <= 0.0 {
            return 0.0;
        }
        (self.offset.abs() / self.container_height).clamp(0.0, 1.0)
    }

    /// Applies a vertical drag step.
    ///
    /// Returns `None` when the step is ignored: a zero step at rest, or any
    /// step outside the rest and dragging phases.
    pub(crate) fn drag(&mut self, delta: f64) -> Option<DragStep> {
        if !delta.is_finite() {
            return None;
        }
        let started = match self.phase {
            DismissPhase::AtRest if delta != 0.0 => {
                self.phase = DismissPhase::Dragging;
                true
            }
            DismissPhase::Dragging => false,
            _ => return None,
        };
        self.offset += delta;
        Some(DragStep {
            started,
            amount: self.amount(),
        })
    }

    /// Decides what a pointer release does with the current drag.
    pub(crate) fn release(&self, dismiss_distance: f64) -> Release {
        if self.phase != DismissPhase::Dragging {
            return Release::Ignore;
        }
        if self.offset == 0.0 {
            Release::Settled
        } else if self.offset.abs() > dismiss_distance {
            Release::Dismiss(self.offset.signum())
        } else {
            Release::Restore
        }
    }

    /// Whether a fling may dismiss from the current state.
    pub(crate) fn can_fling_dismiss(&self, threshold: f64) -> bool {
        matches!(self.phase, DismissPhase::AtRest | DismissPhase::Dragging)
            && self.offset.abs() < threshold
    }

    /// Enters [`DismissPhase::Dismissing`]; returns the off-screen target offset.
    pub(crate) fn begin_dismiss(&mut self, direction: f64) -> f64 {
        self.phase = DismissPhase::Dismissing;
        direction.signum() * self.container_height
    }

    pub(crate) fn begin_restore(&mut self) {
        self.phase = DismissPhase::Restoring;
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub(crate) fn finish_dismiss(&mut self) {
        self.phase = DismissPhase::Dismissed;
    }

    pub(crate) fn finish_restore(&mut self) {
        self.phase = DismissPhase::AtRest;
        self.offset = 0.0;
    }

    /// Returns to rest immediately, dropping any offset.
    pub(crate) fn reset(&mut self) {
        self.phase = DismissPhase::AtRest;
        self.offset = 0.0;
    }
}

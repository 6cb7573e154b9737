// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gesture sequences against the public controller API.

use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use understory_zoom_pan::{
    ContainerLayout, DismissPhase, GestureEvent, GestureState, ZoomPanCallbacks, ZoomPanConfig,
    ZoomPanController,
};

const FRAME: Duration = Duration::from_millis(16);
const EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Seen {
    Scale(f64),
    DragStart,
    Progress(f64),
    Restore,
    Dismiss,
}

type Log = Rc<RefCell<Vec<Seen>>>;

fn recorder() -> (ZoomPanCallbacks, Log) {
    let log: Log = Rc::default();
    let (a, b, c, d, e) = (
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
        log.clone(),
    );
    let callbacks = ZoomPanCallbacks::new()
        .on_scale_changed(move |scale, _| a.borrow_mut().push(Seen::Scale(scale)))
        .on_drag_start(move || b.borrow_mut().push(Seen::DragStart))
        .on_drag_progress(move |amount| c.borrow_mut().push(Seen::Progress(amount)))
        .on_restore(move || d.borrow_mut().push(Seen::Restore))
        .on_dismiss(move || e.borrow_mut().push(Seen::Dismiss));
    (callbacks, log)
}

fn count(log: &Log, seen: Seen) -> usize {
    log.borrow().iter().filter(|s| **s == seen).count()
}

/// 1000 x 1000 container showing a 500 x 1000 bitmap.
fn viewer(config: ZoomPanConfig) -> (ZoomPanController, Log) {
    let (callbacks, log) = recorder();
    let mut view = ZoomPanController::new(config).unwrap().with_callbacks(callbacks);
    view.set_container(ContainerLayout::new((1000.0, 1000.0)));
    view.set_bitmap(Some(Size::new(500.0, 1000.0)));
    assert!(view.is_ready());
    (view, log)
}

fn settle(view: &mut ZoomPanController) {
    let mut frames = 0;
    while view.advance(FRAME) {
        frames += 1;
        assert!(frames < 1_000, "animation never finished");
    }
}

fn drag(view: &mut ZoomPanController, dx: f64, dy: f64) {
    view.handle_event(GestureEvent::Move {
        delta: Vec2::new(dx, dy),
        pointer_count: 1,
    });
}

fn pinch(view: &mut ZoomPanController, factor: f64, x: f64, y: f64) {
    view.handle_event(GestureEvent::Pinch {
        factor,
        focal: Point::new(x, y),
    });
}

fn down(view: &mut ZoomPanController) {
    view.handle_event(GestureEvent::Down {
        position: Point::new(500.0, 500.0),
    });
}

fn assert_contained(view: &ZoomPanController) {
    let v = view.viewport();
    let b = view.bitmap_bounds();
    assert!(
        b.x0 <= v.x0 + EPS && b.y0 <= v.y0 + EPS && b.x1 >= v.x1 - EPS && b.y1 >= v.y1 - EPS,
        "viewport {v:?} not inside bitmap {b:?}"
    );
}

#[test]
fn pinch_then_drag_to_dismiss() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    assert_eq!(view.min_scale(), 1.0);
    assert_eq!(view.max_scale(), 10.0);

    down(&mut view);
    pinch(&mut view, 2.0, 500.0, 500.0);
    assert_eq!(view.scale(), 2.0);
    assert_eq!(view.bitmap_bounds(), Rect::new(0.0, -500.0, 1000.0, 1500.0));
    assert_eq!(view.viewport(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
    assert_eq!(log.borrow().as_slice(), &[Seen::Scale(2.0)]);

    // Back to rest scale.
    pinch(&mut view, 0.5, 500.0, 500.0);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.scale(), view.min_scale());
    assert!(!view.is_animating());
    log.borrow_mut().clear();

    down(&mut view);
    drag(&mut view, 0.0, 300.0);
    assert_eq!(view.gesture_state(), GestureState::Dragging);
    assert_eq!(
        log.borrow().as_slice(),
        &[Seen::DragStart, Seen::Progress(0.3)]
    );
    assert_eq!(view.container_translation(), Vec2::new(0.0, 300.0));

    view.handle_event(GestureEvent::Up);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissing);

    let step = Duration::from_millis(10);
    for _ in 0..24 {
        assert!(view.advance(step));
    }
    assert_eq!(count(&log, Seen::Dismiss), 0);
    assert!(view.advance(step));
    assert_eq!(count(&log, Seen::Dismiss), 1);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
    assert_eq!(view.container_translation(), Vec2::new(0.0, 1000.0));

    // Progress was reported on every frame and only grew.
    let progress: Vec<f64> = log
        .borrow()
        .iter()
        .filter_map(|s| match s {
            Seen::Progress(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 26);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last().copied(), Some(1.0));

    // Dismissed views decline input.
    assert!(!view.handle_event(GestureEvent::Up));
}

#[test]
fn dismiss_threshold_splits_restore_from_dismiss() {
    let ratio = 0.25;
    let height = 800.0;
    for (fraction, expected) in [
        (0.9, DismissPhase::Restoring),
        (1.1, DismissPhase::Dismissing),
    ] {
        let (callbacks, log) = recorder();
        let mut view = ZoomPanController::new(
            ZoomPanConfig::default().with_drag_dismiss_distance_ratio(ratio),
        )
        .unwrap()
        .with_callbacks(callbacks);
        view.set_container(ContainerLayout::new((400.0, height)));
        view.set_bitmap(Some(Size::new(400.0, 400.0)));

        down(&mut view);
        drag(&mut view, 0.0, -fraction * ratio * height);
        view.handle_event(GestureEvent::Up);
        assert_eq!(view.dismiss_phase(), expected, "fraction {fraction}");

        settle(&mut view);
        if expected == DismissPhase::Restoring {
            assert_eq!(view.dismiss_phase(), DismissPhase::AtRest);
            assert_eq!(view.drag_offset(), 0.0);
            assert_eq!(count(&log, Seen::Restore), 1);
        } else {
            assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
            assert_eq!(view.drag_offset(), -height);
            assert_eq!(count(&log, Seen::Dismiss), 1);
        }
    }
}

#[test]
fn scale_settles_within_bounds() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    let gestures: [&[f64]; 5] = [
        &[1.5, 1.5, 1.5],
        &[0.3, 0.5],
        &[4.0, 4.0, 4.0, 4.0],
        &[0.9, 0.1, 0.2],
        &[1.2, 0.7, 3.0, 0.4],
    ];
    let focals = [(100.0, 900.0), (500.0, 500.0), (990.0, 10.0)];
    for (i, factors) in gestures.iter().enumerate() {
        let (fx, fy) = focals[i % focals.len()];
        down(&mut view);
        for &factor in *factors {
            pinch(&mut view, factor, fx, fy);
            assert!(view.scale() <= view.max_scale());
        }
        view.handle_event(GestureEvent::Up);
        settle(&mut view);
        assert!(
            view.scale() >= view.min_scale() - EPS && view.scale() <= view.max_scale() + EPS,
            "scale {} after gesture {i}",
            view.scale()
        );
        assert_contained(&view);
    }
}

#[test]
fn pan_past_the_edge_settles_back_inside() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    down(&mut view);
    pinch(&mut view, 3.0, 500.0, 500.0);
    view.handle_event(GestureEvent::Up);

    down(&mut view);
    for _ in 0..20 {
        drag(&mut view, 80.0, 120.0);
    }
    assert_eq!(view.gesture_state(), GestureState::Panning);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.gesture_state(), GestureState::AnimatingOverScroll);
    settle(&mut view);
    assert_contained(&view);
    // Dragged right and down: the top-left corner pins to the container's.
    assert_eq!(view.bitmap_bounds().origin(), Point::ZERO);
}

#[test]
fn focal_pixel_is_stable_across_a_pinch_step() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    down(&mut view);
    pinch(&mut view, 2.5, 500.0, 500.0);
    for (focal, factor) in [
        (Point::new(300.0, 420.0), 1.3),
        (Point::new(720.0, 150.0), 0.8),
        (Point::new(610.0, 880.0), 2.0),
    ] {
        let before = view.transform().inverse() * focal;
        pinch(&mut view, factor, focal.x, focal.y);
        let after = view.transform().inverse() * focal;
        assert!((before - after).hypot() < 1e-6, "{before:?} vs {after:?}");
    }
}

#[test]
fn repeated_layout_is_idempotent() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    let layout = ContainerLayout::new((640.0, 480.0));
    view.set_container(layout);
    let first = view.debug_info();
    view.set_container(layout);
    assert_eq!(view.debug_info(), first);

    // Leaving and returning to the same layout rebuilds the same geometry.
    view.set_container(ContainerLayout::new((1000.0, 1000.0)));
    view.set_container(layout);
    assert_eq!(view.debug_info(), first);
}

#[test]
fn fling_during_snap_is_ignored() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    down(&mut view);
    pinch(&mut view, 0.5, 500.0, 500.0);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.gesture_state(), GestureState::AnimatingSnap);

    assert!(view.handle_event(GestureEvent::Fling {
        velocity: Vec2::new(3_000.0, -3_000.0),
    }));
    assert_eq!(view.gesture_state(), GestureState::AnimatingSnap);

    let mut last = view.scale();
    while view.advance(FRAME) {
        assert!(view.scale() >= last, "snap reversed");
        last = view.scale();
        let state = view.gesture_state();
        assert!(
            state == GestureState::AnimatingSnap || state == GestureState::Idle,
            "unexpected {state:?}"
        );
    }
    assert_eq!(view.scale(), view.min_scale());
    assert_eq!(view.bitmap_bounds(), Rect::new(250.0, 0.0, 750.0, 1000.0));
}

#[test]
fn fling_while_zoomed_scrolls_and_stays_contained() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    down(&mut view);
    pinch(&mut view, 4.0, 500.0, 500.0);
    view.handle_event(GestureEvent::Up);
    assert!(view.wants_exclusive_touch());

    let start = view.bitmap_bounds().origin();
    down(&mut view);
    view.handle_event(GestureEvent::Fling {
        velocity: Vec2::new(-1_500.0, -1_500.0),
    });
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.gesture_state(), GestureState::Flinging);
    settle(&mut view);
    assert!(view.bitmap_bounds().origin().y < start.y);
    assert_contained(&view);
}

#[test]
fn fling_dismisses_short_drags_only() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    down(&mut view);
    drag(&mut view, 0.0, 10.0);
    view.handle_event(GestureEvent::Fling {
        velocity: Vec2::new(0.0, -2_000.0),
    });
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissing);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissing);
    settle(&mut view);
    assert_eq!(view.container_translation(), Vec2::new(0.0, -1000.0));
    assert_eq!(count(&log, Seen::Dismiss), 1);

    let (mut view, log) = viewer(ZoomPanConfig::default());
    down(&mut view);
    drag(&mut view, 0.0, 150.0);
    view.handle_event(GestureEvent::Fling {
        velocity: Vec2::new(0.0, 3_000.0),
    });
    assert_eq!(view.dismiss_phase(), DismissPhase::Dragging);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.dismiss_phase(), DismissPhase::Restoring);
    settle(&mut view);
    assert_eq!(count(&log, Seen::Restore), 1);
    assert_eq!(count(&log, Seen::Dismiss), 0);
}

#[test]
fn dismiss_without_animation_fires_immediately() {
    let (mut view, log) = viewer(ZoomPanConfig::default().with_dismiss_animation(false));
    down(&mut view);
    drag(&mut view, 0.0, 300.0);
    view.handle_event(GestureEvent::Up);
    assert!(!view.is_animating());
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
    assert_eq!(view.gesture_state(), GestureState::Dismissed);
    assert_eq!(
        log.borrow().as_slice(),
        &[Seen::DragStart, Seen::Progress(0.3), Seen::Dismiss]
    );

    assert!(!view.handle_event(GestureEvent::Down {
        position: Point::ZERO
    }));
    view.reset_dismiss();
    assert_eq!(view.dismiss_phase(), DismissPhase::AtRest);
    assert_eq!(view.container_translation(), Vec2::ZERO);
    assert!(view.handle_event(GestureEvent::Up));
}

#[test]
fn new_bitmap_brings_a_dismissed_view_back() {
    let (mut view, _) = viewer(ZoomPanConfig::default().with_dismiss_animation(false));
    down(&mut view);
    drag(&mut view, 0.0, -400.0);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);

    view.set_bitmap(Some(Size::new(1000.0, 500.0)));
    assert_eq!(view.dismiss_phase(), DismissPhase::AtRest);
    assert_eq!(view.bitmap_bounds(), Rect::new(0.0, 250.0, 1000.0, 750.0));
}

#[test]
fn zero_offset_release_pairs_drag_start_with_restore() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    down(&mut view);
    drag(&mut view, 0.0, 40.0);
    drag(&mut view, 0.0, -40.0);
    view.handle_event(GestureEvent::Up);
    assert!(!view.is_animating());
    assert_eq!(count(&log, Seen::DragStart), 1);
    assert_eq!(count(&log, Seen::Restore), 1);
}

#[test]
fn double_tap_toggles_medium_zoom() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    view.handle_event(GestureEvent::DoubleTap {
        position: Point::new(300.0, 500.0),
    });
    assert_eq!(view.gesture_state(), GestureState::AnimatingDoubleTap);
    settle(&mut view);
    assert_eq!(view.scale(), 5.0);
    assert_contained(&view);
    assert!(count(&log, Seen::Scale(5.0)) >= 1);

    // Pan into the top-left corner before zooming back out.
    down(&mut view);
    for _ in 0..30 {
        drag(&mut view, 100.0, 100.0);
    }
    view.handle_event(GestureEvent::Up);
    settle(&mut view);
    assert_eq!(view.bitmap_bounds().origin(), Point::ZERO);

    let fit = Rect::new(250.0, 0.0, 750.0, 1000.0);
    view.handle_event(GestureEvent::DoubleTap {
        position: Point::new(10.0, 10.0),
    });
    assert_eq!(view.gesture_state(), GestureState::AnimatingSnap);
    let mut center = view.bitmap_bounds().center();
    let mut steps = Vec::new();
    while view.advance(FRAME) {
        let b = view.bitmap_bounds();
        assert!(
            b.x0 <= fit.x0 + EPS
                && b.y0 <= fit.y0 + EPS
                && b.x1 >= fit.x1 - EPS
                && b.y1 >= fit.y1 - EPS,
            "bitmap {b:?} left the fit rect"
        );
        steps.push((b.center() - center).hypot());
        center = b.center();
    }
    assert!(steps.len() > 2);
    assert!(steps[steps.len() - 1] < steps[0], "last frame jumped: {steps:?}");
    assert_eq!(view.scale(), view.min_scale());
    assert_eq!(view.bitmap_bounds(), fit);
}

#[test]
fn resize_cancels_geometry_motion_but_not_dismiss() {
    let (mut view, _) = viewer(ZoomPanConfig::default());
    down(&mut view);
    pinch(&mut view, 0.5, 500.0, 500.0);
    view.handle_event(GestureEvent::Up);
    assert!(view.is_animating());
    view.set_container(ContainerLayout::new((500.0, 500.0)));
    assert!(!view.is_animating());
    assert_eq!(view.scale(), 0.5);
    assert_eq!(view.scale(), view.min_scale());

    down(&mut view);
    drag(&mut view, 0.0, 400.0);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.gesture_state(), GestureState::AnimatingDismiss);
    view.set_container(ContainerLayout::new((600.0, 600.0)));
    assert_eq!(view.gesture_state(), GestureState::AnimatingDismiss);
    settle(&mut view);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
}

#[test]
fn not_ready_controller_declines_everything() {
    let mut view = ZoomPanController::default();
    assert!(!view.handle_event(GestureEvent::DoubleTap {
        position: Point::ZERO
    }));
    assert!(!view.advance(FRAME));
    assert_eq!(view.gesture_state(), GestureState::Idle);
    assert!(!view.wants_exclusive_touch());
}

#[test]
fn unbinding_the_bitmap_pauses_a_dismiss() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    down(&mut view);
    drag(&mut view, 0.0, 300.0);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.gesture_state(), GestureState::AnimatingDismiss);

    view.set_bitmap(None);
    assert!(!view.is_ready());
    assert!(!view.is_animating());
    assert!(!view.advance(FRAME));

    view.set_bitmap(Some(Size::new(500.0, 1000.0)));
    assert!(view.is_animating());
    settle(&mut view);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
    assert_eq!(count(&log, Seen::Dismiss), 1);
}

#[test]
fn dismiss_target_follows_container_resize() {
    let (mut view, log) = viewer(ZoomPanConfig::default());
    down(&mut view);
    drag(&mut view, 0.0, 400.0);
    view.handle_event(GestureEvent::Up);
    view.advance(FRAME);
    view.advance(FRAME);
    view.set_container(ContainerLayout::new((600.0, 600.0)));
    settle(&mut view);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
    assert_eq!(view.container_translation(), Vec2::new(0.0, 600.0));
    assert_eq!(log.borrow().last(), Some(&Seen::Dismiss));
    let last_progress = log.borrow().iter().rev().find_map(|s| match s {
        Seen::Progress(amount) => Some(*amount),
        _ => None,
    });
    assert_eq!(last_progress, Some(1.0));
}

#[test]
fn new_bitmap_after_fling_dismiss_accepts_a_fresh_drag() {
    let (mut view, _) = viewer(ZoomPanConfig::default().with_dismiss_animation(false));
    down(&mut view);
    drag(&mut view, 0.0, 10.0);
    view.handle_event(GestureEvent::Fling {
        velocity: Vec2::new(0.0, -2_000.0),
    });
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
    assert!(!view.handle_event(GestureEvent::Up));

    view.set_bitmap(Some(Size::new(1000.0, 500.0)));
    assert_eq!(view.dismiss_phase(), DismissPhase::AtRest);
    drag(&mut view, 0.0, 300.0);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dragging);
    view.handle_event(GestureEvent::Up);
    assert_eq!(view.dismiss_phase(), DismissPhase::Dismissed);
}

use std::cell::RefCell;
use std::rc::Rc;

use egui::{CursorIcon, Pos2, Rect, pos2};

use super::scene::{PaintStyle, PositionKind, SyntheticScene};
use super::{
    Axis, ConstraintFlags, HandleAction, HandleRegistration, HitAreaMargins, HitTestRegistry,
    NodeId, PointerAccuracy, PointerInput, ResizeHandlerState,
};

type TransitionLog = Rc<RefCell<Vec<(HandleAction, ResizeHandlerState)>>>;

fn recording_registration(node: NodeId, axis: Axis) -> (HandleRegistration, TransitionLog) {
    let log: TransitionLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let registration = HandleRegistration {
        node,
        axis,
        margins: HitAreaMargins::default(),
        on_transition: Box::new(move |action, state, _input| {
            sink.borrow_mut().push((action, state));
        }),
    };
    (registration, log)
}

fn input(position: Pos2, target: Option<NodeId>, buttons: u8) -> PointerInput {
    PointerInput {
        position,
        target,
        buttons,
    }
}

/// A root containing one vertical separator at x 100..=104, full height.
fn scene_with_handle() -> (SyntheticScene, NodeId, NodeId) {
    let mut scene = SyntheticScene::new();
    let root = scene.add(
        None,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 100.0)),
        PaintStyle::default(),
    );
    let handle = scene.add(
        Some(root),
        Rect::from_min_max(pos2(100.0, 0.0), pos2(104.0, 100.0)),
        PaintStyle::default(),
    );
    (scene, root, handle)
}

#[test]
fn pointer_down_engages_a_handle_within_its_margin() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    // 4px outside the rect, inside the 5px fine margin.
    registry.pointer_down(&scene, &input(pos2(108.0, 50.0), Some(handle), 1));

    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Drag));
    assert_eq!(
        log.borrow().as_slice(),
        &[(HandleAction::Down, ResizeHandlerState::Drag)]
    );
}

#[test]
fn pointer_down_outside_the_margin_is_ignored() {
    let (scene, root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    registry.pointer_down(&scene, &input(pos2(120.0, 50.0), Some(root), 1));

    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Inactive));
    assert!(log.borrow().is_empty());
}

#[test]
fn coarse_pointers_get_the_larger_margin() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Coarse);
    let (registration, _log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    // 12px outside the rect: beyond the fine margin, inside the coarse one.
    registry.pointer_down(&scene, &input(pos2(116.0, 50.0), Some(handle), 1));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Drag));
}

#[test]
fn overlapping_node_painted_above_blocks_the_covered_region_only() {
    let (mut scene, root, handle) = scene_with_handle();
    // A later sibling with an explicit z-index covering the handle's top half.
    let overlay = scene.add(
        Some(root),
        Rect::from_min_max(pos2(90.0, 0.0), pos2(114.0, 50.0)),
        PaintStyle {
            position: PositionKind::Absolute,
            z_index: Some(1),
            ..Default::default()
        },
    );

    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    // In the overlapped region the overlay is the event target: blocked.
    registry.pointer_down(&scene, &input(pos2(102.0, 25.0), Some(overlay), 1));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Inactive));
    assert!(log.borrow().is_empty());
    registry.pointer_up(&input(pos2(102.0, 25.0), None, 0));

    // Below the overlay the handle is its own target: accepted.
    registry.pointer_down(&scene, &input(pos2(102.0, 75.0), Some(handle), 1));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Drag));
}

#[test]
fn node_painted_above_but_elsewhere_does_not_block() {
    let (mut scene, root, handle) = scene_with_handle();
    // Painted above the handle but not overlapping its rect; the pointer can
    // still land on it inside the handle's hit margin.
    let neighbor = scene.add(
        Some(root),
        Rect::from_min_max(pos2(105.0, 0.0), pos2(130.0, 100.0)),
        PaintStyle {
            position: PositionKind::Absolute,
            z_index: Some(1),
            ..Default::default()
        },
    );

    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, _log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    registry.pointer_down(&scene, &input(pos2(107.0, 50.0), Some(neighbor), 1));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Drag));
}

#[test]
fn engaged_set_is_locked_while_a_button_is_held() {
    let (mut scene, root, first_handle) = scene_with_handle();
    let second_handle = scene.add(
        Some(root),
        Rect::from_min_max(pos2(200.0, 0.0), pos2(204.0, 100.0)),
        PaintStyle::default(),
    );

    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (first_registration, first_log) = recording_registration(first_handle, Axis::Horizontal);
    let first = registry.register(first_registration);
    let (second_registration, second_log) = recording_registration(second_handle, Axis::Horizontal);
    let second = registry.register(second_registration);

    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(first_handle), 1));
    // Drag across the second handle: hit-testing must not re-run.
    registry.pointer_move(&scene, &input(pos2(202.0, 50.0), Some(second_handle), 1));

    assert_eq!(registry.handle_state(first), Some(ResizeHandlerState::Drag));
    assert_eq!(registry.handle_state(second), Some(ResizeHandlerState::Inactive));
    assert_eq!(
        first_log.borrow().as_slice(),
        &[
            (HandleAction::Down, ResizeHandlerState::Drag),
            (HandleAction::Move, ResizeHandlerState::Drag),
        ]
    );
    assert!(second_log.borrow().is_empty());
}

#[test]
fn hover_tracks_the_pointer_between_gestures() {
    let (scene, root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    registry.pointer_move(&scene, &input(pos2(102.0, 50.0), Some(handle), 0));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Hover));

    registry.pointer_move(&scene, &input(pos2(300.0, 50.0), Some(root), 0));
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Inactive));

    assert_eq!(
        log.borrow().as_slice(),
        &[
            (HandleAction::Move, ResizeHandlerState::Hover),
            (HandleAction::Move, ResizeHandlerState::Inactive),
        ]
    );
}

#[test]
fn release_outside_the_window_is_detected_from_the_buttons_mask() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(handle), 1));
    // The up event went to another window; the next move reports no buttons.
    registry.pointer_move(&scene, &input(pos2(102.0, 50.0), Some(handle), 0));

    assert!(!registry.is_pointer_down());
    let log = log.borrow();
    assert!(
        log.contains(&(HandleAction::Up, ResizeHandlerState::Inactive)),
        "synthetic up missing from {log:?}"
    );
    // Hit-testing resumed on the same move: the pointer still hovers.
    assert_eq!(registry.handle_state(id), Some(ResizeHandlerState::Hover));
}

#[test]
fn unregister_mid_gesture_synthesizes_exactly_one_up() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(handle), 1));
    registry.unregister(id);
    // The gesture ends later; the removed handle must not be notified again.
    registry.pointer_up(&input(pos2(102.0, 50.0), None, 0));

    let ups = log
        .borrow()
        .iter()
        .filter(|(action, _)| *action == HandleAction::Up)
        .count();
    assert_eq!(ups, 1);
    assert_eq!(registry.handle_state(id), None);
    assert_eq!(registry.handle_count(), 0);
}

#[test]
fn cursor_override_follows_engagement_and_constraint_flags() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, _log) = recording_registration(handle, Axis::Horizontal);
    let id = registry.register(registration);

    assert_eq!(registry.cursor_override(), None);

    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(handle), 1));
    assert_eq!(registry.cursor_override(), Some(CursorIcon::ResizeColumn));

    registry.report_constraint_flags(id, ConstraintFlags::HORIZONTAL_MIN);
    assert_eq!(registry.cursor_override(), Some(CursorIcon::ResizeEast));

    registry.pointer_up(&input(pos2(102.0, 50.0), None, 0));
    assert_eq!(registry.cursor_override(), None);
}

#[test]
fn intersecting_row_and_column_handles_show_the_move_cursor() {
    let (mut scene, root, column_handle) = scene_with_handle();
    // A nested group's horizontal separator ending against the vertical one;
    // the two rects touch, and their hit margins overlap at the junction.
    let row_handle = scene.add(
        Some(root),
        Rect::from_min_max(pos2(104.0, 48.0), pos2(400.0, 52.0)),
        PaintStyle::default(),
    );

    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (column_registration, _a) = recording_registration(column_handle, Axis::Horizontal);
    registry.register(column_registration);
    let (row_registration, _b) = recording_registration(row_handle, Axis::Vertical);
    registry.register(row_registration);

    // The junction point is inside one rect and the other's margin.
    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(column_handle), 1));
    assert_eq!(registry.intersecting_handles().len(), 2);
    assert_eq!(registry.cursor_override(), Some(CursorIcon::Move));
}

#[test]
fn disabled_global_cursor_never_overrides() {
    let (scene, _root, handle) = scene_with_handle();
    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let (registration, _log) = recording_registration(handle, Axis::Horizontal);
    registry.register(registration);
    registry.set_global_cursor_enabled(false);

    registry.pointer_down(&scene, &input(pos2(102.0, 50.0), Some(handle), 1));
    assert_eq!(registry.cursor_override(), None);
}

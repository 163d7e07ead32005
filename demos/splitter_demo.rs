//! Headless walkthrough of the full resize loop: registry hit-testing,
//! a pointer drag with cursor feedback, keyboard resizing, and collapse.
//!
//! Run with `RUST_LOG=debug cargo run --example splitter_demo` to also see
//! the solver's diagnostics.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::{Modifiers, Rect, pos2};
use flexpanes::{
    Axis, ConstraintFlags, Extent, HandleAction, HandleRegistration, HitAreaMargins,
    HitTestRegistry, PaintStyle, PanelConstraints, PanelGroup, PointerAccuracy, PointerInput,
    SplitterKey, SyntheticScene,
};

const WINDOW: Rect = Rect {
    min: pos2(0.0, 0.0),
    max: pos2(900.0, 600.0),
};

fn main() {
    env_logger::init();

    // One horizontal group filling the window: a collapsible sidebar, a main
    // editor, and a preview column, with a separator after each of the first
    // two panels.
    let mut scene = SyntheticScene::new();
    let root = scene.add(None, WINDOW, PaintStyle::default());
    let group_node = scene.add(Some(root), WINDOW, PaintStyle::default());
    let first_handle_rect = Rect::from_min_max(pos2(268.0, 0.0), pos2(272.0, 600.0));
    let first_handle = scene.add(Some(group_node), first_handle_rect, PaintStyle::default());

    let group = Rc::new(RefCell::new(PanelGroup::new(Axis::Horizontal)));
    group.borrow_mut().set_container_rect(WINDOW);
    let sidebar = group.borrow_mut().insert_panel(PanelConstraints {
        collapsible: true,
        collapsed_size: Some(Extent::Percent(4.0)),
        min_size: Some(Extent::Percent(20.0)),
        default_size: Some(Extent::Percent(30.0)),
        ..Default::default()
    });
    group.borrow_mut().insert_panel(PanelConstraints {
        min_size: Some(Extent::Pixels(200.0)),
        ..Default::default()
    });
    group.borrow_mut().insert_panel(PanelConstraints::default());

    let mut registry = HitTestRegistry::new(PointerAccuracy::Fine);
    let boundary_flags = Rc::new(Cell::new(ConstraintFlags::empty()));

    let owner = Rc::clone(&group);
    let flags_sink = Rc::clone(&boundary_flags);
    let handle_id = registry.register(HandleRegistration {
        node: first_handle,
        axis: Axis::Horizontal,
        margins: HitAreaMargins::default(),
        on_transition: Box::new(move |action, _state, input| {
            let mut group = owner.borrow_mut();
            match action {
                HandleAction::Down => {
                    group.drag_begin(0, input.position, first_handle_rect);
                }
                HandleAction::Move => {
                    if let Some(update) = group.drag_update(input.position) {
                        flags_sink.set(update.flags);
                    }
                }
                HandleAction::Up => group.drag_end(),
            }
        }),
    });

    println!("initial layout: {:?}", group.borrow().layout());

    // Drag the first separator: right, then hard left into the sidebar's
    // minimum so the blocked cursor shows up.
    registry.pointer_down(
        &scene,
        &PointerInput {
            position: pos2(270.0, 300.0),
            target: Some(first_handle),
            buttons: 1,
        },
    );
    for x in [350.0, 420.0, 120.0] {
        registry.pointer_move(
            &scene,
            &PointerInput {
                position: pos2(x, 300.0),
                target: Some(first_handle),
                buttons: 1,
            },
        );
        registry.report_constraint_flags(handle_id, boundary_flags.get());
        println!(
            "dragged to x={x:.0}: {:?} (cursor: {:?})",
            group.borrow().layout(),
            registry.cursor_override()
        );
    }
    registry.pointer_up(&PointerInput {
        position: pos2(120.0, 300.0),
        target: None,
        buttons: 0,
    });

    // Keyboard: one unmodified arrow step is 10% of the container.
    group
        .borrow_mut()
        .handle_key(0, SplitterKey::ArrowRight, Modifiers::NONE);
    println!("after ArrowRight: {:?}", group.borrow().layout());

    // Collapse and expand the sidebar; expand restores the pre-collapse size.
    group.borrow_mut().collapse(sidebar);
    println!("collapsed sidebar: {:?}", group.borrow().layout());
    group.borrow_mut().expand(sidebar);
    println!("expanded sidebar: {:?}", group.borrow().layout());
}

//! Pointer hit-testing and interaction dispatch for resize handles.
//!
//! One [`HitTestRegistry`] serves one host document/window; popup windows get
//! their own instance. The registry is an explicit object the host constructs
//! and feeds raw pointer events, never ambient global state, so independent
//! windows stay independent and tests can drive it synthetically.
//!
//! On pointer-down the registry computes the set of handles whose
//! margin-expanded rectangle contains the pointer, rejects handles occluded
//! by unrelated nodes painted above them, and locks the surviving set until
//! release: moves while a button is held never re-run hit-testing, so the
//! engaged handle set cannot change mid-drag.

use std::cmp::Ordering;

use ahash::{HashMap, HashMapExt as _};
use egui::{CursorIcon, Pos2};

mod cursor;
mod handle;
mod scene;
mod stacking;

#[cfg(test)]
mod registry_tests;

pub use cursor::{ConstraintFlags, cursor_icon_for};
pub use handle::{
    Axis, HandleAction, HandleId, HandleRegistration, HitAreaMargins, PointerAccuracy,
    PointerInput, ResizeHandlerState, TransitionCallback,
};
pub use scene::{GeometryProvider, NodeId, PaintStyle, PositionKind, SyntheticScene};
pub use stacking::paint_order_compare;

use cursor::CursorController;

struct RegisteredHandle {
    id: HandleId,
    node: NodeId,
    axis: Axis,
    margins: HitAreaMargins,
    state: ResizeHandlerState,
    on_transition: TransitionCallback,
}

/// Registry of the active resize handles of one document.
pub struct HitTestRegistry {
    accuracy: PointerAccuracy,
    next_handle_id: u64,
    handles: Vec<RegisteredHandle>,
    /// Handles engaged by the current gesture (or hovered between gestures),
    /// in registration order.
    intersecting: Vec<HandleId>,
    pointer_is_down: bool,
    last_position: Option<Pos2>,
    constraint_flags: HashMap<HandleId, ConstraintFlags>,
    cursor: CursorController,
}

impl HitTestRegistry {
    pub fn new(accuracy: PointerAccuracy) -> Self {
        Self {
            accuracy,
            next_handle_id: 0,
            handles: Vec::new(),
            intersecting: Vec::new(),
            pointer_is_down: false,
            last_position: None,
            constraint_flags: HashMap::new(),
            cursor: CursorController::default(),
        }
    }

    pub fn register(&mut self, registration: HandleRegistration) -> HandleId {
        let id = HandleId(self.next_handle_id);
        self.next_handle_id += 1;
        self.handles.push(RegisteredHandle {
            id,
            node: registration.node,
            axis: registration.axis,
            margins: registration.margins,
            state: ResizeHandlerState::Inactive,
            on_transition: registration.on_transition,
        });
        id
    }

    /// Remove a handle.
    ///
    /// The handle leaves the active set *before* any notification, so no
    /// observer can see a half-removed registration. A handle unmounting
    /// mid-gesture still receives its `Up`, keeping the owner's state machine
    /// out of a stuck drag.
    pub fn unregister(&mut self, id: HandleId) {
        let was_engaged = if let Some(index) = self.intersecting.iter().position(|h| *h == id) {
            self.intersecting.remove(index);
            true
        } else {
            false
        };
        self.constraint_flags.remove(&id);

        let Some(index) = self.handles.iter().position(|handle| handle.id == id) else {
            return;
        };
        let mut handle = self.handles.remove(index);

        if was_engaged && self.pointer_is_down {
            let input = PointerInput {
                position: self.last_position.unwrap_or(Pos2::ZERO),
                target: None,
                buttons: 0,
            };
            handle.state = ResizeHandlerState::Inactive;
            (handle.on_transition)(HandleAction::Up, handle.state, &input);
        }
        self.refresh_cursor();
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn handle_state(&self, id: HandleId) -> Option<ResizeHandlerState> {
        self.handles
            .iter()
            .find(|handle| handle.id == id)
            .map(|handle| handle.state)
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_is_down
    }

    /// Handles engaged by the current gesture (or hovered between gestures).
    pub fn intersecting_handles(&self) -> &[HandleId] {
        &self.intersecting
    }

    pub fn pointer_down(&mut self, scene: &dyn GeometryProvider, input: &PointerInput) {
        self.last_position = Some(input.position);
        self.pointer_is_down = true;
        self.intersecting = self.intersected_handles(scene, input);
        self.sync_states(HandleAction::Down, input);
        self.refresh_cursor();
    }

    pub fn pointer_move(&mut self, scene: &dyn GeometryProvider, input: &PointerInput) {
        self.last_position = Some(input.position);

        // Release outside the window: the up event went elsewhere, but the
        // buttons bitmask tells the truth.
        if self.pointer_is_down && !input.any_button_down() {
            self.pointer_up(input);
        }

        if !self.pointer_is_down {
            self.intersecting = self.intersected_handles(scene, input);
        }
        self.sync_states(HandleAction::Move, input);
        self.refresh_cursor();
    }

    pub fn pointer_up(&mut self, input: &PointerInput) {
        self.last_position = Some(input.position);
        self.pointer_is_down = false;
        let released = std::mem::take(&mut self.intersecting);
        for id in released {
            if let Some(handle) = self.handles.iter_mut().find(|handle| handle.id == id) {
                handle.state = ResizeHandlerState::Inactive;
                (handle.on_transition)(HandleAction::Up, handle.state, input);
            }
        }
        self.constraint_flags.clear();
        self.cursor.clear();
    }

    /// Report which constraint boundaries a drag through `id` is pressing
    /// against; feeds the global cursor override.
    pub fn report_constraint_flags(&mut self, id: HandleId, flags: ConstraintFlags) {
        if flags.is_empty() {
            self.constraint_flags.remove(&id);
        } else {
            self.constraint_flags.insert(id, flags);
        }
        self.refresh_cursor();
    }

    /// The cursor the host should apply document-wide, or `None` to fall
    /// back to per-element cursors.
    pub fn cursor_override(&self) -> Option<CursorIcon> {
        self.cursor.current()
    }

    /// Disable (or re-enable) the document-wide cursor override entirely.
    pub fn set_global_cursor_enabled(&mut self, enabled: bool) {
        self.cursor.set_enabled(enabled);
    }

    fn sync_states(&mut self, action: HandleAction, input: &PointerInput) {
        for index in 0..self.handles.len() {
            let id = self.handles[index].id;
            let engaged = self.intersecting.contains(&id);
            let next_state = if engaged {
                if self.pointer_is_down {
                    ResizeHandlerState::Drag
                } else {
                    ResizeHandlerState::Hover
                }
            } else {
                ResizeHandlerState::Inactive
            };

            let handle = &mut self.handles[index];
            let changed = handle.state != next_state;
            handle.state = next_state;
            // Engaged handles see every event (drag owners need the
            // positions); the rest only hear about their own transitions.
            if engaged || changed {
                (handle.on_transition)(action, next_state, input);
            }
        }
    }

    fn intersected_handles(
        &self,
        scene: &dyn GeometryProvider,
        input: &PointerInput,
    ) -> Vec<HandleId> {
        self.handles
            .iter()
            .filter(|handle| self.hits(scene, handle, input))
            .map(|handle| handle.id)
            .collect()
    }

    fn hits(
        &self,
        scene: &dyn GeometryProvider,
        handle: &RegisteredHandle,
        input: &PointerInput,
    ) -> bool {
        let rect = scene.rect_of(handle.node);
        let margin = handle.margins.for_accuracy(self.accuracy);
        if !rect.expand(margin).contains(input.position) {
            return false;
        }

        // The literal event target can veto the hit: an unrelated node
        // painted above the handle and overlapping it swallows the pointer.
        let Some(target) = input.target else {
            return true;
        };
        if target == handle.node
            || scene.contains(handle.node, target)
            || scene.contains(target, handle.node)
        {
            return true;
        }
        if paint_order_compare(scene, target, handle.node) != Ordering::Greater {
            return true;
        }

        // Stacking order alone is not enough: the target may paint above the
        // handle yet sit entirely elsewhere (hit margins reach beyond the
        // handle's rect). Walk the target up to the nearest node containing
        // the handle; any rect on the way that overlaps the handle blocks it.
        let mut current = Some(target);
        while let Some(node) = current {
            if scene.contains(node, handle.node) {
                break;
            }
            if scene.rect_of(node).intersects(rect) {
                return false;
            }
            current = scene.parent_of(node);
        }
        true
    }

    fn refresh_cursor(&mut self) {
        let mut horizontal = false;
        let mut vertical = false;
        let mut flags = ConstraintFlags::empty();
        for id in &self.intersecting {
            let Some(handle) = self.handles.iter().find(|handle| handle.id == *id) else {
                continue;
            };
            match handle.axis {
                Axis::Horizontal => horizontal = true,
                Axis::Vertical => vertical = true,
            }
            if let Some(handle_flags) = self.constraint_flags.get(id) {
                flags |= *handle_flags;
            }
        }
        self.cursor.update(horizontal, vertical, flags);
    }
}

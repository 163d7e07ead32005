//! Panel group state: layout ownership, drag gestures, and the imperative
//! panel API.
//!
//! A group owns one ordered list of panels sharing an axis and one layout
//! (percentages summing to 100). Pointer gestures arrive from the host's
//! registry callbacks as raw positions; the group converts them into percent
//! deltas against the gesture-start snapshot and runs the solver. Every
//! accepted change replaces the layout atomically, so observers never see a
//! half-applied state.

use ahash::{HashMap, HashMapExt as _};
use egui::{Modifiers, Pos2, Rect};
use itertools::Itertools as _;

use crate::aria::{self, AriaValues};
use crate::constraints::{Extent, PanelConstraints, ResolvedConstraints};
use crate::keyboard::{KeyOutcome, SplitterKey, cycle_focus};
use crate::registry::{Axis, ConstraintFlags};
use crate::solver::compare::{fuzzy_cmp, fuzzy_eq, layouts_equal};
use crate::solver::{ResizeTrigger, adjust_resolved, effective_bounds, validate_resolved};

/// Identifier for one panel of a group, stable across re-layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(u64);

#[derive(Debug)]
struct PanelSlot {
    id: PanelId,
    constraints: PanelConstraints,
}

/// Ephemeral state of one live drag gesture.
#[derive(Clone, Debug)]
pub struct DragGesture {
    /// Index of the dragged handle (between panels `handle` and `handle+1`).
    pub handle: usize,
    /// Pointer position at gesture start.
    pub initial_pointer: Pos2,
    /// Layout snapshot at gesture start; every move resolves against it.
    pub initial_layout: Vec<f64>,
    /// The handle's rectangle at gesture start.
    pub handle_rect: Rect,
}

/// Result of feeding one pointer move into a live gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragUpdate {
    pub layout_changed: bool,
    /// Boundaries the requested delta pressed against; feed these to
    /// [`crate::HitTestRegistry::report_constraint_flags`] for cursor
    /// feedback.
    pub flags: ConstraintFlags,
}

/// An ordered collection of panels sharing one axis and one layout.
pub struct PanelGroup {
    axis: Axis,
    panels: Vec<PanelSlot>,
    layout: Vec<f64>,
    container_rect: Rect,
    keyboard_resize_by: Option<Extent>,
    drag: Option<DragGesture>,
    size_before_collapse: HashMap<PanelId, f64>,
    next_panel_id: u64,
    warned_degenerate: bool,
}

impl PanelGroup {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            panels: Vec::new(),
            layout: Vec::new(),
            container_rect: Rect::ZERO,
            keyboard_resize_by: None,
            drag: None,
            size_before_collapse: HashMap::new(),
            next_panel_id: 0,
            warned_degenerate: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn handle_count(&self) -> usize {
        self.panels.len().saturating_sub(1)
    }

    /// The current layout, one percentage per panel, summing to 100.
    pub fn layout(&self) -> &[f64] {
        &self.layout
    }

    /// Step for unmodified arrow-key resizes; defaults to 10% when unset.
    pub fn set_keyboard_resize_by(&mut self, step: Option<Extent>) {
        self.keyboard_resize_by = step;
    }

    /// The group's main-axis size in pixels. Non-positive before first layout.
    pub fn container_px(&self) -> f64 {
        let extent = match self.axis {
            Axis::Horizontal => self.container_rect.width(),
            Axis::Vertical => self.container_rect.height(),
        };
        f64::from(extent)
    }

    /// Update the group's rectangle (host layout or window resize).
    ///
    /// Pixel-declared constraints resolve against the new size, so the
    /// current layout is revalidated when any panel declares one. Degenerate
    /// geometry is reported once per episode; the affected bounds resolve to
    /// zero instead of poisoning the layout with NaN.
    pub fn set_container_rect(&mut self, rect: Rect) {
        self.container_rect = rect;
        let any_pixels = self.panels.iter().any(|slot| slot.constraints.uses_pixels());
        if self.container_px() <= 0.0 {
            if any_pixels && !self.warned_degenerate {
                log::warn!(
                    "panel group has no measurable main-axis size; pixel constraints resolve to zero"
                );
                self.warned_degenerate = true;
            }
            return;
        }
        self.warned_degenerate = false;
        if any_pixels && !self.panels.is_empty() {
            self.layout = validate_resolved(&self.layout, &self.resolved());
        }
    }

    // --- panel lifecycle ------------------------------------------------

    /// Append a panel. The layout is rebuilt from default sizes; a live drag
    /// is cancelled since its pivot indices no longer mean anything.
    pub fn insert_panel(&mut self, constraints: PanelConstraints) -> PanelId {
        let id = PanelId(self.next_panel_id);
        self.next_panel_id += 1;
        self.panels.push(PanelSlot { id, constraints });
        self.drag = None;
        self.layout = self.default_layout();
        id
    }

    pub fn remove_panel(&mut self, id: PanelId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.panels.remove(index);
        self.size_before_collapse.remove(&id);
        self.drag = None;
        self.layout = self.default_layout();
    }

    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|slot| slot.id == id)
    }

    pub fn constraints_of(&self, id: PanelId) -> Option<&PanelConstraints> {
        self.index_of(id).map(|index| &self.panels[index].constraints)
    }

    /// Replace a panel's constraints and revalidate the live layout against
    /// them. Infeasible combinations keep the best-effort layout the
    /// validator reports.
    pub fn set_constraints(&mut self, id: PanelId, constraints: PanelConstraints) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.panels[index].constraints = constraints;
        if !self.layout.is_empty() {
            self.layout = validate_resolved(&self.layout, &self.resolved());
        }
    }

    /// Layout derived from declared default sizes: panels with a default take
    /// it, the rest split the remainder evenly, and the result is validated.
    pub fn default_layout(&self) -> Vec<f64> {
        if self.panels.is_empty() {
            return Vec::new();
        }
        let resolved = self.resolved();
        let declared: f64 = resolved.iter().filter_map(|c| c.default).sum();
        let undeclared = resolved.iter().positions(|c| c.default.is_none()).count();
        let fill = if undeclared == 0 {
            0.0
        } else {
            (100.0 - declared) / undeclared as f64
        };
        let layout: Vec<f64> = resolved
            .iter()
            .map(|c| c.default.unwrap_or(fill))
            .collect();
        validate_resolved(&layout, &resolved)
    }

    /// Replace the layout wholesale (e.g. restoring a persisted one).
    ///
    /// # Panics
    ///
    /// Panics if `layout.len()` does not match the panel count.
    pub fn set_layout(&mut self, layout: Vec<f64>) {
        self.layout = validate_resolved(&layout, &self.resolved());
    }

    // --- drag gestures --------------------------------------------------

    /// Begin a pointer gesture on `handle` (the separator between panels
    /// `handle` and `handle + 1`).
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not a valid handle index.
    pub fn drag_begin(&mut self, handle: usize, pointer: Pos2, handle_rect: Rect) {
        assert!(
            handle < self.handle_count(),
            "handle {handle} out of range for {} panels",
            self.panels.len()
        );
        self.drag = Some(DragGesture {
            handle,
            initial_pointer: pointer,
            initial_layout: self.layout.clone(),
            handle_rect,
        });
    }

    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    /// Feed a pointer position into the live gesture. Returns `None` when no
    /// gesture is active.
    pub fn drag_update(&mut self, pointer: Pos2) -> Option<DragUpdate> {
        let gesture = self.drag.as_ref()?;
        let container = self.container_px();
        if container <= 0.0 {
            if !self.warned_degenerate {
                log::warn!("dragging a panel group with no measurable size has no effect");
                self.warned_degenerate = true;
            }
            return Some(DragUpdate::default());
        }

        let offset_px = f64::from(
            self.axis.coordinate_of(pointer) - self.axis.coordinate_of(gesture.initial_pointer),
        );
        let delta = offset_px / container * 100.0;
        let pivots = [gesture.handle, gesture.handle + 1];
        let resolved = self.resolved();
        let next = adjust_resolved(
            &gesture.initial_layout,
            delta,
            pivots,
            &resolved,
            ResizeTrigger::Pointer,
        );

        let flags = self.boundary_flags(delta, &gesture.initial_layout, &next, pivots[0]);
        let layout_changed = !layouts_equal(&next, &self.layout);
        if layout_changed {
            self.layout = next;
        }
        Some(DragUpdate {
            layout_changed,
            flags,
        })
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Which boundary a requested delta pressed against: the delta was only
    /// partially (or not at all) absorbed when the first pivot moved less
    /// than asked.
    fn boundary_flags(
        &self,
        delta: f64,
        base: &[f64],
        next: &[f64],
        first_pivot: usize,
    ) -> ConstraintFlags {
        if fuzzy_eq(delta, 0.0) {
            return ConstraintFlags::empty();
        }
        let applied = next[first_pivot] - base[first_pivot];
        if fuzzy_cmp(applied.abs(), delta.abs()) != std::cmp::Ordering::Less {
            return ConstraintFlags::empty();
        }
        match (self.axis, delta < 0.0) {
            (Axis::Horizontal, true) => ConstraintFlags::HORIZONTAL_MIN,
            (Axis::Horizontal, false) => ConstraintFlags::HORIZONTAL_MAX,
            (Axis::Vertical, true) => ConstraintFlags::VERTICAL_MIN,
            (Axis::Vertical, false) => ConstraintFlags::VERTICAL_MAX,
        }
    }

    // --- imperative panel API -------------------------------------------

    pub fn size_of(&self, id: PanelId) -> Option<f64> {
        self.index_of(id).map(|index| self.layout[index])
    }

    pub fn is_collapsed(&self, id: PanelId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let constraints = self.panels[index].constraints.resolve(self.container_px());
        constraints.collapsible && fuzzy_eq(self.layout[index], constraints.collapsed)
    }

    /// Resize one panel to an explicit size. Returns whether the layout
    /// changed.
    pub fn resize(&mut self, id: PanelId, size: Extent) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let target = size.to_percent(self.container_px());
        let resolved = self.resolved();
        self.resize_to(index, target, ResizeTrigger::Imperative, &resolved)
    }

    /// Collapse a collapsible panel to its collapsed size, remembering the
    /// size it had so [`Self::expand`] can restore it.
    pub fn collapse(&mut self, id: PanelId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let resolved = self.resolved();
        let constraints = resolved[index];
        if !constraints.collapsible || fuzzy_eq(self.layout[index], constraints.collapsed) {
            return false;
        }
        self.size_before_collapse.insert(id, self.layout[index]);
        self.resize_to(index, constraints.collapsed, ResizeTrigger::Imperative, &resolved)
    }

    /// Expand a collapsed panel back to the size it had before collapsing,
    /// or to its minimum when nothing was remembered.
    pub fn expand(&mut self, id: PanelId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let resolved = self.resolved();
        let constraints = resolved[index];
        if !constraints.collapsible || !fuzzy_eq(self.layout[index], constraints.collapsed) {
            return false;
        }
        let target = self
            .size_before_collapse
            .get(&id)
            .copied()
            .unwrap_or(constraints.min)
            .max(constraints.min);
        self.resize_to(index, target, ResizeTrigger::Imperative, &resolved)
    }

    fn resize_to(
        &mut self,
        index: usize,
        target: f64,
        trigger: ResizeTrigger,
        resolved: &[ResolvedConstraints],
    ) -> bool {
        if self.panels.len() < 2 || fuzzy_eq(self.layout[index], target) {
            return false;
        }
        let is_last = index + 1 == self.panels.len();
        let pivots = if is_last {
            [index - 1, index]
        } else {
            [index, index + 1]
        };
        let delta = if is_last {
            self.layout[index] - target
        } else {
            target - self.layout[index]
        };
        let next = adjust_resolved(&self.layout, delta, pivots, resolved, trigger);
        let changed = !layouts_equal(&next, &self.layout);
        if changed {
            self.layout = next;
        }
        changed
    }

    // --- keyboard contract ----------------------------------------------

    /// Apply a key event targeting `handle`.
    pub fn handle_key(
        &mut self,
        handle: usize,
        key: SplitterKey,
        modifiers: Modifiers,
    ) -> KeyOutcome {
        if handle >= self.handle_count() {
            return KeyOutcome::Ignored;
        }
        match key {
            SplitterKey::F6 => {
                KeyOutcome::Focus(cycle_focus(self.handle_count(), handle, modifiers.shift))
            }
            SplitterKey::Enter => self.toggle_adjacent_collapsible(handle),
            SplitterKey::Home => self.drive_pivot_to_bound(handle, false),
            SplitterKey::End => self.drive_pivot_to_bound(handle, true),
            arrow => {
                let Some(direction) = arrow.arrow_direction(self.axis) else {
                    return KeyOutcome::Ignored;
                };
                let step = if modifiers.shift {
                    100.0
                } else {
                    self.keyboard_step_percent()
                };
                self.apply_keyboard_delta(handle, direction * step)
            }
        }
    }

    fn keyboard_step_percent(&self) -> f64 {
        self.keyboard_resize_by
            .map_or(10.0, |step| step.to_percent(self.container_px()))
    }

    fn apply_keyboard_delta(&mut self, handle: usize, delta: f64) -> KeyOutcome {
        let resolved = self.resolved();
        let next = adjust_resolved(
            &self.layout,
            delta,
            [handle, handle + 1],
            &resolved,
            ResizeTrigger::Keyboard,
        );
        if layouts_equal(&next, &self.layout) {
            KeyOutcome::Unchanged
        } else {
            self.layout = next;
            KeyOutcome::LayoutChanged
        }
    }

    fn drive_pivot_to_bound(&mut self, handle: usize, to_max: bool) -> KeyOutcome {
        let resolved = self.resolved();
        let (min, max) = effective_bounds(&resolved, handle);
        let target = if to_max { max } else { min };
        self.apply_keyboard_delta(handle, target - self.layout[handle])
    }

    /// Enter toggles the collapsible panel adjacent to the handle: the panel
    /// before it when collapsible, otherwise the one after.
    fn toggle_adjacent_collapsible(&mut self, handle: usize) -> KeyOutcome {
        let candidate = [handle, handle + 1]
            .into_iter()
            .find(|index| self.panels[*index].constraints.collapsible);
        let Some(index) = candidate else {
            return KeyOutcome::Ignored;
        };
        let id = self.panels[index].id;
        let changed = if self.is_collapsed(id) {
            self.expand(id)
        } else {
            self.collapse(id)
        };
        if changed {
            KeyOutcome::LayoutChanged
        } else {
            KeyOutcome::Unchanged
        }
    }

    // --- accessibility --------------------------------------------------

    /// ARIA numbers for `handle`, or `None` when the index is out of range.
    pub fn aria_values(&self, handle: usize) -> Option<AriaValues> {
        if handle >= self.handle_count() {
            return None;
        }
        let constraints: Vec<PanelConstraints> =
            self.panels.iter().map(|slot| slot.constraints).collect();
        Some(aria::aria_values(
            &self.layout,
            &constraints,
            self.container_px(),
            handle,
        ))
    }

    fn resolved(&self) -> Vec<ResolvedConstraints> {
        let container = self.container_px();
        self.panels
            .iter()
            .map(|slot| slot.constraints.resolve(container))
            .collect()
    }
}

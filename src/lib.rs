#![forbid(unsafe_code)]

//! Constraint-solving resizable panel groups.
//!
//! `flexpanes` is the algorithmic core of a drag-to-resize panel system: a
//! one-dimensional distribute-and-clamp solver plus the pointer hit-testing
//! that decides which separator a gesture belongs to. It renders nothing and
//! owns no real UI tree; hosts describe their geometry through
//! [`GeometryProvider`] and consume plain values back (layouts, handle state
//! transitions, ARIA numbers, cursor icons).
//!
//! The moving parts, leaf first:
//!
//! - [`constraints`]: per-panel bounds ([`PanelConstraints`]), declared in
//!   percent or pixels ([`Extent`]) and normalized into percent space.
//! - [`solver`]: [`adjust_layout`] turns a signed delta at a handle into the
//!   next constraint-valid layout; [`validate_layout`] repairs stale ones.
//! - [`registry`]: [`HitTestRegistry`] tracks the live handles of one
//!   document, hit-tests pointer events against them (paint order included),
//!   and dispatches `down`/`move`/`up` transitions.
//! - [`group`]: [`PanelGroup`] owns a layout and drives the solver from
//!   gestures, keyboard input and the imperative panel API.
//!
//! A drag, end to end: the registry sees pointer-down intersecting a handle
//! and locks onto it → the owning group converts pointer travel into a
//! percent delta and asks the solver for the next layout → the group
//! publishes the layout and reports which constraint boundaries the drag is
//! pressing against → the registry's cursor override reflects them.
//!
//! Nesting is composition: a vertical group placed inside one panel of a
//! horizontal group, each with its own layout. The core never sees a tree.

pub mod aria;
pub mod constraints;
pub mod group;
pub mod keyboard;
pub mod registry;
pub mod solver;


pub use aria::{AriaValues, aria_values};
pub use constraints::{Extent, PanelConstraints, ResolvedConstraints, resolve_constraints};
pub use group::{DragGesture, DragUpdate, PanelGroup, PanelId};
pub use keyboard::{KeyOutcome, SplitterKey, cycle_focus};
pub use registry::{
    Axis, ConstraintFlags, GeometryProvider, HandleAction, HandleId, HandleRegistration,
    HitAreaMargins, HitTestRegistry, NodeId, PaintStyle, PointerAccuracy, PointerInput,
    PositionKind, ResizeHandlerState, SyntheticScene, TransitionCallback, cursor_icon_for,
    paint_order_compare,
};
pub use solver::{
    ResizeTrigger, adjust_layout, clamp_panel_size, effective_bounds, validate_layout,
};

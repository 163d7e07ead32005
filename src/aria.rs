//! ARIA numbers for resize handles.
//!
//! A handle is exposed to assistive technology as a separator controlling the
//! panel immediately before it. The values are recomputed by the host
//! whenever the layout or any constraint changes.

use crate::constraints::{PanelConstraints, resolve_constraints};
use crate::solver::effective_bounds;

/// Rounded percentages for `aria-valuemin`/`aria-valuemax`/`aria-valuenow`,
/// plus the index of the panel the handle controls (`aria-controls`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AriaValues {
    pub value_min: f64,
    pub value_max: f64,
    pub value_now: f64,
    pub controls_panel: usize,
}

/// Compute the ARIA numbers for the handle between panels `handle_index` and
/// `handle_index + 1`.
///
/// # Panics
///
/// Panics if `layout.len() != constraints.len()` or `handle_index` is not a
/// valid handle of the group.
pub fn aria_values(
    layout: &[f64],
    constraints: &[PanelConstraints],
    container_px: f64,
    handle_index: usize,
) -> AriaValues {
    assert_eq!(
        layout.len(),
        constraints.len(),
        "layout has {} entries for {} panels",
        layout.len(),
        constraints.len()
    );
    assert!(
        handle_index + 1 < layout.len(),
        "handle {handle_index} out of range for {} panels",
        layout.len()
    );

    let resolved = resolve_constraints(constraints, container_px);
    let (min, max) = effective_bounds(&resolved, handle_index);
    AriaValues {
        value_min: min.round(),
        value_max: max.round(),
        value_now: layout[handle_index].round(),
        controls_panel: handle_index,
    }
}

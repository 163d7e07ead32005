//! The layout adjuster: turns a requested size delta into the next
//! constraint-valid layout.

use std::cmp::Ordering;

use super::ResizeTrigger;
use super::compare::{fuzzy_cmp, fuzzy_eq};
use super::resolve::clamp_panel_size;
use crate::constraints::{PanelConstraints, ResolvedConstraints, resolve_constraints};

/// Upper bound on delta-reduction retries when a collapse threshold keeps
/// oscillating. Deltas never exceed 100%, so this is never reached by a
/// well-formed gesture.
const MAX_DELTA_ATTEMPTS: usize = 128;

/// Compute the next layout for a signed `delta` applied at the handle between
/// `pivot_indices`.
///
/// `prev_layout` entries are percentages summing to 100. A positive delta
/// grows the first pivot, a negative delta grows the second; the freed space
/// is taken from the opposite side, cascading outward one panel at a time.
/// The result preserves the sum invariant; when the delta cannot be applied
/// at all, `prev_layout` is returned unchanged.
///
/// # Panics
///
/// Panics if `prev_layout.len() != constraints.len()` or the pivot indices
/// are not two adjacent panels inside the layout. Both indicate caller bugs,
/// not runtime drift.
pub fn adjust_layout(
    prev_layout: &[f64],
    delta: f64,
    pivot_indices: [usize; 2],
    constraints: &[PanelConstraints],
    container_px: f64,
    trigger: ResizeTrigger,
) -> Vec<f64> {
    let resolved = resolve_constraints(constraints, container_px);
    adjust_resolved(prev_layout, delta, pivot_indices, &resolved, trigger)
}

pub(crate) fn adjust_resolved(
    prev_layout: &[f64],
    delta: f64,
    pivot_indices: [usize; 2],
    all: &[ResolvedConstraints],
    trigger: ResizeTrigger,
) -> Vec<f64> {
    assert_eq!(
        prev_layout.len(),
        all.len(),
        "layout has {} entries for {} panels",
        prev_layout.len(),
        all.len()
    );
    let [first_pivot, second_pivot] = pivot_indices;
    assert!(
        first_pivot + 1 == second_pivot && second_pivot < prev_layout.len(),
        "pivot indices {pivot_indices:?} are not adjacent panels of a {}-panel layout",
        prev_layout.len()
    );

    if fuzzy_eq(delta, 0.0) {
        return prev_layout.to_vec();
    }

    let mut delta = delta;
    if trigger == ResizeTrigger::Keyboard {
        delta = magnify_for_keyboard(prev_layout, delta, pivot_indices, all);
    }

    // A collapse threshold crossed while re-clamping the growing pivot can
    // leave space that neither side accepts. Shave the request one unit at a
    // time toward zero until an attempt lands, bounded by an explicit counter.
    for _ in 0..MAX_DELTA_ATTEMPTS {
        match attempt(prev_layout, delta, pivot_indices, all) {
            AttemptOutcome::Done(next) => return next,
            AttemptOutcome::Unchanged => return prev_layout.to_vec(),
            AttemptOutcome::Retry => {
                let shaved = delta.abs() - 1.0;
                if shaved <= 0.0 {
                    break;
                }
                delta = if delta < 0.0 { -shaved } else { shaved };
            }
        }
    }

    log::debug!("layout adjustment could not settle; keeping previous layout");
    prev_layout.to_vec()
}

enum AttemptOutcome {
    Done(Vec<f64>),
    Unchanged,
    Retry,
}

fn attempt(
    prev_layout: &[f64],
    delta: f64,
    [first_pivot, second_pivot]: [usize; 2],
    all: &[ResolvedConstraints],
) -> AttemptOutcome {
    let grow_pivot = if delta < 0.0 { second_pivot } else { first_pivot };
    let grow_prev = prev_layout[grow_pivot];
    let grow_clamped = clamp_panel_size(all, grow_pivot, grow_prev + delta.abs());
    if fuzzy_eq(grow_clamped, grow_prev) {
        // No room to grow: the drag ran past the edge.
        return AttemptOutcome::Unchanged;
    }

    let mut next = prev_layout.to_vec();

    // Walk outward from the shrinking pivot, taking as much of the remaining
    // delta as each panel's clamp allows.
    let shrink_start = if delta < 0.0 { first_pivot } else { second_pivot };
    let walk_down = delta < 0.0;
    let mut remaining = grow_clamped - grow_prev;
    let mut delta_applied = 0.0;
    let mut index = shrink_start;
    loop {
        let candidate = next[index] - remaining;
        let clamped = clamp_panel_size(all, index, candidate);
        if !fuzzy_eq(next[index], clamped) {
            let absorbed = next[index] - clamped;
            delta_applied += absorbed;
            remaining -= absorbed;
            next[index] = clamped;
        }
        if fuzzy_cmp(remaining, 0.0) != Ordering::Greater {
            break;
        }
        if walk_down {
            if index == 0 {
                break;
            }
            index -= 1;
        } else {
            index += 1;
            if index == next.len() {
                break;
            }
        }
    }

    if fuzzy_eq(delta_applied, 0.0) {
        // Nothing on the shrinking side could give way.
        return AttemptOutcome::Unchanged;
    }

    // The growing pivot takes only what was actually freed. Its own clamp can
    // still move the target (a collapse threshold crossing); whatever it
    // rejects is handed back to the shrinking side the same way it was taken.
    let grow_target = grow_prev + delta_applied;
    let grow_final = clamp_panel_size(all, grow_pivot, grow_target);
    next[grow_pivot] = grow_final;

    let mut leftover = grow_target - grow_final;
    if !fuzzy_eq(leftover, 0.0) {
        let mut index = shrink_start;
        loop {
            let candidate = next[index] + leftover;
            let clamped = clamp_panel_size(all, index, candidate);
            if !fuzzy_eq(next[index], clamped) {
                leftover -= clamped - next[index];
                next[index] = clamped;
            }
            if fuzzy_eq(leftover, 0.0) {
                break;
            }
            if walk_down {
                if index == 0 {
                    break;
                }
                index -= 1;
            } else {
                index += 1;
                if index == next.len() {
                    break;
                }
            }
        }
        if !fuzzy_eq(leftover, 0.0) {
            return AttemptOutcome::Retry;
        }
    }

    let total: f64 = next.iter().sum();
    if !fuzzy_eq(total, 100.0) {
        return AttemptOutcome::Retry;
    }
    AttemptOutcome::Done(next)
}

/// Keyboard accessibility: one keypress must produce a visible, usable size.
///
/// When the expanding pivot sits at its collapsed size, the delta is raised
/// so the panel lands directly on its minimum instead of being caught by the
/// halfway rule; symmetrically, a collapsible pivot resting at its minimum
/// collapses fully rather than creeping below it.
fn magnify_for_keyboard(
    prev_layout: &[f64],
    delta: f64,
    [first_pivot, second_pivot]: [usize; 2],
    all: &[ResolvedConstraints],
) -> f64 {
    let mut delta = delta;

    let expand_index = if delta < 0.0 { second_pivot } else { first_pivot };
    let expanding = &all[expand_index];
    if expanding.collapsible && fuzzy_eq(prev_layout[expand_index], expanding.collapsed) {
        let local_delta = expanding.min - prev_layout[expand_index];
        if fuzzy_cmp(local_delta, delta.abs()) == Ordering::Greater {
            delta = if delta < 0.0 { -local_delta } else { local_delta };
        }
    }

    let collapse_index = if delta < 0.0 { first_pivot } else { second_pivot };
    let collapsing = &all[collapse_index];
    if collapsing.collapsible && fuzzy_eq(prev_layout[collapse_index], collapsing.min) {
        let local_delta = prev_layout[collapse_index] - collapsing.collapsed;
        if fuzzy_cmp(local_delta, delta.abs()) == Ordering::Greater {
            delta = if delta < 0.0 { -local_delta } else { local_delta };
        }
    }

    delta
}

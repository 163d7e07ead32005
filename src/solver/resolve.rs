//! Effective bounds and single-panel clamping.

use std::cmp::Ordering;

use super::compare::fuzzy_cmp;
use crate::constraints::ResolvedConstraints;

/// The min/max a panel can actually occupy once its siblings' reserved space
/// is accounted for.
///
/// A collapsed size substitutes for the min on every *other* collapsible
/// panel: those panels can always be squeezed down to their collapsed size,
/// so only that much of the container is reserved for them. Requesting a
/// size inside these bounds never implies an infeasible allocation for the
/// rest of the group.
pub fn effective_bounds(all: &[ResolvedConstraints], index: usize) -> (f64, f64) {
    let mut reserved_by_others = 0.0;
    let mut claimable_by_others = 0.0;
    for (i, constraints) in all.iter().enumerate() {
        if i == index {
            continue;
        }
        reserved_by_others += if constraints.collapsible {
            constraints.collapsed
        } else {
            constraints.min
        };
        claimable_by_others += constraints.max;
    }

    let constraints = &all[index];
    let max = constraints.max.min(100.0 - reserved_by_others);
    let min = constraints.min.max(100.0 - claimable_by_others);
    (min, max)
}

/// Clamp `requested` into the panel's effective bounds.
///
/// Collapsible panels snap instead of clamping at the low end: below the
/// halfway point between the collapsed size and the effective minimum the
/// panel resolves to its collapsed size, at or above it to the minimum.
/// Exactly at the halfway point the panel stays expanded, so a drag resting
/// on the boundary does not flicker between the two states.
pub fn clamp_panel_size(all: &[ResolvedConstraints], index: usize, requested: f64) -> f64 {
    let (min, max) = effective_bounds(all, index);
    let constraints = &all[index];

    if constraints.collapsible && fuzzy_cmp(requested, min) == Ordering::Less {
        let halfway = (constraints.collapsed + min) / 2.0;
        return if fuzzy_cmp(requested, halfway) == Ordering::Less {
            constraints.collapsed
        } else {
            min
        };
    }

    // `max` wins over `min` when an infeasible configuration inverts them.
    requested.max(min).min(max)
}

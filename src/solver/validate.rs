//! Layout revalidation: bring a possibly-stale layout back onto the
//! constraint surface without losing the sum-to-100 invariant.

use super::compare::fuzzy_eq;
use super::resolve::clamp_panel_size;
use crate::constraints::{PanelConstraints, ResolvedConstraints, resolve_constraints};

/// Re-clamp every entry of `layout` against its constraints and restore the
/// sum-to-100 invariant.
///
/// A drifted total is first renormalized proportionally (constraints may have
/// changed under a live layout), then every entry is clamped, and the
/// displaced remainder is redistributed in index order to panels that still
/// have room. A remainder that no panel can absorb means the constraints
/// cannot fill the container; that is reported as a warning and the best
/// effort is returned rather than crashing.
///
/// # Panics
///
/// Panics if `layout.len() != constraints.len()`: a caller bug, not runtime
/// drift.
pub fn validate_layout(
    layout: &[f64],
    constraints: &[PanelConstraints],
    container_px: f64,
) -> Vec<f64> {
    let resolved = resolve_constraints(constraints, container_px);
    validate_resolved(layout, &resolved)
}

pub(crate) fn validate_resolved(layout: &[f64], all: &[ResolvedConstraints]) -> Vec<f64> {
    assert_eq!(
        layout.len(),
        all.len(),
        "layout has {} entries for {} panels",
        layout.len(),
        all.len()
    );

    let mut next = layout.to_vec();
    if next.is_empty() {
        return next;
    }

    let total: f64 = next.iter().sum();
    if !fuzzy_eq(total, 100.0) {
        if total <= 0.0 {
            log::debug!("layout total {total:.3} is degenerate; resetting to an even split");
            let even = 100.0 / next.len() as f64;
            next.fill(even);
        } else {
            for size in &mut next {
                *size = *size / total * 100.0;
            }
        }
    }

    let mut remaining = 0.0;
    for index in 0..next.len() {
        let clamped = clamp_panel_size(all, index, next[index]);
        if next[index] != clamped {
            remaining += next[index] - clamped;
            next[index] = clamped;
        }
    }

    if !fuzzy_eq(remaining, 0.0) {
        for index in 0..next.len() {
            let candidate = next[index] + remaining;
            let clamped = clamp_panel_size(all, index, candidate);
            if next[index] != clamped {
                remaining -= clamped - next[index];
                next[index] = clamped;
            }
            if fuzzy_eq(remaining, 0.0) {
                break;
            }
        }
        if !fuzzy_eq(remaining, 0.0) {
            log::warn!(
                "panel constraints cannot fill the container; {remaining:.3}% left unassigned"
            );
        }
    }

    next
}

use super::compare::LAYOUT_TOLERANCE;
use super::validate_layout;
use crate::constraints::{Extent, PanelConstraints};

const CONTAINER_PX: f64 = 1_000.0;

fn percent(value: f64) -> Option<Extent> {
    Some(Extent::Percent(value))
}

fn assert_layout(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= LAYOUT_TOLERANCE,
            "layout {actual:?} != expected {expected:?}"
        );
    }
}

#[test]
fn drifted_total_is_renormalized_proportionally() {
    let constraints = vec![PanelConstraints::default(); 3];
    let next = validate_layout(&[25.0, 25.0, 25.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[100.0 / 3.0, 100.0 / 3.0, 100.0 / 3.0]);
}

#[test]
fn stale_layout_is_reclamped_after_a_constraint_change() {
    let mut constraints = vec![PanelConstraints::default(); 2];
    constraints[0].max_size = percent(40.0);
    // The 50/50 layout predates the max; the displaced 10% moves to panel 1.
    let next = validate_layout(&[50.0, 50.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[40.0, 60.0]);
}

#[test]
fn raised_minimum_pulls_space_from_later_panels() {
    let mut constraints = vec![PanelConstraints::default(); 2];
    constraints[0].min_size = percent(20.0);
    let next = validate_layout(&[5.0, 95.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[20.0, 80.0]);
}

#[test]
fn infeasible_constraints_return_best_effort() {
    let mut constraints = vec![PanelConstraints::default(); 2];
    constraints[0].max_size = percent(40.0);
    constraints[1].max_size = percent(40.0);
    // No assignment can reach 100%; the best effort keeps both at max.
    let next = validate_layout(&[50.0, 50.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[40.0, 40.0]);
}

#[test]
fn collapsed_panels_survive_validation() {
    let mut constraints = vec![PanelConstraints::default(); 2];
    constraints[1] = PanelConstraints {
        collapsible: true,
        collapsed_size: percent(5.0),
        min_size: percent(25.0),
        ..Default::default()
    };
    let next = validate_layout(&[95.0, 5.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[95.0, 5.0]);
}

#[test]
fn degenerate_total_resets_to_an_even_split() {
    let constraints = vec![PanelConstraints::default(); 4];
    let next = validate_layout(&[0.0, 0.0, 0.0, 0.0], &constraints, CONTAINER_PX);
    assert_layout(&next, &[25.0, 25.0, 25.0, 25.0]);
}

#[test]
fn empty_layout_is_returned_as_is() {
    let next = validate_layout(&[], &[], CONTAINER_PX);
    assert!(next.is_empty());
}

#[test]
#[should_panic(expected = "layout has 2 entries for 3 panels")]
fn layout_shape_mismatch_panics() {
    let constraints = vec![PanelConstraints::default(); 3];
    let _ = validate_layout(&[50.0, 50.0], &constraints, CONTAINER_PX);
}

//! Paint-order comparison, per CSS stacking rules.

use std::cmp::Ordering;

use super::scene::{GeometryProvider, NodeId};

/// Decide which of two nodes paints later ("on top") at a point where both
/// could receive an event.
///
/// Returns `Greater` when `a` paints above `b`. The comparison walks both
/// ancestor chains to their nearest common ancestor and compares the paths
/// below it: the first stacking context on each path carries the effective
/// z-index (`auto` counts as 0, higher paints later); on a tie, a positioned
/// divergent child beats a static one, and source order (later sibling
/// paints later) breaks the rest.
///
/// Nodes on the same ancestor chain are ordered child-above-ancestor, which
/// keeps the result total; callers that care filter that case out first.
pub fn paint_order_compare(
    scene: &dyn GeometryProvider,
    a: NodeId,
    b: NodeId,
) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let chain_a = chain_from_root(scene, a);
    let chain_b = chain_from_root(scene, b);

    let mut divergence = 0;
    while divergence < chain_a.len()
        && divergence < chain_b.len()
        && chain_a[divergence] == chain_b[divergence]
    {
        divergence += 1;
    }

    // One is an ancestor of the other: the descendant paints above it.
    if divergence == chain_a.len() {
        return Ordering::Less;
    }
    if divergence == chain_b.len() {
        return Ordering::Greater;
    }

    let z_a = first_context_z(scene, &chain_a[divergence..]);
    let z_b = first_context_z(scene, &chain_b[divergence..]);
    if z_a.is_some() || z_b.is_some() {
        let ordering = z_a.unwrap_or(0).cmp(&z_b.unwrap_or(0));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    let style_a = scene.style_of(chain_a[divergence]);
    let style_b = scene.style_of(chain_b[divergence]);
    match (
        style_a.position.is_positioned(),
        style_b.position.is_positioned(),
    ) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }

    scene
        .sibling_index(chain_a[divergence])
        .cmp(&scene.sibling_index(chain_b[divergence]))
}

fn chain_from_root(scene: &dyn GeometryProvider, node: NodeId) -> Vec<NodeId> {
    let mut chain = vec![node];
    let mut current = node;
    while let Some(parent) = scene.parent_of(current) {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// Effective z-index of the outermost stacking context on `path` (the one
/// that participates in the common ancestor's context), if any.
fn first_context_z(scene: &dyn GeometryProvider, path: &[NodeId]) -> Option<i32> {
    path.iter().find_map(|node| {
        let style = scene.style_of(*node);
        style
            .creates_stacking_context()
            .then_some(style.z_index.unwrap_or(0))
    })
}

//! Host-geometry abstraction.
//!
//! The registry never touches a real UI tree. Hosts describe their node
//! hierarchy through [`GeometryProvider`]: rectangles, parent links, paint
//! styles, and sibling order, which is everything hit-testing and
//! stacking-order comparison need. [`SyntheticScene`] is a ready-made arena
//! implementation for tests and headless hosts.

use egui::Rect;

/// Opaque identifier for a node in the host's tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// CSS-style positioning scheme of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionKind {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionKind {
    pub fn is_positioned(self) -> bool {
        self != Self::Static
    }
}

/// The paint-relevant slice of a node's computed style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintStyle {
    pub position: PositionKind,
    /// Explicit z-index; `None` is `auto`.
    pub z_index: Option<i32>,
    pub opacity: f32,
    /// `transform`, `filter` or `perspective` set.
    pub has_transform: bool,
    /// `isolation: isolate`.
    pub isolated: bool,
    /// The node is a flex or grid item (z-index applies without positioning).
    pub flex_or_grid_item: bool,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            position: PositionKind::Static,
            z_index: None,
            opacity: 1.0,
            has_transform: false,
            isolated: false,
            flex_or_grid_item: false,
        }
    }
}

impl PaintStyle {
    /// Whether the node establishes a new stacking context.
    pub fn creates_stacking_context(&self) -> bool {
        if self.opacity < 1.0 || self.has_transform || self.isolated {
            return true;
        }
        match self.position {
            PositionKind::Fixed | PositionKind::Sticky => true,
            PositionKind::Relative | PositionKind::Absolute => self.z_index.is_some(),
            PositionKind::Static => self.flex_or_grid_item && self.z_index.is_some(),
        }
    }
}

/// What the registry needs to know about the host's node tree.
///
/// Implementations are queried lazily, only for nodes already implicated by
/// a pointer position; they should be cheap lookups, not tree walks.
pub trait GeometryProvider {
    /// Bounding rectangle of `node` in the shared coordinate space.
    fn rect_of(&self, node: NodeId) -> Rect;

    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    fn style_of(&self, node: NodeId) -> PaintStyle;

    /// Source order among siblings (0-based). Later siblings paint later.
    fn sibling_index(&self, node: NodeId) -> usize;

    /// Whether `node` is `descendant` or one of its ancestors.
    fn contains(&self, node: NodeId, descendant: NodeId) -> bool {
        let mut current = Some(descendant);
        while let Some(candidate) = current {
            if candidate == node {
                return true;
            }
            current = self.parent_of(candidate);
        }
        false
    }
}

/// An arena-backed [`GeometryProvider`] for tests and headless hosts.
#[derive(Debug, Default)]
pub struct SyntheticScene {
    nodes: Vec<SceneNode>,
}

#[derive(Debug)]
struct SceneNode {
    parent: Option<NodeId>,
    rect: Rect,
    style: PaintStyle,
    sibling_index: usize,
    child_count: usize,
}

impl SyntheticScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Children must be added in source order; the insertion
    /// order among siblings is their paint order tiebreak.
    pub fn add(&mut self, parent: Option<NodeId>, rect: Rect, style: PaintStyle) -> NodeId {
        let sibling_index = match parent {
            Some(parent) => {
                let slot = &mut self.nodes[parent.0 as usize];
                slot.child_count += 1;
                slot.child_count - 1
            }
            None => 0,
        };
        self.nodes.push(SceneNode {
            parent,
            rect,
            style,
            sibling_index,
            child_count: 0,
        });
        NodeId(self.nodes.len() as u64 - 1)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0 as usize].rect = rect;
    }

    pub fn set_style(&mut self, node: NodeId, style: PaintStyle) {
        self.nodes[node.0 as usize].style = style;
    }
}

impl GeometryProvider for SyntheticScene {
    fn rect_of(&self, node: NodeId) -> Rect {
        self.nodes[node.0 as usize].rect
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0 as usize].parent
    }

    fn style_of(&self, node: NodeId) -> PaintStyle {
        self.nodes[node.0 as usize].style
    }

    fn sibling_index(&self, node: NodeId) -> usize {
        self.nodes[node.0 as usize].sibling_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Rect, pos2};

    fn rect() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0))
    }

    #[test]
    fn contains_is_inclusive_and_walks_up() {
        let mut scene = SyntheticScene::new();
        let root = scene.add(None, rect(), PaintStyle::default());
        let child = scene.add(Some(root), rect(), PaintStyle::default());
        let grandchild = scene.add(Some(child), rect(), PaintStyle::default());

        assert!(scene.contains(root, grandchild));
        assert!(scene.contains(child, child));
        assert!(!scene.contains(grandchild, root));
    }

    #[test]
    fn sibling_indices_follow_insertion_order() {
        let mut scene = SyntheticScene::new();
        let root = scene.add(None, rect(), PaintStyle::default());
        let a = scene.add(Some(root), rect(), PaintStyle::default());
        let b = scene.add(Some(root), rect(), PaintStyle::default());
        assert_eq!(scene.sibling_index(a), 0);
        assert_eq!(scene.sibling_index(b), 1);
    }

    #[test]
    fn stacking_context_triggers() {
        let positioned_with_z = PaintStyle {
            position: PositionKind::Relative,
            z_index: Some(1),
            ..Default::default()
        };
        assert!(positioned_with_z.creates_stacking_context());

        let positioned_auto = PaintStyle {
            position: PositionKind::Relative,
            ..Default::default()
        };
        assert!(!positioned_auto.creates_stacking_context());

        let translucent = PaintStyle {
            opacity: 0.5,
            ..Default::default()
        };
        assert!(translucent.creates_stacking_context());

        let fixed = PaintStyle {
            position: PositionKind::Fixed,
            ..Default::default()
        };
        assert!(fixed.creates_stacking_context());

        let flex_item_with_z = PaintStyle {
            flex_or_grid_item: true,
            z_index: Some(2),
            ..Default::default()
        };
        assert!(flex_item_with_z.creates_stacking_context());
    }
}

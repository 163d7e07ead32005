//! Handle registration types and pointer-event vocabulary.

use egui::Pos2;

use super::scene::NodeId;

/// The axis a panel group lays out along. A handle resizes across this axis:
/// horizontal groups have vertical separators dragged east-west, and vice
/// versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The coordinate of `point` along this axis.
    pub fn coordinate_of(self, point: Pos2) -> f32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

/// Identifier issued by a registry for one registered handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleId(pub(super) u64);

/// Pointer capability, probed once per session by the host (the equivalent
/// of a `pointer: coarse` media query) and injected at registry creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAccuracy {
    /// Touch-like input; handles get a larger hit area.
    Coarse,
    /// Mouse-like input.
    Fine,
}

/// How far beyond its rectangle a handle reacts, per pointer capability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitAreaMargins {
    pub coarse: f32,
    pub fine: f32,
}

impl Default for HitAreaMargins {
    fn default() -> Self {
        Self {
            coarse: 15.0,
            fine: 5.0,
        }
    }
}

impl HitAreaMargins {
    pub(super) fn for_accuracy(&self, accuracy: PointerAccuracy) -> f32 {
        match accuracy {
            PointerAccuracy::Coarse => self.coarse,
            PointerAccuracy::Fine => self.fine,
        }
    }
}

/// Interaction state of a handle. Derived by the registry, never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeHandlerState {
    #[default]
    Inactive,
    Hover,
    Drag,
}

/// The transition being dispatched to a handle's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleAction {
    Down,
    Move,
    Up,
}

/// A raw pointer event as observed by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub position: Pos2,
    /// The literal event target: the topmost node under the pointer, if the
    /// host knows it. Used to reject handles occluded by unrelated nodes.
    pub target: Option<NodeId>,
    /// Currently pressed buttons as a bitmask; 0 means none. A move with no
    /// buttons while a drag is live means the release happened outside the
    /// window.
    pub buttons: u8,
}

impl PointerInput {
    pub fn any_button_down(&self) -> bool {
        self.buttons != 0
    }
}

/// Callback invoked on every state transition of a handle.
pub type TransitionCallback = Box<dyn FnMut(HandleAction, ResizeHandlerState, &PointerInput)>;

/// Everything the registry needs to track one resize handle.
pub struct HandleRegistration {
    /// The handle's node in the host tree (hit-testing geometry source).
    pub node: NodeId,
    /// Axis of the owning group.
    pub axis: Axis,
    pub margins: HitAreaMargins,
    pub on_transition: TransitionCallback,
}

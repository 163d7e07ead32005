//! Global cursor override derivation.
//!
//! While handles are engaged the host should show a single resize cursor
//! regardless of what the pointer is over; when a drag presses against a
//! constraint boundary, the cursor flips to a directional "blocked" variant
//! pointing the only way travel remains possible.

use egui::CursorIcon;

bitflags::bitflags! {
    /// Which constraint boundaries the current drag is pressing against,
    /// derived from whether the requested delta was fully, partially, or not
    /// absorbed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ConstraintFlags: u8 {
        const HORIZONTAL_MIN = 1 << 0;
        const HORIZONTAL_MAX = 1 << 1;
        const VERTICAL_MIN = 1 << 2;
        const VERTICAL_MAX = 1 << 3;
    }
}

/// Pick the cursor for the given engaged axes and boundary flags.
///
/// A blocked horizontal minimum means the handle can only travel east, so
/// the east-resize cursor is shown; diagonal variants cover a handle
/// intersection blocked on both axes at once.
pub fn cursor_icon_for(horizontal: bool, vertical: bool, flags: ConstraintFlags) -> CursorIcon {
    if flags.contains(ConstraintFlags::HORIZONTAL_MIN) {
        if flags.contains(ConstraintFlags::VERTICAL_MIN) {
            return CursorIcon::ResizeSouthEast;
        }
        if flags.contains(ConstraintFlags::VERTICAL_MAX) {
            return CursorIcon::ResizeNorthEast;
        }
        return CursorIcon::ResizeEast;
    }
    if flags.contains(ConstraintFlags::HORIZONTAL_MAX) {
        if flags.contains(ConstraintFlags::VERTICAL_MIN) {
            return CursorIcon::ResizeSouthWest;
        }
        if flags.contains(ConstraintFlags::VERTICAL_MAX) {
            return CursorIcon::ResizeNorthWest;
        }
        return CursorIcon::ResizeWest;
    }
    if flags.contains(ConstraintFlags::VERTICAL_MIN) {
        return CursorIcon::ResizeSouth;
    }
    if flags.contains(ConstraintFlags::VERTICAL_MAX) {
        return CursorIcon::ResizeNorth;
    }

    match (horizontal, vertical) {
        (true, true) => CursorIcon::Move,
        (true, false) => CursorIcon::ResizeColumn,
        (false, true) => CursorIcon::ResizeRow,
        (false, false) => CursorIcon::Default,
    }
}

/// Tracks the single global cursor override for the engaged handle set.
#[derive(Debug)]
pub(super) struct CursorController {
    enabled: bool,
    current: Option<CursorIcon>,
}

impl Default for CursorController {
    fn default() -> Self {
        Self {
            enabled: true,
            current: None,
        }
    }
}

impl CursorController {
    pub(super) fn update(&mut self, horizontal: bool, vertical: bool, flags: ConstraintFlags) {
        if !self.enabled || (!horizontal && !vertical) {
            self.current = None;
            return;
        }
        self.current = Some(cursor_icon_for(horizontal, vertical, flags));
    }

    pub(super) fn clear(&mut self) {
        self.current = None;
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.current = None;
        }
    }

    /// The cursor the host should apply document-wide, or `None` to fall
    /// back to per-element cursors.
    pub(super) fn current(&self) -> Option<CursorIcon> {
        self.current
    }
}

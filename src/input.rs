use egui::Pos2;

use crate::geometry::HandleKind;

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The host interrupted the gesture (system alert, lost capture, ...)
    Cancel,
}

/// A pointer event forwarded by the host, in parent-local display coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Pos2,
    /// Drag target the host already resolved, if its widgets do hit testing
    pub target: Option<HandleKind>,
}

impl PointerEvent {
    pub fn down(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Down,
            position,
            target: None,
        }
    }

    /// Press directly on a known handle
    pub fn down_on(handle: HandleKind, position: Pos2) -> Self {
        Self {
            kind: PointerKind::Down,
            position,
            target: Some(handle),
        }
    }

    pub fn moved(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
            target: None,
        }
    }

    pub fn up(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Up,
            position,
            target: None,
        }
    }

    pub fn cancel(position: Pos2) -> Self {
        Self {
            kind: PointerKind::Cancel,
            position,
            target: None,
        }
    }
}

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// A drag target on the crop overlay.
///
/// The eight resize handles sit on the corners and edge midpoints of the
/// overlay; `Body` is the overlay itself and moves it without resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
    LeftCenter,
    RightCenter,
    Body,
}

impl HandleKind {
    /// Resize handles in hit-test priority order: corners before edges.
    pub const ALL_RESIZE: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::TopCenter,
        HandleKind::BottomCenter,
        HandleKind::LeftCenter,
        HandleKind::RightCenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleKind::TopLeft => "top_left",
            HandleKind::TopRight => "top_right",
            HandleKind::BottomLeft => "bottom_left",
            HandleKind::BottomRight => "bottom_right",
            HandleKind::TopCenter => "top_center",
            HandleKind::BottomCenter => "bottom_center",
            HandleKind::LeftCenter => "left_center",
            HandleKind::RightCenter => "right_center",
            HandleKind::Body => "body",
        }
    }

    /// True for the eight handles that change the overlay size.
    pub fn is_resize(&self) -> bool {
        !matches!(self, HandleKind::Body)
    }

    /// Where this handle is drawn on `rect`. `Body` anchors at the center.
    pub fn anchor(&self, rect: Rect) -> Pos2 {
        match self {
            HandleKind::TopLeft => rect.left_top(),
            HandleKind::TopRight => rect.right_top(),
            HandleKind::BottomLeft => rect.left_bottom(),
            HandleKind::BottomRight => rect.right_bottom(),
            HandleKind::TopCenter => rect.center_top(),
            HandleKind::BottomCenter => rect.center_bottom(),
            HandleKind::LeftCenter => rect.left_center(),
            HandleKind::RightCenter => rect.right_center(),
            HandleKind::Body => rect.center(),
        }
    }

    /// Origin and size deltas `[dx, dy, dw, dh]` produced by a unit drag.
    ///
    /// Each entry is the multiplier applied to the drag delta's x (for `dx`
    /// and `dw`) or y (for `dy` and `dh`) component.
    pub(crate) fn delta_factors(&self) -> [f32; 4] {
        match self {
            HandleKind::TopLeft => [1.0, 1.0, -1.0, -1.0],
            HandleKind::TopRight => [0.0, 1.0, 1.0, -1.0],
            HandleKind::BottomLeft => [1.0, 0.0, -1.0, 1.0],
            HandleKind::BottomRight => [0.0, 0.0, 1.0, 1.0],
            HandleKind::TopCenter => [0.0, 1.0, 0.0, -1.0],
            HandleKind::BottomCenter => [0.0, 0.0, 0.0, 1.0],
            HandleKind::LeftCenter => [1.0, 0.0, -1.0, 0.0],
            HandleKind::RightCenter => [0.0, 0.0, 1.0, 0.0],
            HandleKind::Body => [1.0, 1.0, 0.0, 0.0],
        }
    }
}

impl std::fmt::Display for HandleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

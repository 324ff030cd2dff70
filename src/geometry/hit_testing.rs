use egui::{Pos2, Rect};

use super::HandleKind;

/// Radius around a handle anchor that still counts as grabbing it.
pub const DEFAULT_HANDLE_RADIUS: f32 = 15.0;

/// Find the drag target under `pos` for an overlay occupying `rect`.
///
/// Resize handles win over the body, corners over edge midpoints, so a press
/// near a corner of a small overlay resizes instead of moving it.
pub fn hit_test_handle(pos: Pos2, rect: Rect, radius: f32) -> Option<HandleKind> {
    for handle in HandleKind::ALL_RESIZE {
        let distance = pos.distance(handle.anchor(rect));
        if distance <= radius {
            log::trace!("Hit {} handle at distance {}", handle, distance);
            return Some(handle);
        }
    }

    if rect.contains(pos) {
        return Some(HandleKind::Body);
    }

    None
}

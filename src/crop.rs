use egui::{Pos2, Rect, Vec2};

use crate::config::{EditorConfig, OverlayPlacement};
use crate::error::{EditError, EditResult};
use crate::geometry::{HandleKind, hit_test_handle};

/// Bookkeeping for the drag gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    handle: HandleKind,
    start_point: Pos2,
    /// Rectangle at gesture start, restored if the gesture is cancelled
    rect_at_start: Rect,
}

/// Geometry engine behind the interactive crop overlay.
///
/// Owns the overlay rectangle in parent-local display coordinates and applies
/// handle drags to it. A resize that would take either side below
/// `min_size` is rejected as a whole. Body moves are kept inside the parent;
/// resizes are not.
#[derive(Debug, Clone)]
pub struct CropOverlayEngine {
    rect: Rect,
    parent_bounds: Vec2,
    min_size: f32,
    placement: OverlayPlacement,
    drag: Option<ActiveDrag>,
}

impl CropOverlayEngine {
    pub fn new(parent_bounds: Vec2, config: &EditorConfig) -> Self {
        let rect = config.overlay_placement.resolve(parent_bounds, config.min_size);
        Self {
            rect,
            parent_bounds,
            min_size: config.min_size,
            placement: config.overlay_placement,
            drag: None,
        }
    }

    /// Engine with an explicit starting rectangle, reset placement fixed to it
    pub fn with_rect(rect: Rect, parent_bounds: Vec2, min_size: f32) -> Self {
        Self {
            rect,
            parent_bounds,
            min_size,
            placement: OverlayPlacement::Fixed(rect),
            drag: None,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn parent_bounds(&self) -> Vec2 {
        self.parent_bounds
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    pub fn active_handle(&self) -> Option<HandleKind> {
        self.drag.map(|drag| drag.handle)
    }

    /// Where the active gesture started, if one is in progress
    pub fn drag_origin(&self) -> Option<Pos2> {
        self.drag.map(|drag| drag.start_point)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle under `point`, if any
    pub fn hit_test(&self, point: Pos2, radius: f32) -> Option<HandleKind> {
        hit_test_handle(point, self.rect, radius)
    }

    /// Anchor positions of all eight resize handles, for drawing
    pub fn handle_positions(&self) -> Vec<(HandleKind, Pos2)> {
        HandleKind::ALL_RESIZE
            .iter()
            .map(|handle| (*handle, handle.anchor(self.rect)))
            .collect()
    }

    pub fn begin_drag(&mut self, handle: HandleKind, at: Pos2) -> EditResult<()> {
        if let Some(active) = self.drag {
            log::warn!(
                "Rejected drag on {} while {} is still active",
                handle,
                active.handle
            );
            return Err(EditError::ConcurrentDragRejected);
        }

        log::debug!("Begin {} drag at {:?}", handle, at);
        self.drag = Some(ActiveDrag {
            handle,
            start_point: at,
            rect_at_start: self.rect,
        });
        Ok(())
    }

    /// Apply an incremental drag `delta` through `handle` and return the
    /// resulting rectangle (unchanged if the update was rejected).
    pub fn update_drag(&mut self, handle: HandleKind, delta: Vec2) -> Rect {
        let [fx, fy, fw, fh] = handle.delta_factors();
        let min = self.rect.min + Vec2::new(fx * delta.x, fy * delta.y);
        let size = self.rect.size() + Vec2::new(fw * delta.x, fh * delta.y);

        if !min.is_finite() || !size.is_finite() {
            log::warn!("Rejected {} drag by non-finite delta {:?}", handle, delta);
            return self.rect;
        }
        if size.x < self.min_size || size.y < self.min_size {
            log::debug!(
                "Rejected {} drag by {:?}: size {:?} below minimum {}",
                handle,
                delta,
                size,
                self.min_size
            );
            return self.rect;
        }

        let min = if handle.is_resize() {
            min
        } else {
            self.clamp_origin(min, size)
        };

        self.rect = Rect::from_min_size(min, size);
        self.rect
    }

    // Keep a moved rectangle fully inside the parent
    fn clamp_origin(&self, min: Pos2, size: Vec2) -> Pos2 {
        let max = (self.parent_bounds - size).max(Vec2::ZERO);
        Pos2::new(min.x.clamp(0.0, max.x), min.y.clamp(0.0, max.y))
    }

    /// Finish the gesture, keeping the rectangle as it is. Idempotent.
    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("End {} drag, overlay now {:?}", drag.handle, self.rect);
        }
    }

    /// Abort the gesture and restore the rectangle from before it began.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Cancel {} drag, restoring {:?}", drag.handle, drag.rect_at_start);
            self.rect = drag.rect_at_start;
        }
    }

    /// Put the overlay back at its default placement and drop any gesture
    pub fn reset(&mut self) {
        self.drag = None;
        self.rect = self.placement.resolve(self.parent_bounds, self.min_size);
        log::debug!("Crop overlay reset to {:?}", self.rect);
    }

    /// The parent was laid out again; the overlay is re-placed within it.
    pub fn set_parent_bounds(&mut self, parent_bounds: Vec2) {
        self.parent_bounds = parent_bounds;
        self.reset();
    }

    /// Map the overlay from display space into source-image pixel space.
    ///
    /// `display_frame` is where the image is shown and `image_pixel_size` its
    /// native resolution. The axes are scaled independently.
    pub fn compute_pixel_crop_rect(
        &self,
        display_frame: Rect,
        image_pixel_size: Vec2,
    ) -> EditResult<Rect> {
        display_to_pixel_rect(self.rect, display_frame, image_pixel_size)
    }

    /// Compute the pixel crop rectangle and reset the overlay for the next edit
    pub fn commit(&mut self, display_frame: Rect, image_pixel_size: Vec2) -> EditResult<Rect> {
        let pixel_rect = self.compute_pixel_crop_rect(display_frame, image_pixel_size)?;
        log::info!("Committed crop {:?} -> pixels {:?}", self.rect, pixel_rect);
        self.reset();
        Ok(pixel_rect)
    }
}

/// Scale `overlay` from a display frame of `display_frame`'s size to an image
/// of `image_pixel_size`.
pub fn display_to_pixel_rect(
    overlay: Rect,
    display_frame: Rect,
    image_pixel_size: Vec2,
) -> EditResult<Rect> {
    let frame = display_frame.size();
    if frame.x == 0.0 || frame.y == 0.0 || !frame.is_finite() {
        return Err(EditError::InvalidGeometry(format!(
            "display frame has no area: {:?}",
            display_frame
        )));
    }

    let scale = Vec2::new(image_pixel_size.x / frame.x, image_pixel_size.y / frame.y);
    Ok(Rect::from_min_size(
        Pos2::new(overlay.min.x * scale.x, overlay.min.y * scale.y),
        overlay.size() * scale,
    ))
}

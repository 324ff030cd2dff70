use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;

use crate::error::{EditError, EditResult};
use crate::raster::{self, DrawSurface, RasterSurface, ScaledSurface};
use crate::stroke::{DrawingTool, MutableStroke, Paint, Stroke};

/// Records freehand strokes for the drawing mode.
///
/// Committed strokes stay editable vector data (undo, eraser) until they are
/// composited onto a base image, at which point the recorder is cleared.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    strokes: Vec<Stroke>,
    // Transient state: the stroke being drawn (if any)
    current: Option<MutableStroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn current(&self) -> Option<&MutableStroke> {
        self.current.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn begin_stroke(
        &mut self,
        at: Pos2,
        tool: DrawingTool,
        color: Color32,
        width: f32,
    ) -> EditResult<()> {
        if self.current.is_some() {
            log::warn!("Rejected {} stroke: another stroke is in progress", tool.name());
            return Err(EditError::ConcurrentDragRejected);
        }

        log::debug!("Begin {} stroke at {:?}", tool.name(), at);
        self.current = Some(MutableStroke::new(at, tool, color, width));
        Ok(())
    }

    pub fn extend_stroke(&mut self, to: Pos2) -> EditResult<()> {
        let stroke = self.current.as_mut().ok_or(EditError::NoActiveStroke)?;
        stroke.add_point(to);
        Ok(())
    }

    /// Commit the stroke in progress and return it
    pub fn end_stroke(&mut self) -> EditResult<&Stroke> {
        let stroke = self.current.take().ok_or(EditError::NoActiveStroke)?.into_stroke();
        log::debug!(
            "Committed {} stroke {} with {} points",
            stroke.tool().name(),
            stroke.id(),
            stroke.points().len()
        );
        self.strokes.push(stroke);
        Ok(&self.strokes[self.strokes.len() - 1])
    }

    /// Drop the stroke in progress without committing it
    pub fn cancel_stroke(&mut self) {
        if self.current.take().is_some() {
            log::debug!("Cancelled stroke in progress");
        }
    }

    /// Remove the most recently committed stroke. Does nothing when empty.
    pub fn undo(&mut self) -> Option<Stroke> {
        let removed = self.strokes.pop();
        if let Some(stroke) = &removed {
            log::debug!("Undo stroke {}, {} remaining", stroke.id(), self.strokes.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// Replay every committed stroke, oldest first
    pub fn render(&self, surface: &mut impl DrawSurface) {
        for stroke in &self.strokes {
            replay(surface, stroke.points(), stroke.width(), stroke.paint());
        }
    }

    /// As [`Self::render`], followed by the stroke still being drawn
    pub fn render_with_preview(&self, surface: &mut impl DrawSurface) {
        self.render(surface);
        if let Some(current) = &self.current {
            replay(surface, current.points(), current.width(), current.paint());
        }
    }

    /// Rasterize the committed strokes onto a transparent layer.
    ///
    /// Eraser strokes clear pixels of this layer only.
    pub fn compose_layer(&self, width: u32, height: u32) -> RgbaImage {
        let mut layer = RgbaImage::new(width, height);
        self.render(&mut RasterSurface::new(&mut layer));
        layer
    }

    /// Rasterize strokes captured in a display frame of `display_frame`'s size
    /// onto a transparent layer of `width` x `height` pixels.
    pub fn compose_scaled_layer(
        &self,
        display_frame: Rect,
        width: u32,
        height: u32,
    ) -> EditResult<RgbaImage> {
        let frame = display_frame.size();
        if frame.x == 0.0 || frame.y == 0.0 || !frame.is_finite() {
            return Err(EditError::InvalidGeometry(format!(
                "display frame has no area: {:?}",
                display_frame
            )));
        }

        let scale = Vec2::new(width as f32 / frame.x, height as f32 / frame.y);
        let mut layer = RgbaImage::new(width, height);
        let mut raster = RasterSurface::new(&mut layer);
        self.render(&mut ScaledSurface::new(&mut raster, scale));
        Ok(layer)
    }

    /// Flatten the strokes onto `base`, returning a new image.
    ///
    /// The strokes become pixels of the result, so the recorder is cleared.
    pub fn composite_onto_base(&mut self, base: &RgbaImage) -> RgbaImage {
        let layer = self.compose_layer(base.width(), base.height());
        let output = raster::composite_over(base, &layer);
        log::info!(
            "Composited {} strokes onto {}x{} image",
            self.strokes.len(),
            base.width(),
            base.height()
        );
        self.clear();
        output
    }

    /// Like [`Self::composite_onto_base`], for strokes recorded over `base`
    /// shown at `display_frame` rather than at its pixel size.
    pub fn composite_onto_display(
        &mut self,
        base: &RgbaImage,
        display_frame: Rect,
    ) -> EditResult<RgbaImage> {
        let layer = self.compose_scaled_layer(display_frame, base.width(), base.height())?;
        let output = raster::composite_over(base, &layer);
        log::info!(
            "Composited {} strokes from {:?} display frame onto {}x{} image",
            self.strokes.len(),
            display_frame.size(),
            base.width(),
            base.height()
        );
        self.clear();
        Ok(output)
    }
}

fn replay(surface: &mut impl DrawSurface, points: &[Pos2], width: f32, paint: Paint) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    surface.begin_path();
    surface.move_to(*first);
    for point in rest {
        surface.line_to(*point);
    }
    surface.stroke_path(width, paint);
}

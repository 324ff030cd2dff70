//! Pixel-level operations: stroking paths into an RGBA layer, flattening a
//! layer onto a photo, and the single-call crop, brightness and filter edits.

use egui::{Pos2, Rect, Vec2};
use image::{DynamicImage, GrayImage, Luma, Pixel, Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::stroke::Paint;

/// Smallest stamp radius, so hairline strokes still cover a pixel.
const MIN_STAMP_RADIUS: f32 = 0.75;

/// Target of a vector stroke replay.
///
/// Mirrors a 2D canvas path API: build a path with `move_to`/`line_to`, then
/// stroke it once.
pub trait DrawSurface {
    /// Discard any path built since the last stroke
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Pos2);
    fn line_to(&mut self, point: Pos2);
    /// Stroke the current path with round caps and joins, then discard it
    fn stroke_path(&mut self, width: f32, paint: Paint);
}

/// A [`DrawSurface`] that rasterizes into an RGBA image.
pub struct RasterSurface<'a> {
    image: &'a mut RgbaImage,
    subpaths: Vec<Vec<Pos2>>,
}

impl<'a> RasterSurface<'a> {
    pub fn new(image: &'a mut RgbaImage) -> Self {
        Self {
            image,
            subpaths: Vec::new(),
        }
    }

    // `origin` is the mask's top-left corner in image pixels
    fn stamp_circle(mask: &mut GrayImage, origin: Pos2, center: Pos2, radius: f32) {
        if !center.is_finite() {
            return;
        }
        let center = center - origin.to_vec2();
        let (width, height) = mask.dimensions();
        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = (center.x + radius).ceil().min(width as f32);
        let max_y = (center.y + radius).ceil().min(height as f32);
        if max_x <= 0.0 || max_y <= 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as u32, max_y as u32);

        let radius_sq = radius * radius;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    mask.put_pixel(x, y, Luma([255]));
                }
            }
        }
    }

    // Dense stepping along the segment gives round joins and caps for free.
    // Only the part whose stamps can still reach the mask is walked.
    fn stamp_segment(mask: &mut GrayImage, origin: Pos2, start: Pos2, end: Pos2, radius: f32) {
        let reach = Rect::from_min_size(origin, Self::mask_size(mask)).expand(radius);
        let Some((start, end)) = clip_segment(start, end, reach) else {
            return;
        };

        let distance = start.distance(end);
        if distance < 0.1 {
            Self::stamp_circle(mask, origin, start, radius);
            return;
        }

        let spacing = (radius / 4.0).max(1.0);
        let steps = (distance / spacing).ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            Self::stamp_circle(mask, origin, start.lerp(end, t), radius);
        }
    }

    fn mask_size(mask: &GrayImage) -> Vec2 {
        Vec2::new(mask.width() as f32, mask.height() as f32)
    }
}

/// Clip a segment to `bounds` (Liang-Barsky). `None` if nothing is left.
fn clip_segment(start: Pos2, end: Pos2, bounds: Rect) -> Option<(Pos2, Pos2)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let d = end - start;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    for (p, q) in [
        (-d.x, start.x - bounds.min.x),
        (d.x, bounds.max.x - start.x),
        (-d.y, start.y - bounds.min.y),
        (d.y, bounds.max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((start + d * t0, start + d * t1))
}

impl DrawSurface for RasterSurface<'_> {
    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Pos2) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Pos2) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn stroke_path(&mut self, width: f32, paint: Paint) {
        let subpaths = std::mem::take(&mut self.subpaths);
        let radius = (width / 2.0).max(MIN_STAMP_RADIUS);
        if !radius.is_finite() {
            log::warn!("Skipping stroke with non-finite width {}", width);
            return;
        }

        let points: Vec<Pos2> = subpaths.iter().flatten().copied().filter(|p| p.is_finite()).collect();
        if points.is_empty() {
            return;
        }

        // Coverage mask over the touched part of the image only
        let (w, h) = self.image.dimensions();
        let image_rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(w as f32, h as f32));
        let touched = Rect::from_points(&points).expand(radius).intersect(image_rect);
        if !touched.is_positive() {
            return;
        }
        let origin = touched.min.floor();
        let corner = touched.max.ceil();
        let (x0, y0) = (origin.x as u32, origin.y as u32);
        let (x1, y1) = ((corner.x as u32).min(w), (corner.y as u32).min(h));
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        // Coverage first, so overlapping stamps blend only once per pixel
        let mut mask = GrayImage::new(x1 - x0, y1 - y0);
        for subpath in &subpaths {
            match subpath.as_slice() {
                [] => {}
                [only] => Self::stamp_circle(&mut mask, origin, *only, radius),
                points => {
                    for segment in points.windows(2) {
                        Self::stamp_segment(&mut mask, origin, segment[0], segment[1], radius);
                    }
                }
            }
        }

        let source = match paint {
            Paint::Color(color) => Some(Rgba(color.to_srgba_unmultiplied())),
            Paint::Clear => None,
        };

        for (x, y, coverage) in mask.enumerate_pixels() {
            if coverage[0] == 0 {
                continue;
            }
            let pixel = self.image.get_pixel_mut(x0 + x, y0 + y);
            match source {
                Some(color) => pixel.blend(&color),
                None => *pixel = Rgba([0, 0, 0, 0]),
            }
        }
    }
}

/// Forwards to another surface with every coordinate scaled per axis.
///
/// Used to replay strokes captured in display space into pixel space. Stroke
/// widths scale by the mean of the two axis factors.
pub struct ScaledSurface<'s, S: DrawSurface> {
    inner: &'s mut S,
    scale: Vec2,
}

impl<'s, S: DrawSurface> ScaledSurface<'s, S> {
    pub fn new(inner: &'s mut S, scale: Vec2) -> Self {
        Self { inner, scale }
    }
}

impl<S: DrawSurface> DrawSurface for ScaledSurface<'_, S> {
    fn begin_path(&mut self) {
        self.inner.begin_path();
    }

    fn move_to(&mut self, point: Pos2) {
        self.inner.move_to((point.to_vec2() * self.scale).to_pos2());
    }

    fn line_to(&mut self, point: Pos2) {
        self.inner.line_to((point.to_vec2() * self.scale).to_pos2());
    }

    fn stroke_path(&mut self, width: f32, paint: Paint) {
        self.inner.stroke_path(width * (self.scale.x + self.scale.y) / 2.0, paint);
    }
}

/// Draw `layer` over `base` (source-over) into a new image the size of `base`.
pub fn composite_over(base: &RgbaImage, layer: &RgbaImage) -> RgbaImage {
    let mut output = base.clone();
    imageops::overlay(&mut output, layer, 0, 0);
    output
}

/// Cut `pixel_rect` out of `image`.
///
/// The rectangle is rounded to whole pixels and clipped to the image, the way
/// a bitmap crop behaves when asked for an area hanging off the edge.
pub fn crop_image(image: &RgbaImage, pixel_rect: Rect) -> EditResult<RgbaImage> {
    if !pixel_rect.is_finite() {
        return Err(EditError::InvalidGeometry(format!(
            "crop rectangle is not finite: {:?}",
            pixel_rect
        )));
    }

    let bounds = Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(image.width() as f32, image.height() as f32),
    );
    let rounded = Rect::from_min_max(pixel_rect.min.round(), pixel_rect.max.round());
    let clipped = rounded.intersect(bounds);
    if clipped.width() < 1.0 || clipped.height() < 1.0 {
        return Err(EditError::EmptyCrop(pixel_rect));
    }

    let (x, y) = (clipped.min.x as u32, clipped.min.y as u32);
    let (w, h) = (clipped.width() as u32, clipped.height() as u32);
    log::debug!("Cropping {}x{} image to {}x{} at ({}, {})", image.width(), image.height(), w, h, x, y);
    Ok(imageops::crop_imm(image, x, y, w, h).to_image())
}

/// Shift every colour channel by `amount * 255`, with `amount` clamped to
/// `[-1, 1]`. Alpha is left untouched.
pub fn adjust_brightness(image: &RgbaImage, amount: f32) -> RgbaImage {
    let offset = (amount.clamp(-1.0, 1.0) * 255.0).round() as i32;
    imageops::brighten(image, offset)
}

/// One-shot colour filters offered by the filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Luma grayscale
    Mono,
    /// Colour negative
    Invert,
}

/// Apply `filter` to a copy of `image`; alpha is preserved.
pub fn apply_filter(image: &RgbaImage, filter: Filter) -> RgbaImage {
    match filter {
        Filter::Mono => DynamicImage::ImageLumaA8(imageops::grayscale_alpha(image)).to_rgba8(),
        Filter::Invert => {
            let mut output = image.clone();
            imageops::invert(&mut output);
            output
        }
    }
}

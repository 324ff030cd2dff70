use egui::{Rect, Vec2};
use image::RgbaImage;

/// What the hosting screen provides when a command needs the photo.
///
/// The host owns the base image and decides where it is displayed; commands
/// only read from it and hand derived images back.
pub trait ImageHost {
    /// Where the image is shown, in the same coordinates as the crop overlay
    /// and the stroke points
    fn display_frame(&self) -> Rect;

    /// The editable photo
    fn base_image(&self) -> &RgbaImage;

    /// Native resolution of the photo
    fn image_pixel_size(&self) -> Vec2 {
        let image = self.base_image();
        Vec2::new(image.width() as f32, image.height() as f32)
    }
}

/// An [`ImageHost`] over a fixed frame and image
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub display_frame: Rect,
    pub image: RgbaImage,
}

impl StaticHost {
    pub fn new(display_frame: Rect, image: RgbaImage) -> Self {
        Self {
            display_frame,
            image,
        }
    }
}

impl ImageHost for StaticHost {
    fn display_frame(&self) -> Rect {
        self.display_frame
    }

    fn base_image(&self) -> &RgbaImage {
        &self.image
    }
}

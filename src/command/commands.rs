use egui::Rect;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::ImageHost;
use crate::error::{EditError, EditResult};
use crate::mode::{EditMode, Effect, ModeEvent};
use crate::raster::{self, Filter};
use crate::session::EditorSession;
use crate::stroke::DrawingTool;

/// Commands the hosting screen sends from its buttons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Switch to a mode (drawing, filter, crop, brightness)
    EnterMode(EditMode),

    /// Leave the current mode, discarding its uncommitted state
    ExitMode,

    /// Change the freehand tool used by the next stroke
    SelectTool(DrawingTool),

    /// Remove the last committed stroke
    Undo,

    /// Remove every uncommitted stroke
    ClearStrokes,

    /// Crop the photo to the overlay
    ApplyCrop,

    /// Flatten the strokes into the photo
    ApplyDrawing,

    /// Shift the photo's brightness by an amount in `[-1, 1]`
    ApplyBrightness(f32),

    ApplyFilter(Filter),
}

/// Derived result of a commit, handed back to the host
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Cropped {
        /// Crop area in source-image pixels, before clipping to the image
        pixel_rect: Rect,
        image: RgbaImage,
    },
    Image(RgbaImage),
}

impl Artifact {
    pub fn image(&self) -> &RgbaImage {
        match self {
            Artifact::Cropped { image, .. } | Artifact::Image(image) => image,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        match self {
            Artifact::Cropped { image, .. } | Artifact::Image(image) => image,
        }
    }
}

/// What executing a command produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    /// Chrome changes for the host to apply, in order
    pub effects: Vec<Effect>,
    pub artifact: Option<Artifact>,
}

impl CommandOutput {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            artifact: None,
        }
    }
}

impl Command {
    /// Execute the command against `session`, reading the photo from `host`
    pub fn execute(
        &self,
        session: &mut EditorSession,
        host: &dyn ImageHost,
    ) -> EditResult<CommandOutput> {
        match *self {
            Command::EnterMode(mode) => Ok(CommandOutput::effects(
                session.apply_mode_event(ModeEvent::Enter(mode)),
            )),

            Command::ExitMode => Ok(CommandOutput::effects(
                session.apply_mode_event(ModeEvent::Exit),
            )),

            Command::SelectTool(tool) => {
                session.select_tool(tool);
                Ok(CommandOutput::default())
            }

            Command::Undo => {
                session.recorder_mut().undo();
                Ok(CommandOutput::default())
            }

            Command::ClearStrokes => {
                session.recorder_mut().clear();
                Ok(CommandOutput::default())
            }

            Command::ApplyCrop => {
                require_mode(session, EditMode::Crop)?;
                let pixel_rect = session
                    .crop()
                    .compute_pixel_crop_rect(host.display_frame(), host.image_pixel_size())?;
                let image = raster::crop_image(host.base_image(), pixel_rect)?;
                session.crop_mut().reset();
                log::info!(
                    "Applied crop {:?}, result is {}x{}",
                    pixel_rect,
                    image.width(),
                    image.height()
                );
                Ok(committed(session, Artifact::Cropped { pixel_rect, image }))
            }

            Command::ApplyDrawing => {
                require_mode(session, EditMode::Drawing)?;
                let image = session
                    .recorder_mut()
                    .composite_onto_display(host.base_image(), host.display_frame())?;
                Ok(committed(session, Artifact::Image(image)))
            }

            Command::ApplyBrightness(amount) => {
                require_mode(session, EditMode::Brightness)?;
                let image = raster::adjust_brightness(host.base_image(), amount);
                log::info!("Applied brightness {}", amount);
                Ok(committed(session, Artifact::Image(image)))
            }

            Command::ApplyFilter(filter) => {
                require_mode(session, EditMode::Filter)?;
                let image = raster::apply_filter(host.base_image(), filter);
                log::info!("Applied {:?} filter", filter);
                Ok(committed(session, Artifact::Image(image)))
            }
        }
    }
}

fn require_mode(session: &EditorSession, expected: EditMode) -> EditResult<()> {
    let actual = session.mode();
    if actual != expected {
        log::warn!("Rejected {:?} commit while in {:?} mode", expected, actual);
        return Err(EditError::ModeMismatch { expected, actual });
    }
    Ok(())
}

fn committed(session: &mut EditorSession, artifact: Artifact) -> CommandOutput {
    CommandOutput {
        effects: session.apply_mode_event(ModeEvent::Committed),
        artifact: Some(artifact),
    }
}

use egui::{Pos2, Rect, Vec2};

use crate::command::{Command, CommandOutput, ImageHost};
use crate::config::EditorConfig;
use crate::crop::CropOverlayEngine;
use crate::error::EditResult;
use crate::geometry::HandleKind;
use crate::input::{PointerEvent, PointerKind};
use crate::mode::{self, EditMode, Effect, ModeEvent};
use crate::recorder::StrokeRecorder;
use crate::stroke::{DrawingTool, Stroke};

/// What the host should draw for the current mode
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Idle,
    Crop {
        rect: Rect,
        handles: Vec<(HandleKind, Pos2)>,
    },
    Drawing {
        strokes: Vec<Stroke>,
        /// The stroke still under the pointer, if any
        preview: Option<Stroke>,
    },
}

/// State behind one editing screen.
///
/// Routes pointer events to whichever engine the current mode uses and keeps
/// mode switches, engine resets and chrome effects in step.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    mode: EditMode,
    tool: DrawingTool,
    crop: CropOverlayEngine,
    recorder: StrokeRecorder,
    /// Pointer position at the previous event of the active crop drag
    last_position: Option<Pos2>,
}

impl EditorSession {
    /// Session for an image view of size `parent_bounds`
    pub fn new(parent_bounds: Vec2, config: EditorConfig) -> Self {
        Self {
            crop: CropOverlayEngine::new(parent_bounds, &config),
            config,
            mode: EditMode::None,
            tool: DrawingTool::default(),
            recorder: StrokeRecorder::new(),
            last_position: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn tool(&self) -> DrawingTool {
        self.tool
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn crop(&self) -> &CropOverlayEngine {
        &self.crop
    }

    pub(crate) fn crop_mut(&mut self) -> &mut CropOverlayEngine {
        &mut self.crop
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    pub(crate) fn recorder_mut(&mut self) -> &mut StrokeRecorder {
        &mut self.recorder
    }

    pub fn select_tool(&mut self, tool: DrawingTool) {
        if self.tool != tool {
            log::info!("Tool changed: {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
        }
    }

    /// The image view was laid out again
    pub fn set_parent_bounds(&mut self, parent_bounds: Vec2) {
        self.last_position = None;
        self.crop.set_parent_bounds(parent_bounds);
    }

    /// Shorthand for [`Command::execute`]
    pub fn execute(&mut self, command: Command, host: &dyn ImageHost) -> EditResult<CommandOutput> {
        command.execute(self, host)
    }

    /// Run the mode state machine and apply its engine-side effects.
    ///
    /// Returns the effects for the host's chrome.
    pub fn apply_mode_event(&mut self, event: ModeEvent) -> Vec<Effect> {
        let transition = mode::transition(self.mode, event);

        for effect in &transition.effects {
            match effect {
                Effect::ResetCropOverlay => self.crop.reset(),
                Effect::ClearStrokes => self.recorder.clear(),
                _ => {}
            }
        }

        if transition.mode != self.mode {
            log::info!("Edit mode: {:?} -> {:?}", self.mode, transition.mode);
            if transition.mode == EditMode::Crop {
                self.crop.reset();
            }
            self.last_position = None;
        }
        self.mode = transition.mode;

        transition.effects
    }

    /// Feed one pointer event to the active engine and return what to draw.
    ///
    /// Outside the crop and drawing modes pointer events are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditResult<RenderState> {
        match self.mode {
            EditMode::Crop => self.handle_crop_pointer(event)?,
            EditMode::Drawing => self.handle_drawing_pointer(event)?,
            mode => log::trace!("Ignoring {:?} in {:?} mode", event.kind, mode),
        }
        Ok(self.render_state())
    }

    fn handle_crop_pointer(&mut self, event: PointerEvent) -> EditResult<()> {
        let position = event.position;
        match event.kind {
            PointerKind::Down => {
                let target = event
                    .target
                    .or_else(|| self.crop.hit_test(position, self.config.handle_radius));
                match target {
                    Some(handle) => {
                        self.crop.begin_drag(handle, position)?;
                        self.last_position = Some(position);
                    }
                    None => log::debug!("Press at {:?} missed the crop overlay", position),
                }
            }
            PointerKind::Move => {
                if let (Some(handle), Some(last)) = (self.crop.active_handle(), self.last_position) {
                    // The delta is consumed even when the engine rejects it
                    self.crop.update_drag(handle, position - last);
                    self.last_position = Some(position);
                }
            }
            PointerKind::Up => {
                self.crop.end_drag();
                self.last_position = None;
            }
            PointerKind::Cancel => {
                self.crop.cancel_drag();
                self.last_position = None;
            }
        }
        Ok(())
    }

    fn handle_drawing_pointer(&mut self, event: PointerEvent) -> EditResult<()> {
        let position = event.position;
        match event.kind {
            PointerKind::Down => {
                let brush = self.config.brush(self.tool);
                self.recorder
                    .begin_stroke(position, self.tool, brush.color, brush.width)?;
            }
            // Hover moves and stray releases arrive with no stroke in progress
            PointerKind::Move if self.recorder.is_drawing() => {
                self.recorder.extend_stroke(position)?;
            }
            PointerKind::Up if self.recorder.is_drawing() => {
                self.recorder.end_stroke()?;
            }
            PointerKind::Move | PointerKind::Up => {}
            PointerKind::Cancel => self.recorder.cancel_stroke(),
        }
        Ok(())
    }

    pub fn render_state(&self) -> RenderState {
        match self.mode {
            EditMode::Crop => RenderState::Crop {
                rect: self.crop.rect(),
                handles: self.crop.handle_positions(),
            },
            EditMode::Drawing => RenderState::Drawing {
                strokes: self.recorder.strokes().to_vec(),
                preview: self.recorder.current().map(|stroke| stroke.to_stroke()),
            },
            _ => RenderState::Idle,
        }
    }
}

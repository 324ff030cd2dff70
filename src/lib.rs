#![warn(clippy::all, rust_2018_idioms)]

//! Editing core for a single-photo edit screen: an interactive crop overlay,
//! freehand pen/eraser strokes flattened onto the photo, and the mode state
//! machine tying them to the host's chrome. Rendering and layout stay with
//! the host.

pub mod command;
pub mod config;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod raster;
pub mod recorder;
pub mod session;
pub mod stroke;

pub use command::{Artifact, Command, CommandOutput, ImageHost, StaticHost};
pub use config::{BrushSettings, ConfigError, EditorConfig, OverlayPlacement};
pub use crop::CropOverlayEngine;
pub use error::{EditError, EditResult};
pub use geometry::HandleKind;
pub use input::{PointerEvent, PointerKind};
pub use mode::{EditMode, Effect, ModeEvent};
pub use raster::{DrawSurface, Filter, RasterSurface};
pub use recorder::StrokeRecorder;
pub use session::{EditorSession, RenderState};
pub use stroke::{DrawingTool, MutableStroke, Paint, Stroke};

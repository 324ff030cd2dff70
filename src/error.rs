use thiserror::Error;

use crate::mode::EditMode;

/// Errors reported back to the host by the editing engines.
///
/// None of these are fatal: an operation that fails leaves the engine exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// A display frame or crop rectangle with no usable area
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Extend or end was called while no stroke is being drawn
    #[error("No stroke is in progress")]
    NoActiveStroke,

    /// A second gesture was started while one is still active
    #[error("A gesture is already in progress")]
    ConcurrentDragRejected,

    /// A commit command arrived while the editor is in another mode
    #[error("Command requires {expected:?} mode, but the editor is in {actual:?} mode")]
    ModeMismatch { expected: EditMode, actual: EditMode },

    /// The pixel crop rectangle lies entirely outside the image
    #[error("Crop rectangle {0:?} does not intersect the image")]
    EmptyCrop(egui::Rect),
}

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;

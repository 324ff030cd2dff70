use serde::{Deserialize, Serialize};

/// Which editing tool set the screen is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    None,
    Drawing,
    Filter,
    Crop,
    Brightness,
}

impl EditMode {
    /// Navigation title shown while the mode is active
    pub fn title(&self) -> &'static str {
        match self {
            EditMode::None => "Edit",
            EditMode::Drawing => "Drawing",
            EditMode::Filter => "Filter",
            EditMode::Crop => "Crop",
            EditMode::Brightness => "Brightness",
        }
    }

    fn panel(&self) -> Option<Panel> {
        match self {
            EditMode::None => None,
            EditMode::Drawing => Some(Panel::Drawing),
            EditMode::Filter => Some(Panel::Filter),
            EditMode::Crop => Some(Panel::Crop),
            EditMode::Brightness => Some(Panel::Brightness),
        }
    }
}

/// Per-mode tool panels the host shows and hides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Drawing,
    Filter,
    Crop,
    Brightness,
}

/// Inputs to the mode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    Enter(EditMode),
    Exit,
    /// The active mode's edit was applied; chrome is refreshed in place
    Committed,
}

/// Instructions for the host's chrome, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hide every panel, the toolbar, the done button and the crop overlay
    HideAll,
    ShowPanel(Panel),
    SetToolbarVisible(bool),
    SetDoneVisible(bool),
    SetCropOverlayVisible(bool),
    SetTitle(&'static str),
    ResetCropOverlay,
    ClearStrokes,
}

/// Result of a mode transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub mode: EditMode,
    pub effects: Vec<Effect>,
}

/// Compute the next mode and the chrome changes it requires. Pure.
pub fn transition(mode: EditMode, event: ModeEvent) -> Transition {
    let next = match event {
        ModeEvent::Enter(next) => next,
        ModeEvent::Exit => EditMode::None,
        ModeEvent::Committed => mode,
    };

    let mut effects = Vec::new();

    // Transient engine state belongs to the mode being left
    if next != mode {
        match mode {
            EditMode::Crop => effects.push(Effect::ResetCropOverlay),
            EditMode::Drawing => effects.push(Effect::ClearStrokes),
            _ => {}
        }
    }

    effects.push(Effect::HideAll);
    if let Some(panel) = next.panel() {
        effects.push(Effect::ShowPanel(panel));
    }
    match next {
        EditMode::None | EditMode::Filter | EditMode::Brightness => {
            effects.push(Effect::SetToolbarVisible(true));
        }
        EditMode::Crop => {
            effects.push(Effect::SetCropOverlayVisible(true));
            effects.push(Effect::SetDoneVisible(true));
        }
        EditMode::Drawing => {}
    }
    effects.push(Effect::SetTitle(next.title()));

    Transition {
        mode: next,
        effects,
    }
}

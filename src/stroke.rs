use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Freehand drawing tools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingTool {
    #[default]
    Pen,
    Eraser,
}

impl DrawingTool {
    pub fn name(&self) -> &'static str {
        match self {
            DrawingTool::Pen => "Pen",
            DrawingTool::Eraser => "Eraser",
        }
    }
}

/// How a stroke is laid down on its layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    /// Blend the colour over whatever is already there
    Color(Color32),
    /// Wipe covered pixels back to fully transparent
    Clear,
}

impl Paint {
    /// Paint used for a stroke drawn with `tool`. Eraser strokes never carry a colour.
    pub fn for_tool(tool: DrawingTool, color: Color32) -> Self {
        match tool {
            DrawingTool::Pen => Paint::Color(color),
            DrawingTool::Eraser => Paint::Clear,
        }
    }
}

// Immutable stroke, committed once its gesture ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: Uuid,
    points: Vec<Pos2>,
    paint: Paint,
    width: f32,
    tool: DrawingTool,
}

// Mutable stroke for the gesture in progress
#[derive(Debug, Clone)]
pub struct MutableStroke {
    // Assigned when the gesture starts and kept once committed
    id: Uuid,
    points: Vec<Pos2>,
    paint: Paint,
    width: f32,
    tool: DrawingTool,
}

impl Stroke {
    /// Stable identifier hosts can diff render lists with. A preview of the
    /// gesture in progress carries the same id as the stroke it becomes.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn tool(&self) -> DrawingTool {
        self.tool
    }

    /// Area touched by the stroke, including half its width on every side
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::NOTHING;
        }
        Rect::from_points(&self.points).expand(self.width / 2.0)
    }
}

impl MutableStroke {
    /// Start a stroke at `start`
    pub fn new(start: Pos2, tool: DrawingTool, color: Color32, width: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            paint: Paint::for_tool(tool, color),
            width,
            tool,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    // Freeze into a committed stroke
    pub fn into_stroke(self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points,
            paint: self.paint,
            width: self.width,
            tool: self.tool,
        }
    }

    // Snapshot for previewing the gesture in progress
    pub fn to_stroke(&self) -> Stroke {
        self.clone().into_stroke()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn tool(&self) -> DrawingTool {
        self.tool
    }
}

//! A surface that records draw calls instead of rasterizing them.

use serde::Serialize;

use crate::render::surface::{Color, DrawSurface, Font};

/// One call made against a [`DrawSurface`], in call order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64),
    SetStroke(Color),
    SetFill(Color),
    SetLineWidth(f64),
    SetFont(Font),
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { cx: f64, cy: f64, radius: f64 },
    Text { text: String, x: f64, y: f64 },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    available: bool,
    depth: usize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            available: true,
            depth: 0,
            commands: Vec::new(),
        }
    }

    /// A surface with no drawing context attached.
    pub fn unavailable(width: f64, height: f64) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Text primitives drawn so far.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn is_available(&self) -> bool {
        self.available
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // Unbalanced restores are ignored, like a canvas context.
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn scale(&mut self, factor: f64) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStroke(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: Font) {
        self.commands.push(DrawCommand::SetFont(font));
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rect { x, y, width, height });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle { cx, cy, radius });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

// Current tool selection, owned by the host and turned into a Brush at
// gesture start.

use freehand::{Brush, Rgba};

use super::config::HostConfig;
use super::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
    Fill,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "PEN",
            Tool::Eraser => "ERASER",
            Tool::Fill => "FILL",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToolState {
    pub tool: Tool,
    pub palette: Vec<Rgba>,
    pub color: Rgba,
    pub width: f32,
    min_width: f32,
    max_width: f32,
    step: f32,
    eraser_scale: f32,
}

impl ToolState {
    pub fn from_config(cfg: &HostConfig) -> Result<Self, Error> {
        let palette = cfg.palette_colors()?;
        let color = palette.first().copied().unwrap_or(Rgba::BLACK);
        Ok(Self {
            tool: Tool::Pen,
            palette,
            color,
            width: cfg.stroke_width.max(cfg.min_stroke_width).min(cfg.max_stroke_width),
            min_width: cfg.min_stroke_width,
            max_width: cfg.max_stroke_width,
            step: cfg.width_step,
            eraser_scale: cfg.eraser_scale,
        })
    }

    /// Choosing a color switches back to the pen.
    pub fn pick(&mut self, slot: usize) -> bool {
        match self.palette.get(slot) {
            Some(&c) => {
                self.color = c;
                self.tool = Tool::Pen;
                true
            }
            None => false,
        }
    }

    pub fn wider(&mut self) {
        self.width = (self.width + self.step).min(self.max_width);
    }

    pub fn thinner(&mut self) {
        self.width = (self.width - self.step).max(self.min_width);
    }

    /// Brush for a new stroke. None for the fill tool, which never strokes.
    pub fn brush(&self) -> Option<Brush> {
        match self.tool {
            Tool::Pen => Some(Brush::pen(self.color, self.width)),
            Tool::Eraser => Some(Brush::eraser(self.width * self.eraser_scale)),
            Tool::Fill => None,
        }
    }

    /// Radius of the on-screen brush outline.
    pub fn cursor_radius(&self) -> f32 {
        match self.brush() {
            Some(b) => b.width / 2.0,
            None => 1.0,
        }
    }
}

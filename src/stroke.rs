// Gesture recording: pointer-down starts a path, moves extend it,
// pointer-up hands back an immutable Stroke.

use crate::error::{CanvasError, Result};
use crate::types::{Brush, Point, Rgba, StrokeMode};

/// A finished (or in-progress, for preview) gesture.
/// Always holds at least one point; a single point renders as a round dot.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    brush: Brush,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn color(&self) -> Rgba {
        self.brush.color
    }

    pub fn width(&self) -> f32 {
        self.brush.width
    }

    pub fn mode(&self) -> StrokeMode {
        self.brush.mode
    }
}

fn validate_brush(brush: &Brush) -> Result<()> {
    if !(brush.width.is_finite() && brush.width > 0.0) {
        return Err(CanvasError::InvalidWidth(brush.width));
    }
    Ok(())
}

/// Holds at most one stroke under construction.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    active: Option<Stroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Start a path at `point` with the tool state supplied by the host.
    pub fn begin(&mut self, point: Point, brush: Brush) -> Result<()> {
        if self.active.is_some() {
            return Err(CanvasError::AlreadyRecording);
        }
        validate_brush(&brush)?;
        if !point.is_finite() {
            return Err(CanvasError::NonFinitePoint);
        }
        self.active = Some(Stroke { points: vec![point], brush });
        Ok(())
    }

    /// Append a segment from the last point to `point`.
    pub fn extend(&mut self, point: Point) -> Result<()> {
        let stroke = self.active.as_mut().ok_or(CanvasError::NotRecording)?;
        if !point.is_finite() {
            return Err(CanvasError::NonFinitePoint);
        }
        stroke.points.push(point);
        Ok(())
    }

    /// Close the path and return it; the recorder goes back to idle.
    pub fn finish(&mut self) -> Result<Stroke> {
        self.active.take().ok_or(CanvasError::NotRecording)
    }

    /// Drop whatever is in progress (resize/clear).
    pub fn cancel(&mut self) -> Option<Stroke> {
        self.active.take()
    }

    pub fn pending(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }
}

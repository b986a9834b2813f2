// The canvas core as the host sees it: one owned buffer, one recorder,
// one history. The buffer is a cache of the history; `replay()` must always
// reproduce it.

use image::RgbImage;
use log::debug;

use crate::compose;
use crate::error::{CanvasError, Result};
use crate::fill::flood_fill;
use crate::history::{Edit, HistoryStack};
use crate::pixel_buffer::{DEFAULT_MAX_DIMENSION, PixelBuffer};
use crate::stroke::{Stroke, StrokeRecorder};
use crate::types::{Brush, Point, Rgba};

/// Gesture phase. Fills are single-shot and never observable as a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recording,
}

#[derive(Debug)]
pub struct Canvas {
    buffer: PixelBuffer,
    recorder: StrokeRecorder,
    history: HistoryStack,
    max_dimension: u32,
}

impl Canvas {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Self::with_max_dimension(width, height, DEFAULT_MAX_DIMENSION)
    }

    /// Like `new`, but with a custom cap on width and height.
    pub fn with_max_dimension(width: i64, height: i64, max_dimension: u32) -> Result<Self> {
        let buffer = PixelBuffer::with_limit(width, height, max_dimension)?;
        debug!("canvas created at {width}x{height}");
        Ok(Self {
            buffer,
            recorder: StrokeRecorder::new(),
            history: HistoryStack::new(),
            max_dimension,
        })
    }

    /// Start over at a new size: white buffer, empty history, no gesture.
    /// Invalid sizes leave the canvas untouched.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<()> {
        self.buffer.resize(width, height, self.max_dimension)?;
        self.recorder.cancel();
        self.history.clear();
        debug!("canvas resized to {width}x{height}");
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    pub fn phase(&self) -> Phase {
        if self.recorder.is_recording() {
            Phase::Recording
        } else {
            Phase::Idle
        }
    }

    pub fn begin_stroke(&mut self, point: Point, brush: Brush) -> Result<()> {
        self.recorder.begin(point, brush)
    }

    pub fn extend_stroke(&mut self, point: Point) -> Result<()> {
        self.recorder.extend(point)
    }

    /// Finish the gesture, draw it into the buffer and commit it.
    pub fn end_stroke(&mut self) -> Result<()> {
        let stroke = self.recorder.finish()?;
        compose::apply_stroke(&mut self.buffer, &stroke);
        debug!(
            "committed {:?} stroke: {} points, width {}",
            stroke.mode(),
            stroke.points().len(),
            stroke.width()
        );
        self.history.commit(Edit::Stroke(stroke));
        Ok(())
    }

    /// Paint-bucket fill at `point`. Returns how many pixels changed; zero
    /// means the seed already had `color` and nothing was recorded.
    pub fn fill(&mut self, point: Point, color: Rgba) -> Result<usize> {
        if self.recorder.is_recording() {
            return Err(CanvasError::AlreadyRecording);
        }
        match flood_fill(&mut self.buffer, point, color)? {
            Some(patch) => {
                let touched = patch.len();
                debug!("committed fill of {touched} pixels with {color}");
                self.history.commit(Edit::Fill(patch));
                Ok(touched)
            }
            None => Ok(0),
        }
    }

    /// Cover the whole canvas with `color`, blended source-over like a pen
    /// stroke of full coverage. Undoable like any other edit.
    pub fn paint(&mut self, color: Rgba) -> Result<()> {
        if self.recorder.is_recording() {
            return Err(CanvasError::AlreadyRecording);
        }
        let edit = Edit::Paint(color);
        compose::apply_edit(&mut self.buffer, &edit);
        debug!("committed whole-canvas paint with {color}");
        self.history.commit(edit);
        Ok(())
    }

    /// Step back one edit. Rebuilds the buffer from white by replaying what is
    /// left of the draw log. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.rebuild();
        debug!(
            "undo: {} edits left, {} redoable",
            self.history.undo_len(),
            self.history.redo_len()
        );
        true
    }

    /// Re-apply the last undone edit. Drawing it on top of the current buffer
    /// gives the same pixels as a full replay.
    pub fn redo(&mut self) -> bool {
        let Some(edit) = self.history.redo() else {
            return false;
        };
        compose::apply_edit(&mut self.buffer, edit);
        debug!(
            "redo: {} edits, {} redoable",
            self.history.undo_len(),
            self.history.redo_len()
        );
        true
    }

    /// Drop all history (and any gesture) and whiten the buffer.
    pub fn clear(&mut self) {
        self.recorder.cancel();
        self.history.clear();
        self.buffer.fill_all(Rgba::WHITE);
        debug!("canvas cleared");
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn pending_stroke(&self) -> Option<&Stroke> {
        self.recorder.pending()
    }

    pub fn pixel(&self, x: i64, y: i64) -> Result<Rgba> {
        self.buffer.get(x, y)
    }

    /// The committed pixels.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// What the host should display: committed pixels plus the live stroke.
    pub fn frame(&self) -> PixelBuffer {
        compose::render(&self.buffer, &[], self.recorder.pending())
    }

    /// Alpha-flattened copy of the committed drawing, for saving/export.
    pub fn snapshot(&self) -> RgbImage {
        self.buffer.flatten()
    }

    /// Rebuild from an all-white buffer through the draw log.
    pub fn replay(&self) -> PixelBuffer {
        let mut white = self.buffer.clone();
        white.fill_all(Rgba::WHITE);
        compose::render(&white, self.history.entries(), None)
    }

    fn rebuild(&mut self) {
        self.buffer.fill_all(Rgba::WHITE);
        for edit in self.history.entries() {
            compose::apply_edit(&mut self.buffer, edit);
        }
    }
}

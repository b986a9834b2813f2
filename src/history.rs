// Undo/redo bookkeeping. The undo sequence *is* the draw log: replaying it
// from white rebuilds the committed buffer. Entries move between the two
// sequences, they are never copied.

use crate::fill::FillPatch;
use crate::stroke::Stroke;
use crate::types::Rgba;

/// One undoable unit of drawing.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    /// A finished pen or eraser gesture.
    Stroke(Stroke),
    /// A paint-bucket fill, stored as the pixels it replaced.
    Fill(FillPatch),
    /// Whole-canvas fill with one color.
    Paint(Rgba),
}

#[derive(Debug, Default)]
pub struct HistoryStack {
    undo: Vec<Edit>, // most recent last
    redo: Vec<Edit>, // most recent last
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new edit. Anything that was undone is gone for good.
    pub fn commit(&mut self, edit: Edit) {
        if !self.redo.is_empty() {
            log::debug!("commit discards {} redo entries", self.redo.len());
        }
        self.redo.clear();
        self.undo.push(edit);
    }

    /// Move the latest edit onto the redo sequence and return it.
    /// `None` means there was nothing to undo.
    pub fn undo(&mut self) -> Option<&Edit> {
        let edit = self.undo.pop()?;
        self.redo.push(edit);
        self.redo.last()
    }

    /// Move the latest undone edit back onto the draw log and return it.
    pub fn redo(&mut self) -> Option<&Edit> {
        let edit = self.redo.pop()?;
        self.undo.push(edit);
        self.undo.last()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Committed edits in draw order.
    pub fn entries(&self) -> &[Edit] {
        &self.undo
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

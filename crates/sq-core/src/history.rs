//! Stroke store with undo/redo.
//!
//! The committed stroke list doubles as the undo stack: undo moves the
//! newest stroke onto the redo stack, redo moves it back. Committing a
//! new stroke clears the redo stack.

use crate::model::{Document, PageStyle, Point, Stroke, Tool};

/// Whether undo/redo controls should be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Undo/redo requests from outside the pointer-event flow
/// (toolbar buttons, keyboard shortcuts).
pub trait HistoryControl {
    /// Returns `true` if a stroke was undone.
    fn undo(&mut self) -> bool;
    /// Returns `true` if a stroke was redone.
    fn redo(&mut self) -> bool;
    fn history_state(&self) -> HistoryState;
}

/// Sole owner of the open document and its redo stack.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    document: Document,
    redo_stack: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted state. Strokes count as committed history.
    pub fn from_document(document: Document) -> Self {
        let document = document.normalized();
        Self {
            document,
            redo_stack: Vec::new(),
        }
    }

    /// Commit a finished stroke.
    ///
    /// Buffers with fewer than two points (a tap) are discarded and
    /// `None` is returned; history is untouched.
    pub fn commit(
        &mut self,
        points: Vec<Point>,
        color: &str,
        size: f32,
        tool: Tool,
    ) -> Option<&Stroke> {
        if points.len() < 2 {
            log::trace!("discarding {}-point buffer", points.len());
            return None;
        }
        log::debug!(
            "commit {} stroke: {} points, size {size}",
            tool.as_str(),
            points.len()
        );
        self.document
            .strokes
            .push(Stroke::new(points, color, size, tool));
        self.redo_stack.clear();
        self.document.strokes.last()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.document.strokes
    }

    /// Strokes available to redo, oldest undo first.
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo_stack
    }

    pub fn page_count(&self) -> u32 {
        self.document.page_count
    }

    /// Raise the page count. Lower or equal values are ignored, so the
    /// count is monotonic for the life of the store.
    pub fn grow_pages(&mut self, page_count: u32) -> bool {
        if page_count > self.document.page_count {
            self.document.page_count = page_count;
            true
        } else {
            false
        }
    }

    pub fn page_style(&self) -> PageStyle {
        self.document.page_style
    }

    /// Returns `true` if the style changed. Not part of undo history.
    pub fn set_page_style(&mut self, page_style: PageStyle) -> bool {
        if self.document.page_style == page_style {
            return false;
        }
        log::debug!("page style {}", page_style.as_str());
        self.document.page_style = page_style;
        true
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn can_undo(&self) -> bool {
        !self.document.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl HistoryControl for StrokeStore {
    fn undo(&mut self) -> bool {
        match self.document.strokes.pop() {
            Some(stroke) => {
                log::debug!("undo {} stroke", stroke.tool.as_str());
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                log::debug!("redo {} stroke", stroke.tool.as_str());
                self.document.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    fn history_state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

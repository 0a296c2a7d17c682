//! Engine → UI notifications.
//!
//! The engine owns the document; the surrounding UI learns about changes
//! only through these callbacks. Every method defaults to a no-op so an
//! observer implements just what it cares about.

use sq_core::{HistoryState, PageStyle, Stroke};

pub trait EngineObserver {
    /// A committed change happened (commit, undo, redo, page growth,
    /// page style).
    /// The receiver is responsible for durable storage.
    fn on_persist(&mut self, _strokes: &[Stroke], _page_count: u32) {}

    /// Undo/redo availability after a history mutation.
    fn on_history_change(&mut self, _state: HistoryState) {}

    /// The page background changed. Sent before the matching
    /// `on_persist`.
    fn on_page_style_change(&mut self, _style: PageStyle) {}
}

/// Adapter turning a pair of closures into an observer.
pub struct CallbackObserver<P, H>
where
    P: FnMut(&[Stroke], u32),
    H: FnMut(HistoryState),
{
    persist: P,
    history: H,
}

impl<P, H> CallbackObserver<P, H>
where
    P: FnMut(&[Stroke], u32),
    H: FnMut(HistoryState),
{
    pub fn new(persist: P, history: H) -> Self {
        Self { persist, history }
    }
}

impl<P, H> EngineObserver for CallbackObserver<P, H>
where
    P: FnMut(&[Stroke], u32),
    H: FnMut(HistoryState),
{
    fn on_persist(&mut self, strokes: &[Stroke], page_count: u32) {
        (self.persist)(strokes, page_count);
    }

    fn on_history_change(&mut self, state: HistoryState) {
        (self.history)(state);
    }
}

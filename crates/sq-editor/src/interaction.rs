//! Pointer gesture state machine: `Idle → Drawing → Idle`.
//!
//! The controller only tracks the in-progress point buffer. It reports
//! what happened as a [`Gesture`]; the engine decides what to paint,
//! whether to grow pages, and what to commit.

use crate::input::{InputEvent, PointerButton};
use sq_core::{Point, ViewportOrigin, to_document_point};

/// Outcome of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Primary pointer went down; the buffer holds this first point.
    /// `abandoned` is set when an unfinished gesture was dropped to make
    /// room, so its live ink must be wiped.
    Started { point: Point, abandoned: bool },
    /// A sample was appended; paint `from → to`.
    Extended { from: Point, to: Point },
    /// The gesture ended. Carries the whole buffer, which may be too
    /// short to commit.
    Finished(Vec<Point>),
    /// Nothing to do (non-primary button, or no gesture in progress).
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Drawing,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    drawing: bool,
    buffer: Vec<Point>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        if self.drawing {
            InteractionState::Drawing
        } else {
            InteractionState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points captured so far in the current gesture.
    pub fn pending(&self) -> &[Point] {
        &self.buffer
    }

    /// Feed one event. `viewport` and `zoom` are read fresh per event.
    pub fn handle(&mut self, event: &InputEvent, viewport: ViewportOrigin, zoom: f32) -> Gesture {
        match event {
            InputEvent::PointerDown { button, .. } => {
                if *button != PointerButton::Primary {
                    log::trace!("ignoring {button:?} pointer down");
                    return Gesture::Ignored;
                }
                let Some(sample) = event.sample() else {
                    return Gesture::Ignored;
                };
                let point = to_document_point(sample, viewport, zoom);
                let abandoned = self.drawing && self.buffer.len() > 1;
                if abandoned {
                    log::debug!("abandoning {}-point gesture", self.buffer.len());
                }
                self.drawing = true;
                self.buffer.clear();
                self.buffer.push(point);
                Gesture::Started { point, abandoned }
            }
            InputEvent::PointerMove { .. } => {
                if !self.drawing {
                    return Gesture::Ignored;
                }
                let Some(sample) = event.sample() else {
                    return Gesture::Ignored;
                };
                let to = to_document_point(sample, viewport, zoom);
                let from = self.buffer.last().copied().unwrap_or(to);
                self.buffer.push(to);
                Gesture::Extended { from, to }
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                if !self.drawing {
                    return Gesture::Ignored;
                }
                self.drawing = false;
                Gesture::Finished(std::mem::take(&mut self.buffer))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORIGIN: ViewportOrigin = ViewportOrigin::ZERO;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_down(x, y, None, 0)
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_move(x, y, None)
    }

    #[test]
    fn full_gesture() {
        let mut c = InteractionController::new();
        assert_eq!(
            c.handle(&down(10.0, 10.0), ORIGIN, 1.0),
            Gesture::Started {
                point: Point::at(10.0, 10.0),
                abandoned: false
            }
        );
        assert_eq!(c.state(), InteractionState::Drawing);
        assert_eq!(
            c.handle(&mv(20.0, 20.0), ORIGIN, 1.0),
            Gesture::Extended {
                from: Point::at(10.0, 10.0),
                to: Point::at(20.0, 20.0)
            }
        );
        assert_eq!(
            c.handle(&InputEvent::from_pointer_up(20.0, 20.0), ORIGIN, 1.0),
            Gesture::Finished(vec![Point::at(10.0, 10.0), Point::at(20.0, 20.0)])
        );
        assert_eq!(c.state(), InteractionState::Idle);
        assert!(c.pending().is_empty());
    }

    #[test]
    fn secondary_and_middle_are_ignored() {
        let mut c = InteractionController::new();
        for button in [1, 2] {
            let event = InputEvent::from_pointer_down(5.0, 5.0, None, button);
            assert_eq!(c.handle(&event, ORIGIN, 1.0), Gesture::Ignored);
            assert!(!c.is_drawing());
        }
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut c = InteractionController::new();
        assert_eq!(c.handle(&mv(1.0, 1.0), ORIGIN, 1.0), Gesture::Ignored);
        assert_eq!(c.handle(&InputEvent::PointerLeave, ORIGIN, 1.0), Gesture::Ignored);
    }

    #[test]
    fn leave_finishes_like_release() {
        let mut c = InteractionController::new();
        c.handle(&down(0.0, 0.0), ORIGIN, 1.0);
        c.handle(&mv(3.0, 4.0), ORIGIN, 1.0);
        assert!(matches!(
            c.handle(&InputEvent::PointerLeave, ORIGIN, 1.0),
            Gesture::Finished(points) if points.len() == 2
        ));
    }

    #[test]
    fn second_down_restarts_buffer() {
        let mut c = InteractionController::new();
        c.handle(&down(0.0, 0.0), ORIGIN, 1.0);
        c.handle(&mv(3.0, 4.0), ORIGIN, 1.0);
        assert_eq!(
            c.handle(&down(50.0, 50.0), ORIGIN, 1.0),
            Gesture::Started {
                point: Point::at(50.0, 50.0),
                abandoned: true
            }
        );
        assert_eq!(c.pending(), &[Point::at(50.0, 50.0)]);
        // A lone first point painted nothing, so nothing needs wiping.
        assert!(matches!(
            c.handle(&down(60.0, 60.0), ORIGIN, 1.0),
            Gesture::Started { abandoned: false, .. }
        ));
    }

    #[test]
    fn zoom_read_per_sample() {
        let mut c = InteractionController::new();
        let origin = ViewportOrigin::new(100.0, 0.0);
        c.handle(&down(120.0, 40.0), origin, 2.0);
        c.handle(&mv(120.0, 40.0), origin, 1.0);
        assert_eq!(c.pending(), &[Point::at(10.0, 20.0), Point::at(20.0, 40.0)]);
    }
}

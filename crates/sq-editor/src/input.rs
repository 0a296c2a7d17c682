//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus pointer events into a unified
//! `InputEvent` consumed by the interaction controller. Coordinates are
//! screen (client) space; conversion to document space happens later,
//! against the viewport origin and zoom current at that moment.

use sq_core::PointerSample;

/// Which button a pointer-down reports (DOM `PointerEvent.button`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button, touch contact, pen tip.
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl PointerButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            n => PointerButton::Other(n),
        }
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown {
        x: f32,
        y: f32,
        /// 0.0 ..= 1.0, `None` when the device reports none.
        pressure: Option<f32>,
        button: PointerButton,
    },

    PointerMove {
        x: f32,
        y: f32,
        pressure: Option<f32>,
    },

    PointerUp { x: f32, y: f32 },

    /// Pointer left the surface mid-gesture; ends it like a release.
    PointerLeave,
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32, pressure: Option<f32>, button: i16) -> Self {
        Self::PointerDown {
            x,
            y,
            pressure,
            button: PointerButton::from_dom(button),
        }
    }

    pub fn from_pointer_move(x: f32, y: f32, pressure: Option<f32>) -> Self {
        Self::PointerMove { x, y, pressure }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    /// The positional sample carried by down/move events.
    pub fn sample(&self) -> Option<PointerSample> {
        match *self {
            Self::PointerDown { x, y, pressure, .. } | Self::PointerMove { x, y, pressure } => {
                Some(PointerSample::new(x, y, pressure))
            }
            Self::PointerUp { .. } | Self::PointerLeave => None,
        }
    }
}

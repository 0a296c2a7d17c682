//! Screen ↔ document coordinate mapping.
//!
//! The page stack is visually scaled by the zoom factor, so a pointer's
//! screen position is divided by zoom after removing the viewport origin.
//! Stored geometry is therefore zoom- and DPI-independent; only the paint
//! surface is rescaled when either changes.

use crate::model::{DEFAULT_PRESSURE, Point};

/// Top-left corner of the drawing surface on screen (its bounding rect).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportOrigin {
    pub left: f32,
    pub top: f32,
}

impl ViewportOrigin {
    pub const ZERO: ViewportOrigin = ViewportOrigin { left: 0.0, top: 0.0 };

    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// A raw pointer sample in screen (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    /// `None` when the device reports no pressure.
    pub pressure: Option<f32>,
}

impl PointerSample {
    pub const fn new(client_x: f32, client_y: f32, pressure: Option<f32>) -> Self {
        Self {
            client_x,
            client_y,
            pressure,
        }
    }
}

/// Map a screen-space sample into document space.
///
/// `zoom` must be positive.
pub fn to_document_point(sample: PointerSample, viewport: ViewportOrigin, zoom: f32) -> Point {
    Point {
        x: (sample.client_x - viewport.left) / zoom,
        y: (sample.client_y - viewport.top) / zoom,
        pressure: sample.pressure.unwrap_or(DEFAULT_PRESSURE),
    }
}

/// Size and scale of the backing pixel buffer for a document view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub doc_width: f32,
    pub doc_height: f32,
    pub zoom: f32,
    pub device_pixel_ratio: f32,
}

impl SurfaceGeometry {
    pub fn new(doc_width: f32, doc_height: f32, zoom: f32, device_pixel_ratio: f32) -> Self {
        Self {
            doc_width,
            doc_height,
            zoom,
            device_pixel_ratio: if device_pixel_ratio > 0.0 {
                device_pixel_ratio
            } else {
                1.0
            },
        }
    }

    /// Device pixels per document unit.
    pub fn scale(&self) -> f32 {
        self.zoom * self.device_pixel_ratio
    }

    pub fn pixel_width(&self) -> u32 {
        (self.doc_width * self.scale()).ceil().max(1.0) as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.doc_height * self.scale()).ceil().max(1.0) as u32
    }
}

//! Paint surface abstraction.
//!
//! The renderer builds stroke geometry as kurbo paths in document space
//! and hands them to a `Surface`, which owns the pixel buffer and the
//! document → device transform. Implementations: the tiny-skia raster
//! surface in this crate and the Canvas2D surface in `sq-wasm`.

use kurbo::{Affine, BezPath};
use sq_core::{Rgba, SurfaceGeometry};

/// Pixel blend rule for a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeMode {
    /// Normal paint-over.
    SourceOver,
    /// Darkens what is beneath (highlighter).
    Multiply,
    /// Removes alpha beneath regardless of color (eraser).
    DestinationOut,
}

impl CompositeMode {
    /// Canvas2D `globalCompositeOperation` name.
    pub fn css_name(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::Multiply => "multiply",
            CompositeMode::DestinationOut => "destination-out",
        }
    }
}

/// Resolved paint for one path. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    pub composite: CompositeMode,
}

pub trait Surface {
    /// Reallocate the backing store for new geometry. Contents are lost.
    fn resize(&mut self, geometry: &SurfaceGeometry);

    /// Clear every pixel to transparent.
    fn clear(&mut self);

    /// Stroke a document-space path.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);
}

/// Document → device transform for a surface geometry.
pub fn paint_transform(geometry: &SurfaceGeometry) -> Affine {
    Affine::scale(geometry.scale() as f64)
}

//! Stroke renderer.
//!
//! Two paint paths share the rules in [`crate::style`]:
//! - `redraw` clears the surface and repaints every committed stroke in
//!   z-order. It is a pure function of the stroke list and geometry, so
//!   repeating it yields identical pixels.
//! - `paint_live_segment` paints one segment on top of whatever is there,
//!   for feedback while a stroke is still being drawn.
//!
//! With no surface mounted every paint call is a no-op.

use crate::style::stroke_style;
use crate::surface::{StrokeStyle, Surface};
use kurbo::BezPath;
use sq_core::{Point, Stroke, SurfaceGeometry, Tool};

/// The in-progress stroke, repainted after a mid-gesture redraw.
#[derive(Debug, Clone, Copy)]
pub struct PendingStroke<'a> {
    pub points: &'a [Point],
    pub tool: Tool,
    pub color: &'a str,
    pub size: f32,
}

pub struct Renderer<S: Surface> {
    surface: Option<S>,
    geometry: SurfaceGeometry,
}

impl<S: Surface> Renderer<S> {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            surface: None,
            geometry,
        }
    }

    /// Attach a surface and size it to the current geometry. The caller
    /// follows up with a redraw.
    pub fn mount(&mut self, mut surface: S) {
        surface.resize(&self.geometry);
        self.surface = Some(surface);
    }

    pub fn unmount(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Apply new geometry, resizing the surface if it changed.
    /// Returns `true` when a redraw is needed.
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) -> bool {
        if geometry == self.geometry {
            return false;
        }
        log::debug!(
            "surface {}x{} px (zoom {}, dpr {})",
            geometry.pixel_width(),
            geometry.pixel_height(),
            geometry.zoom,
            geometry.device_pixel_ratio
        );
        self.geometry = geometry;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&self.geometry);
        }
        true
    }

    /// Full repaint of the committed strokes.
    pub fn redraw(&mut self, strokes: &[Stroke]) {
        self.redraw_with_pending(strokes, None);
    }

    /// Full repaint, then the in-progress stroke (if any) with the live rule.
    pub fn redraw_with_pending(&mut self, strokes: &[Stroke], pending: Option<PendingStroke<'_>>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        for stroke in strokes {
            for (path, style) in stroke_paths(stroke) {
                surface.stroke_path(&path, &style);
            }
        }
        if let Some(pending) = pending {
            for pair in pending.points.windows(2) {
                let style = stroke_style(pending.tool, pending.color, pending.size, pair[1].pressure);
                surface.stroke_path(&segment(pair[0], pair[1]), &style);
            }
        }
        log::trace!("redrew {} strokes", strokes.len());
    }

    /// Clear, then stroke a precomputed layer (e.g. the page background).
    pub fn redraw_layer(&mut self, layer: &[(BezPath, StrokeStyle)]) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        for (path, style) in layer {
            surface.stroke_path(path, style);
        }
    }

    /// Paint one live segment for immediate feedback.
    pub fn paint_live_segment(
        &mut self,
        from: Point,
        to: Point,
        tool: Tool,
        color: &str,
        size: f32,
        pressure: f32,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let style = stroke_style(tool, color, size, pressure);
        surface.stroke_path(&segment(from, to), &style);
    }
}

fn segment(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((from.x as f64, from.y as f64));
    path.line_to((to.x as f64, to.y as f64));
    path
}

/// Split a committed stroke into paths of uniform style.
///
/// Each segment takes its width from the pressure of its end point, the
/// same rule the live path uses. Consecutive segments with equal width
/// share one path so joins stay seamless; a stroke drawn at constant
/// pressure becomes a single path.
pub fn stroke_paths(stroke: &Stroke) -> Vec<(BezPath, StrokeStyle)> {
    let mut out: Vec<(BezPath, StrokeStyle)> = Vec::new();
    for pair in stroke.points.windows(2) {
        let style = stroke_style(stroke.tool, &stroke.color, stroke.size, pair[1].pressure);
        if let Some((path, current)) = out.last_mut() {
            if *current == style {
                path.line_to((pair[1].x as f64, pair[1].y as f64));
                continue;
            }
        }
        out.push((segment(pair[0], pair[1]), style));
    }
    out
}

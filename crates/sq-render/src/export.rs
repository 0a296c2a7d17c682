//! Offscreen image export.
//!
//! Renders the committed ink onto a white raster cropped to the strokes'
//! bounding box (plus padding, never extending above or left of the
//! document origin). Erasers are skipped: their effect only makes sense
//! over the live page, and a white background already reads as erased.

use crate::error::RenderError;
use crate::raster::RasterSurface;
use crate::renderer::stroke_paths;
use crate::surface::Surface;
use base64::Engine;
use kurbo::Rect;
use sq_core::{Rgba, Stroke, SurfaceGeometry, Tool};

/// Crop rectangle for a set of strokes, or `None` if there is no ink.
pub fn crop_rect(strokes: &[Stroke], padding: f32) -> Option<Rect> {
    let b = strokes.iter().filter_map(Stroke::bounds).reduce(|a, b| a.union(b))?;
    let padded = Rect::new(
        b.min_x as f64,
        b.min_y as f64,
        b.max_x as f64,
        b.max_y as f64,
    )
    .inflate(padding as f64, padding as f64);
    let crop = Rect::new(padded.x0.max(0.0), padded.y0.max(0.0), padded.x1, padded.y1);
    (crop.width() > 0.0 && crop.height() > 0.0).then_some(crop)
}

/// Render the strokes to a cropped PNG. `Ok(None)` for an empty document.
pub fn export_png(strokes: &[Stroke], padding: f32) -> Result<Option<Vec<u8>>, RenderError> {
    let Some(crop) = crop_rect(strokes, padding) else {
        return Ok(None);
    };
    let geometry = SurfaceGeometry::new(crop.width() as f32, crop.height() as f32, 1.0, 1.0);
    let mut surface = RasterSurface::new(&geometry)?;
    surface.fill(Rgba::WHITE);
    surface.translate(-crop.x0 as f32, -crop.y0 as f32);

    for stroke in strokes.iter().filter(|s| s.tool != Tool::Eraser) {
        for (path, style) in stroke_paths(stroke) {
            surface.stroke_path(&path, &style);
        }
    }
    log::debug!(
        "exported {}x{} px image of {} strokes",
        surface.width(),
        surface.height(),
        strokes.len()
    );
    surface.encode_png().map(Some)
}

/// [`export_png`] wrapped as a `data:image/png;base64,` URL.
pub fn export_png_data_url(strokes: &[Stroke], padding: f32) -> Result<Option<String>, RenderError> {
    Ok(export_png(strokes, padding)?.map(|png| {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_core::Point;

    fn pen(points: &[(f32, f32)]) -> Stroke {
        Stroke::new(
            points.iter().map(|&(x, y)| Point::at(x, y)).collect(),
            "#000000",
            4.0,
            Tool::Pen,
        )
    }

    #[test]
    fn crop_pads_and_clamps_at_origin() {
        let crop = crop_rect(&[pen(&[(10.0, 100.0), (60.0, 140.0)])], 20.0).unwrap();
        assert_eq!((crop.x0, crop.y0, crop.x1, crop.y1), (0.0, 80.0, 80.0, 160.0));
    }

    #[test]
    fn empty_exports_nothing() {
        assert!(export_png(&[], 20.0).unwrap().is_none());
        assert!(export_png_data_url(&[], 20.0).unwrap().is_none());
    }

    #[test]
    fn data_url_is_png() {
        let url = export_png_data_url(&[pen(&[(30.0, 30.0), (80.0, 50.0)])], 20.0)
            .unwrap()
            .unwrap();
        // base64 of the PNG signature "\x89PNG\r\n\x1a\n"
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}

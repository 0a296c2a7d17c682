//! Canvas2D drawing surface.
//!
//! Implements [`Surface`] over an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. The backing store is sized in device
//! pixels; the element's CSS box in zoomed document pixels.

use kurbo::{BezPath, PathEl};
use sq_core::SurfaceGeometry;
use sq_render::{StrokeStyle, Surface, paint_transform};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    geometry: Option<SurfaceGeometry>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has unexpected type"))?;
        Ok(Self {
            canvas,
            ctx,
            geometry: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn into_canvas(self) -> HtmlCanvasElement {
        self.canvas
    }

    fn apply_transform(&self) {
        let Some(geometry) = &self.geometry else {
            return;
        };
        let [a, b, c, d, e, f] = paint_transform(geometry).as_coeffs();
        if let Err(err) = self.ctx.set_transform(a, b, c, d, e, f) {
            log::warn!("setTransform failed: {err:?}");
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, geometry: &SurfaceGeometry) {
        // Assigning width/height resets the context state, transform included.
        self.canvas.set_width(geometry.pixel_width());
        self.canvas.set_height(geometry.pixel_height());
        let style = self.canvas.style();
        let css_width = format!("{}px", geometry.doc_width * geometry.zoom);
        let css_height = format!("{}px", geometry.doc_height * geometry.zoom);
        if let Err(err) = style
            .set_property("width", &css_width)
            .and_then(|_| style.set_property("height", &css_height))
        {
            log::warn!("failed to size canvas element: {err:?}");
        }
        self.geometry = Some(*geometry);
        self.apply_transform();
        log::debug!(
            "canvas resized to {}x{} px",
            geometry.pixel_width(),
            geometry.pixel_height()
        );
    }

    fn clear(&mut self) {
        self.ctx.save();
        if let Err(err) = self.ctx.reset_transform() {
            log::warn!("resetTransform failed: {err:?}");
        }
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.restore();
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let ctx = &self.ctx;
        ctx.save();
        if let Err(err) = ctx.set_global_composite_operation(style.composite.css_name()) {
            log::warn!("globalCompositeOperation rejected: {err:?}");
        }
        ctx.set_stroke_style_str(&style.color.to_css());
        ctx.set_line_width(style.width as f64);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");

        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
        ctx.stroke();
        ctx.restore();
    }
}

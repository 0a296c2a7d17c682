//! CPU raster surface backed by a tiny-skia pixmap.
//!
//! Used for image export and anywhere a real pixel buffer is needed
//! without a browser (tests, native previews).

use crate::error::RenderError;
use crate::surface::{CompositeMode, StrokeStyle, Surface, paint_transform};
use kurbo::{BezPath, PathEl};
use sq_core::{Rgba, SurfaceGeometry};
use tiny_skia::{
    BlendMode, Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke,
    Transform,
};

pub struct RasterSurface {
    pixmap: Pixmap,
    transform: Transform,
}

impl RasterSurface {
    pub fn new(geometry: &SurfaceGeometry) -> Result<Self, RenderError> {
        let (width, height) = (geometry.pixel_width(), geometry.pixel_height());
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAlloc { width, height })?;
        Ok(Self {
            pixmap,
            transform: to_sk_transform(geometry),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.pixmap.pixel(x, y)
    }

    /// Flood the whole surface with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(to_sk_color(color));
    }

    /// Append a translation (document units) to the paint transform.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.pre_translate(dx, dy);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

impl Surface for RasterSurface {
    fn resize(&mut self, geometry: &SurfaceGeometry) {
        let (width, height) = (geometry.pixel_width(), geometry.pixel_height());
        match Pixmap::new(width, height) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                self.transform = to_sk_transform(geometry);
            }
            None => log::warn!("cannot allocate {width}x{height} raster, keeping old surface"),
        }
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let Some(sk_path) = to_sk_path(path) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(to_sk_color(style.color));
        paint.anti_alias = true;
        paint.blend_mode = match style.composite {
            CompositeMode::SourceOver => BlendMode::SourceOver,
            CompositeMode::Multiply => BlendMode::Multiply,
            CompositeMode::DestinationOut => BlendMode::DestinationOut,
        };
        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&sk_path, &paint, &stroke, self.transform, None);
    }
}

fn to_sk_transform(geometry: &SurfaceGeometry) -> Transform {
    let [a, b, c, d, e, f] = paint_transform(geometry).as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_sk_color(color: Rgba) -> Color {
    Color::from_rgba8(
        color.r,
        color.g,
        color.b,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn to_sk_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

pub mod background;
pub mod error;
pub mod export;
pub mod raster;
pub mod renderer;
pub mod style;
pub mod surface;

pub use background::page_background;
pub use error::RenderError;
pub use raster::RasterSurface;
pub use renderer::{PendingStroke, Renderer, stroke_paths};
pub use style::{stroke_style, stroke_width};
pub use surface::{CompositeMode, StrokeStyle, Surface, paint_transform};

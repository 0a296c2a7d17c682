pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod model;
pub mod pagination;

pub use color::{Rgba, color_to_alpha};
pub use config::EngineConfig;
pub use error::CoreError;
pub use geometry::{PointerSample, SurfaceGeometry, ViewportOrigin, to_document_point};
pub use history::{HistoryControl, HistoryState, StrokeStore};
pub use model::*;
pub use pagination::Pagination;

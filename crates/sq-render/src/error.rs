use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} raster")]
    SurfaceAlloc { width: u32, height: u32 },

    #[error("png encode failed: {0}")]
    Encode(String),
}

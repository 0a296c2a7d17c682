use thiserror::Error;

/// Errors from the fallible edges of the core: config and snapshot codecs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("msgpack encode failed: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode failed: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

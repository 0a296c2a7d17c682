//! Document snapshot codecs.
//!
//! JSON matches the note-memory shape the surrounding app persists
//! (`{"strokes": [...], "pageCount": n, "pageStyle": "ruled"}`); MessagePack is the compact
//! binary form. Both decode paths normalize the page count to at least 1
//! and read a missing or `null` pressure as the default.

use crate::error::CoreError;
use crate::model::Document;

pub fn to_json(document: &Document) -> Result<String, CoreError> {
    Ok(serde_json::to_string(document)?)
}

pub fn from_json(json: &str) -> Result<Document, CoreError> {
    let document: Document = serde_json::from_str(json)?;
    Ok(normalize(document))
}

/// Field names are kept (map encoding) so that older snapshots without
/// `pressure` still decode.
pub fn to_msgpack(document: &Document) -> Result<Vec<u8>, CoreError> {
    Ok(rmp_serde::to_vec_named(document)?)
}

pub fn from_msgpack(bytes: &[u8]) -> Result<Document, CoreError> {
    let document: Document = rmp_serde::from_slice(bytes)?;
    Ok(normalize(document))
}

fn normalize(document: Document) -> Document {
    document.normalized()
}

//! Frame document codec: base64 text wrapping a gzip stream wrapping JSON.

use crate::foundation::error::{BdError, BdResult};
use crate::scene::model::SceneGraph;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};

/// Decode an exported frame file body into its JSON bytes.
pub fn decode_frame_bytes(body: &[u8]) -> BdResult<Vec<u8>> {
    let text = body.trim_ascii();
    let compressed = BASE64_STANDARD
        .decode(text)
        .map_err(|e| BdError::decode(format!("base64: {e}")))?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| BdError::decode(format!("gzip: {e}")))?;
    Ok(out)
}

pub fn decode_frame_document(body: &[u8]) -> BdResult<SceneGraph> {
    let json = decode_frame_bytes(body)?;
    std::str::from_utf8(&json).map_err(|e| BdError::decode(format!("utf-8: {e}")))?;
    SceneGraph::from_json_slice(&json)
}

/// Inverse of [`decode_frame_bytes`], for producing fixtures.
pub fn encode_frame_document(json: &str) -> BdResult<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(json.as_bytes())
        .map_err(|e| BdError::io(format!("gzip: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| BdError::io(format!("gzip: {e}")))?;
    Ok(BASE64_STANDARD.encode(compressed))
}

#[cfg(test)]
#[path = "../../tests/unit/io/decode.rs"]
mod tests;

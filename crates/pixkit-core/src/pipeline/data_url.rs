//! Data URL parsing and construction.
//!
//! A data URL has the shape `data:<mime>;base64,<payload>`. Parsing is
//! deliberately forgiving: only a missing comma abandons the parse, every
//! other defect just leaves the affected field empty.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::error::{ImageError, ImageResult};

use super::file::FileHandle;

/// Base64 decoding as browsers do it: padding optional, trailing bits ignored.
const FORGIVING_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// The result of parsing a data URL: a MIME tag and raw bytes, either of
/// which may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedPayload {
    /// MIME type from the header, if the header had a `:...;` section
    pub mime: Option<String>,
    /// Decoded payload bytes, absent when the payload was empty or not base64
    pub bytes: Option<Vec<u8>>,
}

impl DecodedPayload {
    /// Wrap the bytes as a named file tagged with the recorded MIME type.
    ///
    /// Fails if either the bytes or the MIME type is absent.
    pub fn to_file(&self, name: impl Into<String>) -> ImageResult<FileHandle> {
        let bytes = self
            .bytes
            .as_ref()
            .ok_or(ImageError::MissingPayload { field: "bytes" })?;
        let mime = self
            .mime
            .as_ref()
            .ok_or(ImageError::MissingPayload { field: "mime type" })?;
        Ok(FileHandle::new(name, mime.clone(), bytes.clone()))
    }

    /// True when both fields are present.
    pub fn is_complete(&self) -> bool {
        self.mime.is_some() && self.bytes.is_some()
    }
}

/// Parse a data URL into its MIME type and decoded bytes.
///
/// Returns `None` only when the input has no comma separating header and
/// payload.
pub fn data_url_to_blob(data_url: &str) -> Option<DecodedPayload> {
    let (header, payload) = data_url.split_once(',')?;

    let mime = mime_from_header(header).map(str::to_string);
    let bytes = decode_payload(payload);

    Some(DecodedPayload { mime, bytes })
}

/// Build a base64 data URL from a MIME type and raw bytes.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Text between the first `:` and the `;` that follows it.
fn mime_from_header(header: &str) -> Option<&str> {
    let (_, rest) = header.split_once(':')?;
    let (mime, _) = rest.split_once(';')?;
    Some(mime)
}

fn decode_payload(payload: &str) -> Option<Vec<u8>> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }

    match FORGIVING_BASE64.decode(&compact) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Data URL payload is not valid base64: {}", e);
            None
        }
    }
}

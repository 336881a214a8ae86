//! Image data URIs
//!
//! Images cross every boundary of the crate as `data:<mime>;base64,<payload>`
//! strings. [`EncodedImage`] is the parsed form; [`encode`] and [`decode`]
//! convert to and from raw bytes.

use crate::{Error, Result};
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// A base64 image payload together with its declared MIME type.
///
/// The payload is validated on construction, so an `EncodedImage` always
/// decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Encode raw bytes, sniffing the MIME type from the magic number.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::with_mime(detect_image_mime(bytes), bytes)
    }

    pub fn with_mime(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Wrap an already-encoded payload after checking it is valid base64.
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let data = data.into();
        base64::engine::general_purpose::STANDARD
            .decode(&data)
            .map_err(|e| Error::MalformedEncoding(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    /// Parse a `data:<mime>;base64,<payload>` string.
    pub fn parse(data_uri: &str) -> Result<Self> {
        let rest = data_uri
            .strip_prefix(DATA_SCHEME)
            .ok_or_else(|| Error::MalformedEncoding("missing 'data:' scheme".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::MalformedEncoding("missing ',' delimiter".to_string()))?;

        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| Error::MalformedEncoding("missing ';base64' marker".to_string()))?;

        if mime_type.is_empty() {
            return Err(Error::MalformedEncoding("empty MIME type".to_string()));
        }

        Self::from_base64(mime_type, payload)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload with the `data:` header stripped.
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Validated in every constructor.
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .unwrap_or_default()
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "{}{}{},{}",
            DATA_SCHEME, self.mime_type, BASE64_MARKER, self.data
        )
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_data_uri())
    }
}

impl FromStr for EncodedImage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Encode raw image bytes as a data URI.
pub fn encode(bytes: &[u8]) -> String {
    EncodedImage::from_bytes(bytes).to_data_uri()
}

/// Split a data URI back into its MIME type and raw bytes.
pub fn decode(data_uri: &str) -> Result<(String, Vec<u8>)> {
    let image = EncodedImage::parse(data_uri)?;
    let bytes = image.to_bytes();
    Ok((image.mime_type, bytes))
}

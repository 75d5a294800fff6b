//! Data-URI codec for locally encoded images.
//!
//! Images travel through the UI as `data:<mime>;base64,<payload>` strings and
//! are decoded back into raw bytes before upload. The codec is strict: a URI
//! that cannot be decoded is an error, which the analysis pipeline treats the
//! same as a network failure.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding a data URI.
#[derive(Error, Debug)]
pub enum DataUriError {
    #[error("Not a data URI (missing 'data:' scheme)")]
    MissingScheme,

    #[error("Malformed data URI (no ',' separating header from payload)")]
    MissingPayload,

    #[error("Unsupported data URI encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Data URI payload is empty")]
    EmptyPayload,
}

/// A decoded `data:` URI: MIME type plus raw bytes.
///
/// # Examples
///
/// ```
/// use leafscan_domain::media::data_uri::DataUri;
///
/// let uri = DataUri::parse("data:image/png;base64,AAAA").unwrap();
/// assert_eq!(uri.mime(), "image/png");
/// assert_eq!(uri.bytes(), &[0, 0, 0]);
/// assert_eq!(uri.to_string(), "data:image/png;base64,AAAA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` string.
    pub fn parse(input: &str) -> Result<Self, DataUriError> {
        let rest = input
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;

        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;

        let (mime, encoding) = match header.split_once(';') {
            Some((mime, encoding)) => (mime, encoding),
            None => (header, ""),
        };
        if encoding != "base64" {
            return Err(DataUriError::UnsupportedEncoding(encoding.to_string()));
        }

        let bytes = STANDARD.decode(payload)?;
        if bytes.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        let mime = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };

        Ok(Self::new(mime, bytes))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// File extension matching the MIME type, for naming upload parts.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            _ => "bin",
        }
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_mime_and_bytes() {
        let uri = DataUri::parse("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.mime(), "image/jpeg");
        assert_eq!(uri.bytes(), b"hello");
        assert_eq!(uri.extension(), "jpg");
    }

    #[test]
    fn round_trip_preserves_bytes() {
        let original = vec![0u8, 1, 2, 3, 255, 254, 127];
        let uri = DataUri::new("image/png", original.clone());
        let encoded = uri.to_string();

        let decoded = DataUri::parse(&encoded).unwrap();
        assert_eq!(decoded.mime(), "image/png");
        assert_eq!(decoded.into_bytes(), original);
    }

    #[test]
    fn missing_scheme_is_rejected() {
        assert!(matches!(
            DataUri::parse("image/png;base64,AAAA"),
            Err(DataUriError::MissingScheme)
        ));
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(matches!(
            DataUri::parse("data:image/png;base64"),
            Err(DataUriError::MissingPayload)
        ));
    }

    #[test]
    fn non_base64_encoding_is_rejected() {
        assert!(matches!(
            DataUri::parse("data:text/plain;charset=utf-8,hello"),
            Err(DataUriError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn invalid_payload_is_rejected() {
        assert!(matches!(
            DataUri::parse("data:image/png;base64,not!!valid"),
            Err(DataUriError::InvalidBase64(_))
        ));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            DataUri::parse("data:image/png;base64,"),
            Err(DataUriError::EmptyPayload)
        ));
    }

    #[test]
    fn missing_mime_defaults_to_octet_stream() {
        let uri = DataUri::parse("data:;base64,aGk=").unwrap();
        assert_eq!(uri.mime(), "application/octet-stream");
        assert_eq!(uri.extension(), "bin");
    }
}

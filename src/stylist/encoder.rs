//! Base64 transport encoding for uploaded files.

use crate::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

/// Encodes arbitrary bytes as standard, padded base64.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Reads a file and returns its base64 payload.
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_bytes(&bytes))
}

/// Returns the payload portion of a `data:` URI, or the input unchanged.
pub fn strip_data_uri_prefix(text: &str) -> &str {
    if text.starts_with("data:") {
        if let Some((_, payload)) = text.split_once(',') {
            return payload;
        }
    }
    text
}

/// Decodes a bare base64 payload or a base64 `data:` URI.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(strip_data_uri_prefix(text).trim())?)
}

pub fn to_data_uri(media_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", media_type, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    #[test]
    fn test_round_trip_binary_fixture() {
        let encoded = encode_bytes(PNG_HEADER);
        assert_eq!(decode(&encoded).unwrap(), PNG_HEADER);
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(encode_bytes(b"hello"), "aGVsbG8=");
        assert_eq!(encode_bytes(b""), "");
    }

    #[test]
    fn test_strip_data_uri_prefix() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("data:broken"), "data:broken");
    }

    #[test]
    fn test_decode_accepts_data_uri() {
        let uri = to_data_uri("image/jpeg", &encode_bytes(b"jpeg-bytes"));
        assert_eq!(uri, "data:image/jpeg;base64,anBlZy1ieXRlcw==");
        assert_eq!(decode(&uri).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("not base64!!"), Err(crate::Error::Base64(_))));
    }

    #[tokio::test]
    async fn test_encode_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.bin");
        let bytes: Vec<u8> = (0..=255u8).collect();
        tokio::fs::write(&path, &bytes).await.unwrap();

        let encoded = encode_file(&path).await.unwrap();
        assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_encode_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_file(dir.path().join("missing.jpg")).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}

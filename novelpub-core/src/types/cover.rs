//! Cover image passed through to the encoder untouched

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cover image bytes with their MIME type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cover {
    /// Raw image bytes
    #[serde(with = "base64_serde")]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/jpeg")
    pub mime_type: String,

    /// File name used inside the EPUB
    pub file_name: String,
}

impl Cover {
    /// Create a cover from in-memory data
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Load a cover image from disk, inferring the MIME type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let mime_type = mime_for_extension(&ext).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Unsupported cover image type: .{}", ext),
            )
        })?;
        let data = std::fs::read(path)?;

        Ok(Self::new(data, mime_type, format!("cover.{}", ext)))
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.JPG");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let cover = Cover::from_path(&path).unwrap();
        assert_eq!(cover.mime_type, "image/jpeg");
        assert_eq!(cover.file_name, "cover.jpg");
        assert_eq!(cover.data, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_cover_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.bmp");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let err = Cover::from_path(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cover_json_uses_base64() {
        let cover = Cover::new(vec![1, 2, 3], "image/png", "cover.png");
        let json = serde_json::to_value(&cover).unwrap();
        assert_eq!(json["data"], "AQID");

        let back: Cover = serde_json::from_value(json).unwrap();
        assert_eq!(back, cover);
    }
}

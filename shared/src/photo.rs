use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PhotoError;
use crate::MAX_PERSISTED_PHOTO_BYTES;

pub const PHOTO_STORAGE_KEY: &str = "valentine_photo";
pub const DEFAULT_PHOTO_URL: &str = "https://lh3.googleusercontent.com/d/1BWCGJu9of_wncLJe8xCDy4DLaKxN83_f";
pub const FALLBACK_PHOTO_URL: &str = "https://images.unsplash.com/photo-1518568814500-bf0f8d125f46?q=80&w=1000&auto=format&fit=crop";

const GENERIC_MEDIA_TYPES: [&str; 2] = ["", "application/octet-stream"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoRef {
    #[default]
    Default,
    Remote(String),
    Encoded(String),
}

impl PhotoRef {
    /// What an `<img src>` should point at.
    pub fn src(&self) -> &str {
        match self {
            Self::Default => DEFAULT_PHOTO_URL,
            Self::Remote(url) | Self::Encoded(url) => url,
        }
    }

    /// Parses a value read back from storage.
    pub fn from_stored(raw: &[u8]) -> Result<Self, PhotoError> {
        let value = std::str::from_utf8(raw)
            .map_err(|e| PhotoError::InvalidStoredValue(e.to_string()))?
            .trim();

        if value.starts_with("data:image/") {
            return Ok(Self::Encoded(value.to_string()));
        }

        let url = Url::parse(value).map_err(|e| PhotoError::InvalidStoredValue(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url.to_string())),
            other => Err(PhotoError::InvalidStoredValue(format!(
                "unsupported scheme {other:?}"
            ))),
        }
    }

    /// Builds an inline data URL from a user-supplied file.
    ///
    /// The declared media type must be `image/*`. A missing or generic one is
    /// replaced by whatever the leading bytes identify.
    pub fn from_upload(media_type: &str, bytes: &[u8]) -> Result<Self, PhotoError> {
        if bytes.is_empty() {
            return Err(PhotoError::EmptyPayload);
        }

        let declared = media_type.trim().to_ascii_lowercase();
        let mime = if declared.starts_with("image/") {
            declared
        } else if GENERIC_MEDIA_TYPES.contains(&declared.as_str()) {
            image::guess_format(bytes)
                .map(|format| format.to_mime_type().to_string())
                .map_err(|_| PhotoError::UnsupportedMediaType(declared))?
        } else {
            return Err(PhotoError::UnsupportedMediaType(declared));
        };

        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self::Encoded(format!("data:{mime};base64,{encoded}")))
    }

    /// Bytes to write under [`PHOTO_STORAGE_KEY`]. The built-in default is
    /// never written.
    pub fn to_stored(&self) -> Result<Option<Vec<u8>>, PhotoError> {
        match self {
            Self::Default => Ok(None),
            Self::Remote(s) | Self::Encoded(s) => {
                if s.len() > MAX_PERSISTED_PHOTO_BYTES {
                    return Err(PhotoError::too_large(s.len()));
                }
                Ok(Some(s.as_bytes().to_vec()))
            }
        }
    }
}

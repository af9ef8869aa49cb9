use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MAX_PERSISTED_PHOTO_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    Empty,
    TooShort { chars: usize, min: usize },
    TooFewWords { words: usize, min: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty text"),
            Self::TooShort { chars, min } => write!(f, "{chars} chars, need {min}"),
            Self::TooFewWords { words, min } => write!(f, "{words} words, need {min}"),
        }
    }
}

/// Failure to obtain a usable message. Never leaves the core; each variant
/// is mapped to one fallback string.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("response carried no text")]
    EmptyResponse,

    #[error("generated text rejected: {0}")]
    Rejected(RejectReason),
}

impl MessageError {
    /// Whether the remote side answered but the answer was unusable.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoError {
    #[error("not an image media type: {0:?}")]
    UnsupportedMediaType(String),

    #[error("image payload is empty")]
    EmptyPayload,

    #[error("encoded photo is {size} bytes, storage limit is {max}")]
    TooLargeToPersist { size: usize, max: usize },

    #[error("storage write failed: {0}")]
    Storage(String),

    #[error("stored photo value is not usable: {0}")]
    InvalidStoredValue(String),
}

impl PhotoError {
    /// Text for the advisory notice, when this failure warrants one.
    #[must_use]
    pub fn user_facing_message(&self) -> Option<String> {
        match self {
            Self::TooLargeToPersist { .. } | Self::Storage(_) => Some(
                "The photo is a bit large to save permanently, but it will show for now!".into(),
            ),
            Self::UnsupportedMediaType(_) | Self::EmptyPayload | Self::InvalidStoredValue(_) => {
                None
            }
        }
    }

    pub(crate) fn too_large(size: usize) -> Self {
        Self::TooLargeToPersist {
            size,
            max: MAX_PERSISTED_PHOTO_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_get_a_notice() {
        assert!(PhotoError::Storage("quota".into())
            .user_facing_message()
            .is_some());
        assert!(PhotoError::too_large(10).user_facing_message().is_some());
    }

    #[test]
    fn silent_photo_failures_have_no_notice() {
        assert_eq!(
            PhotoError::UnsupportedMediaType("text/plain".into()).user_facing_message(),
            None
        );
        assert_eq!(PhotoError::EmptyPayload.user_facing_message(), None);
    }

    #[test]
    fn only_rejections_count_as_validation() {
        assert!(MessageError::Rejected(RejectReason::Empty).is_validation());
        assert!(!MessageError::Status(503).is_validation());
        assert!(!MessageError::Transport("offline".into()).is_validation());
    }
}

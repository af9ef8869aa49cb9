//! The celebration note: a pick from a fixed list, or one sentence from a
//! text-generation service with a fixed fallback.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::error::{MessageError, RejectReason};

pub const LOVE_NOTES: [&str; 10] = [
    "You mean the world to me! 🌎",
    "My heart beats only for you! 💓",
    "You are my favorite person! 🥰",
    "Every day is better with you! ☀️",
    "You are the love of my life! 💑",
    "Forever isn't long enough! ⏳",
    "You make my soul happy! ✨",
    "I love you more than words! 📝",
    "You are my greatest adventure! 🚀",
    "My heart is yours, always! 🔒",
];

/// Used when the service could not be reached or answered with an error.
pub const TRANSPORT_FALLBACK: &str = "You make every day feel like Valentine's Day! 💖";
/// Used when the service answered but the text was unusable.
pub const VALIDATION_FALLBACK: &str = "My heart is yours, today and always! 💕";

pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MIN_MESSAGE_WORDS: usize = 3;

pub const PROMPT: &str = "Write one short romantic sentence of 4 to 6 words for my Valentine. \
Reply with the sentence only.";

pub fn pick_note<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOVE_NOTES.choose(rng).copied().unwrap_or(LOVE_NOTES[0])
}

/// Accepts generated text only when it looks like a real sentence.
pub fn validate(text: &str) -> Result<String, MessageError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MessageError::Rejected(RejectReason::Empty));
    }

    let chars = text.chars().count();
    if chars < MIN_MESSAGE_CHARS {
        return Err(MessageError::Rejected(RejectReason::TooShort {
            chars,
            min: MIN_MESSAGE_CHARS,
        }));
    }

    let words = text.split_whitespace().count();
    if words < MIN_MESSAGE_WORDS {
        return Err(MessageError::Rejected(RejectReason::TooFewWords {
            words,
            min: MIN_MESSAGE_WORDS,
        }));
    }

    Ok(text.to_string())
}

/// Collapses any outcome of the remote call into the text to show.
pub fn settle(outcome: Result<String, MessageError>) -> String {
    match outcome.and_then(|text| validate(&text)) {
        Ok(text) => text,
        Err(e) if e.is_validation() => {
            tracing::info!(error = %e, "generated note rejected, using fallback");
            VALIDATION_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "note generation failed, using fallback");
            TRANSPORT_FALLBACK.to_string()
        }
    }
}

// --- Wire format of the generateContent endpoint ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn for_note(remote: &RemoteConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: PROMPT.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: remote.max_output_tokens,
                temperature: remote.temperature,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        Some(text)
    }
}

/// Maps what came back from the HTTP capability to plain text or an error.
pub fn from_http(
    result: crux_http::Result<crux_http::Response<GenerateResponse>>,
) -> Result<String, MessageError> {
    let mut response = result.map_err(|e| MessageError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MessageError::Status(u16::from(status)));
    }

    response
        .take_body()
        .and_then(|body| body.text())
        .ok_or(MessageError::EmptyResponse)
}

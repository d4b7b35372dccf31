//! Sanitization of generated customer lines.
//!
//! Anything coming back from the generation service passes through here
//! before it is spoken into the transcript.

use thiserror::Error;

/// Maximum accepted length of a generated line, in bytes.
pub const MAX_UTTERANCE_LENGTH: usize = 2_000;

/// Errors that can occur during sanitization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Utterance too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("Utterance is empty after sanitization")]
    Empty,
}

/// Speaker labels models like to prefix their line with.
const SPEAKER_LABELS: [&str; 2] = ["customer:", "caller:"];

/// Sanitizes generated utterances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Sanitizes a generated utterance.
    ///
    /// # Steps
    /// 1. Validate length
    /// 2. Remove control characters (except newlines/tabs)
    /// 3. Strip potential prompt injection markers
    /// 4. Drop a leading speaker label
    /// 5. Trim whitespace and one pair of wrapping quotes
    /// 6. Reject empty results
    pub fn sanitize(&self, utterance: &str) -> Result<String, SanitizationError> {
        self.validate_length(utterance)?;

        let cleaned = self.remove_control_chars(utterance);
        let stripped = self.strip_injection_markers(&cleaned);
        let unlabeled = strip_speaker_label(stripped.trim());
        let unquoted = strip_wrapping_quotes(unlabeled.trim()).trim().to_string();

        if unquoted.is_empty() {
            return Err(SanitizationError::Empty);
        }
        Ok(unquoted)
    }

    fn validate_length(&self, s: &str) -> Result<(), SanitizationError> {
        if s.len() > MAX_UTTERANCE_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_UTTERANCE_LENGTH,
                actual: s.len(),
            });
        }
        Ok(())
    }

    fn remove_control_chars(&self, s: &str) -> String {
        s.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect()
    }

    fn strip_injection_markers(&self, s: &str) -> String {
        let patterns = [
            "```system",
            "```assistant",
            "[INST]",
            "[/INST]",
            "<|system|>",
            "<|assistant|>",
            "<|user|>",
            "<|im_start|>",
            "<|im_end|>",
            "<<SYS>>",
            "<</SYS>>",
        ];

        let mut result = s.to_string();
        for pattern in patterns {
            result = result.replace(pattern, "");
        }
        result
    }
}

fn strip_speaker_label(s: &str) -> &str {
    for label in SPEAKER_LABELS {
        if s
            .get(..label.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(label))
        {
            return &s[label.len()..];
        }
    }
    s
}

fn strip_wrapping_quotes(s: &str) -> &str {
    for (open, close) in [('"', '"'), ('\u{201C}', '\u{201D}'), ('\'', '\'')] {
        if s.chars().count() >= 2 && s.starts_with(open) && s.ends_with(close) {
            return &s[open.len_utf8()..s.len() - close.len_utf8()];
        }
    }
    s
}

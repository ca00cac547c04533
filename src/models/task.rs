//! Task variants for the tutoring relay
//!
//! Each incoming request runs one task variant, which determines the
//! outbound instruction template, the model identifier, and the expected
//! shape of the completion.

/// Tutoring/generation mode of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVariant {
    /// Structured debugging critique of a block-code screenshot
    DebugReport,
    /// Study flashcards generated from a screenshot plus notes
    FlashcardSet,
    /// Caller-supplied message array relayed as-is
    RawChat,
}

/// Default model for the vision-bearing variants (lightweight, image-capable)
pub const VISION_MODEL: &str = "gpt-4o-mini";

/// Default model for the raw chat relay when the caller does not pick one
pub const CHAT_MODEL: &str = "gpt-4o";

impl TaskVariant {
    /// Model identifier used when the caller does not override it
    pub fn default_model(&self) -> &'static str {
        match self {
            TaskVariant::DebugReport | TaskVariant::FlashcardSet => VISION_MODEL,
            TaskVariant::RawChat => CHAT_MODEL,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_variants_use_vision_model() {
        assert_eq!(TaskVariant::DebugReport.default_model(), VISION_MODEL);
        assert_eq!(TaskVariant::FlashcardSet.default_model(), VISION_MODEL);
    }

    #[test]
    fn test_chat_variant_uses_chat_model() {
        assert_eq!(TaskVariant::RawChat.default_model(), CHAT_MODEL);
    }
}

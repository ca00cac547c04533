//! Completion contract validation
//!
//! The single trust boundary between arbitrary text from a third party and
//! structured internal data. A completion that is not valid JSON is a
//! recoverable, reportable outcome - never an error - so the front end can
//! show the raw text instead of a failure page.

use serde_json::Value;

use crate::models::{DebugReport, Flashcard, TaskVariant};
use crate::services::sanitizer::sanitize;

/// Outcome of parsing a completion
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResult {
    /// Sanitized text parsed as JSON
    Valid(Value),
    /// Not JSON; carries the completion text exactly as received for
    /// diagnostic passthrough
    Invalid { raw: String },
}

/// Sanitize and strict-parse a completion.
///
/// Parse failure is a normal branch of the return contract and never
/// propagates as an error.
pub fn parse_completion(completion: &str) -> ParsedResult {
    let cleaned = sanitize(completion);
    match serde_json::from_str(&cleaned) {
        Ok(value) => ParsedResult::Valid(value),
        Err(err) => {
            tracing::debug!(error = %err, "completion is not valid JSON");
            ParsedResult::Invalid {
                raw: completion.to_string(),
            }
        }
    }
}

/// Variant-specific normalization of a parsed completion.
///
/// The parsed value is trusted as-is; the only reshaping is wrapping a
/// single flashcard object into the expected one-element array. Shape
/// mismatches against the documented contract are logged, never rejected.
pub fn normalize(variant: TaskVariant, value: Value) -> Value {
    match variant {
        TaskVariant::FlashcardSet => normalize_flashcards(value),
        TaskVariant::DebugReport => {
            check_report_shape(&value);
            value
        }
        TaskVariant::RawChat => value,
    }
}

/// A flashcard completion should be an array of {question, answer} pairs;
/// models occasionally return a single bare pair instead.
fn normalize_flashcards(value: Value) -> Value {
    if value.is_array() {
        return value;
    }

    match serde_json::from_value::<Flashcard>(value.clone()) {
        Ok(card) => serde_json::to_value(vec![card]).unwrap_or(value),
        Err(_) => value,
    }
}

/// Soft shape check of a debug report against the instruction contract
fn check_report_shape(value: &Value) {
    match serde_json::from_value::<DebugReport>(value.clone()) {
        Ok(report) => {
            if !report.issue_location.references_known_block() {
                tracing::warn!(
                    problem_block_id = %report.issue_location.problem_block_id,
                    "problemBlockId does not reference a returned block"
                );
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "completion did not match the debug report contract");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_parses() {
        let result = parse_completion("{\"summary\": \"ok\"}");
        assert_eq!(result, ParsedResult::Valid(json!({"summary": "ok"})));
    }

    #[test]
    fn test_fenced_json_equals_direct_parse() {
        let fenced = parse_completion("```json\n{\"a\": [1, 2]}\n```");
        let direct = parse_completion("{\"a\": [1, 2]}");
        assert_eq!(fenced, direct);
    }

    #[test]
    fn test_invalid_carries_raw_text_unchanged() {
        let raw = "Sorry, I can't help with ```that```";
        let result = parse_completion(raw);
        assert_eq!(
            result,
            ParsedResult::Invalid {
                raw: raw.to_string()
            }
        );
    }

    #[test]
    fn test_empty_completion_is_invalid() {
        assert!(matches!(parse_completion(""), ParsedResult::Invalid { .. }));
    }

    #[test]
    fn test_flashcard_array_passes_through() {
        let cards = json!([{"question": "Q", "answer": "A"}]);
        assert_eq!(
            normalize(TaskVariant::FlashcardSet, cards.clone()),
            cards
        );
    }

    #[test]
    fn test_single_flashcard_wrapped_into_array() {
        let card = json!({"question": "Q", "answer": "A"});
        assert_eq!(
            normalize(TaskVariant::FlashcardSet, card),
            json!([{"question": "Q", "answer": "A"}])
        );
    }

    #[test]
    fn test_unrecognized_flashcard_shape_passes_through() {
        let odd = json!({"cards": []});
        assert_eq!(normalize(TaskVariant::FlashcardSet, odd.clone()), odd);
    }

    #[test]
    fn test_debug_report_accepted_even_when_off_contract() {
        // Baseline trust: an off-contract report is logged, not rejected.
        let partial = json!({"summary": "only a summary"});
        assert_eq!(normalize(TaskVariant::DebugReport, partial.clone()), partial);
    }

    #[test]
    fn test_raw_chat_untouched() {
        let value = json!({"role": "assistant", "content": "hi"});
        assert_eq!(normalize(TaskVariant::RawChat, value.clone()), value);
    }
}

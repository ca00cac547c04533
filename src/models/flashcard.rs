//! Flashcard completion shape

use serde::{Deserialize, Serialize};

/// One question/answer study card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flashcard_round_trips_contract_keys() {
        let card: Flashcard =
            serde_json::from_value(json!({"question": "Q", "answer": "A"})).unwrap();
        assert_eq!(card.question, "Q");
        assert_eq!(card.answer, "A");
    }

    #[test]
    fn test_flashcard_rejects_missing_answer() {
        let result = serde_json::from_value::<Flashcard>(json!({"question": "Q"}));
        assert!(result.is_err());
    }
}

//! Instruction payload construction
//!
//! Builds the message sequence sent to the inference provider from the
//! uploaded screenshot, the optional free-text notes, and the task variant.
//! The instruction templates are versioned data; editing them does not
//! change any contract in this module. Pure construction, no I/O.

use base64::{engine::general_purpose, Engine as _};

use crate::models::TaskVariant;
use crate::services::openai_client::{ChatMessage, ContentPart, ImageUrlData};

/// System instruction for the debug-report variant.
///
/// The richer issueLocation-inclusive contract is the canonical one; the
/// response must be a bare JSON object so the validator can parse it.
const DEBUG_SYSTEM_INSTRUCTION: &str = "\
You are an expert block-based programming debugging tutor (Scratch/Blockly/EduBlocks style). \
The user provides a screenshot of block code and optional notes. \
Your job: identify likely logic and/or structural issues, explain what the blocks do in pseudocode, \
and give guided, educational fixes and a final corrected solution.\n\n\
Return ONLY valid JSON, do not include markdown, backticks, commentary, or extra text.\n\n\
Output must be ONLY a single JSON object with exactly these top-level keys:\n\
- summary\n\
- assumptions\n\
- identifiedIssues\n\
- issueLocation\n\
- pseudocodeLocation\n\
- hints\n\
- officialAnswer\n\n\
Rules:\n\
1) Even if the screenshot is unclear, still make best effort assumptions and state them in assumptions.\n\
2) Be specific about where the issue is (e.g. 'inside the forever loop', 'in the if branch that checks the condition', 'after setting variable X').\n\
3) Keep hints incremental: hint 1 minimal, hint 2 more direct, hint 3 near-solution.\n\
4) Never output anything except the JSON object.\n\
5) issueLocation MUST be present and MUST be render-ready for a block preview UI.\n\
6) Do NOT invent blocks that are not visible. If unclear, include fewer blocks and set confidence <= 0.5.\n\
7) blocks must be ordered top-to-bottom and include depth for nesting (0 top-level, +1 per nesting level).\n\
8) problemBlockId must match one of the blocks[].id.";

/// Field-level sub-shapes for the debug-report user turn
const DEBUG_OUTPUT_DETAILS: &str = "\
Required output details:\n\
- summary: 1-2 sentences describing what the program appears intended to do.\n\
- assumptions: array of strings.\n\
- identifiedIssues: array of objects {id, title, severity, evidence, whyItBreaks, fix}. Severity: 'low' | 'medium' | 'high'.\n\
- pseudocodeLocation: object {currentBehaviorPseudocode, whereItGoesWrong, correctedLogicPseudocode}. Keep indentation correct in the pseudocode.\n\
- hints: array of 3 objects {level, hint} where level is 1, 2, 3.\n\
- officialAnswer: object {finalPseudocode, blockFixSteps, commonMistakesToAvoid}.\n\
- issueLocation: object {blockPath, blocks, problemBlockId, confidence, notes}.\n\
  - blockPath: array of strings like ['when green flag clicked', 'forever', 'if <condition>'].\n\
  - blocks: array of 4-12 objects {id, type, label, depth}.\n\
    type must be one of: 'event' | 'loop' | 'condition' | 'action' | 'variable' | 'operator' | 'other'.\n\
  - problemBlockId: string matching one blocks[].id.\n\
  - confidence: number 0..1.\n\
  - notes: short string explaining uncertainty (empty string if confident).";

/// System instruction for the flashcard variant
const FLASHCARD_SYSTEM_INSTRUCTION: &str = "\
You are a study-material generator for block-based programming learners. \
The user provides a screenshot of block code and optional notes. \
Create flashcards that test understanding of what the program does, the concepts it uses, \
and the mistakes it illustrates.\n\n\
Return ONLY valid JSON, do not include markdown, backticks, commentary, or extra text.\n\
Output must be ONLY a JSON array of 5-15 objects, each with exactly the keys 'question' and 'answer'.";

/// Field-level sub-shapes for the flashcard user turn
const FLASHCARD_OUTPUT_DETAILS: &str = "\
Required output details:\n\
- A JSON array of flashcards.\n\
- Each flashcard: object {question, answer}, both plain strings.\n\
- Questions should cover program behavior, block concepts, and likely mistakes.";

/// System instruction template for a task variant; RawChat has none
/// (the caller's messages are relayed untouched).
pub fn system_instruction(variant: TaskVariant) -> Option<&'static str> {
    match variant {
        TaskVariant::DebugReport => Some(DEBUG_SYSTEM_INSTRUCTION),
        TaskVariant::FlashcardSet => Some(FLASHCARD_SYSTEM_INSTRUCTION),
        TaskVariant::RawChat => None,
    }
}

fn user_prompt(variant: TaskVariant, notes: &str) -> String {
    match variant {
        TaskVariant::DebugReport => format!(
            "Debug this block program from the screenshot. Notes (might be empty): {notes}\n\n{DEBUG_OUTPUT_DETAILS}"
        ),
        TaskVariant::FlashcardSet => format!(
            "Create study flashcards for this block program from the screenshot. Notes (might be empty): {notes}\n\n{FLASHCARD_OUTPUT_DETAILS}"
        ),
        TaskVariant::RawChat => notes.to_string(),
    }
}

/// Build the message sequence for an image-bearing variant.
///
/// The screenshot is inlined as a `data:<mime>;base64,<content>` URL in the
/// user turn, next to the notes text. Deterministic; never mutated after
/// construction.
pub fn build_vision_messages(
    variant: TaskVariant,
    notes: &str,
    image: &[u8],
    mime_type: &str,
) -> Vec<ChatMessage> {
    let data_url = format!(
        "data:{mime_type};base64,{}",
        general_purpose::STANDARD.encode(image)
    );

    let mut messages = Vec::with_capacity(2);
    if let Some(instruction) = system_instruction(variant) {
        messages.push(ChatMessage::text("system", instruction));
    }
    messages.push(ChatMessage::parts(
        "user",
        vec![
            ContentPart::Text {
                text: user_prompt(variant, notes),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrlData { url: data_url },
            },
        ],
    ));

    messages
}

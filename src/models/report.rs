//! Typed shapes of the debug-report instruction contract
//!
//! The model is instructed to return a single JSON object with these shapes.
//! The relay trusts the model's adherence and passes the parsed value through
//! to the front end unchanged; these types document the contract and back the
//! soft shape check in the validator (log-only, never a rejection).

use serde::{Deserialize, Serialize};

/// Issue severity as instructed in the system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Block categories the preview UI can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Event,
    Loop,
    Condition,
    Action,
    Variable,
    Operator,
    Other,
}

/// One identified logic or structural issue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedIssue {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub evidence: String,
    pub why_it_breaks: String,
    pub fix: String,
}

/// Pseudocode rendering of current vs corrected behavior
///
/// Indentation inside the pseudocode strings is semantically meaningful
/// and must survive the relay unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudocodeLocation {
    pub current_behavior_pseudocode: String,
    pub where_it_goes_wrong: String,
    pub corrected_logic_pseudocode: String,
}

/// One block reference for the preview UI
///
/// Blocks are ordered top-to-bottom; `depth` is 0 for top-level blocks
/// and increases by one per nesting level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRef {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: String,
    pub depth: u32,
}

/// Render-ready location of the problem block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLocation {
    /// Path of block labels from the top, e.g. ["when green flag clicked", "forever"]
    pub block_path: Vec<String>,
    /// 4-12 blocks visible in the screenshot
    pub blocks: Vec<BlockRef>,
    /// Must match one of blocks[].id
    pub problem_block_id: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    /// Short uncertainty note, empty when confident
    pub notes: String,
}

impl IssueLocation {
    /// True when `problem_block_id` references a block the model actually listed
    pub fn references_known_block(&self) -> bool {
        self.blocks.iter().any(|b| b.id == self.problem_block_id)
    }
}

/// Tiered hint; level 1 is minimal, level 3 near-solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    pub level: u8,
    pub hint: String,
}

/// Fully corrected solution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialAnswer {
    pub final_pseudocode: String,
    pub block_fix_steps: Vec<String>,
    pub common_mistakes_to_avoid: Vec<String>,
}

/// Complete debug-report completion shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub summary: String,
    pub assumptions: Vec<String>,
    pub identified_issues: Vec<IdentifiedIssue>,
    pub issue_location: IssueLocation,
    pub pseudocode_location: PseudocodeLocation,
    pub hints: Vec<Hint>,
    pub official_answer: OfficialAnswer,
}

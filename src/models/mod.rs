//! Request-scoped value objects and instruction-contract shapes

pub mod flashcard;
pub mod report;
pub mod task;

pub use flashcard::Flashcard;
pub use report::{
    BlockRef, BlockType, DebugReport, Hint, IdentifiedIssue, IssueLocation, OfficialAnswer,
    PseudocodeLocation, Severity,
};
pub use task::TaskVariant;

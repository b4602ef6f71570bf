//! Validation errors raised at the engine's input boundaries.

use thiserror::Error;

/// Input that falls outside one of the fixed vocabularies.
///
/// Scoring never raises this error. It is produced when raw strings are
/// parsed into domain types, and it is surfaced to callers only at the vote
/// ledger's write boundary; elsewhere callers skip the offending tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A vote choice other than `safe`, `mild` or `avoid`.
    #[error("vote choice '{raw}' must be one of safe, mild, avoid")]
    InvalidChoice {
        /// Choice as submitted.
        raw: String,
    },
    /// An allergen tag outside the allergen vocabulary.
    #[error("unknown allergen '{raw}'")]
    UnknownAllergen {
        /// Tag as submitted.
        raw: String,
    },
    /// A vibe tag outside the vibe vocabulary.
    #[error("unknown vibe tag '{raw}'")]
    UnknownVibe {
        /// Tag as submitted.
        raw: String,
    },
    /// A profile kind other than standard, highly-sensitive or family.
    #[error("unknown profile kind '{raw}'")]
    UnknownProfileKind {
        /// Kind as submitted.
        raw: String,
    },
    /// A vote without a restaurant or dish identifier.
    #[error("vote must reference a restaurant and a dish")]
    MissingVoteKey,
}

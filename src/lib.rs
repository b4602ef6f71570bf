//! Facade crate for the AllerNav allergy-safety engine.
//!
//! This crate re-exports the core domain types and the scoring pipeline, and
//! exposes the SQLite vote ledger and the CSV catalogue behind feature flags.

#![forbid(unsafe_code)]

pub use allernav_core::{
    Allergen, AllergyProfile, Dish, DishScorer, MemoryVoteLedger, ProfileKind, Restaurant,
    ValidationError, VibeTag, Vote, VoteChoice, VoteLedger, VoteTally, risk, round_score, sanitise,
};

#[cfg(feature = "store-sqlite")]
pub use allernav_core::{SqliteLedgerError, SqliteVoteLedger};

pub use allernav_scorer::{
    DishAssessment, DishScoreBreakdown, HeuristicScorer, RestaurantAssessment, SafetyAssessor,
    SafetyBand, ScoringPolicy, TrustEstimate,
};

#[cfg(feature = "datasets")]
pub use allernav_data::{CsvLedgerError, CsvVoteLedger, Dataset, DatasetError};

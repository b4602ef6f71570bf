//! Core domain types for the AllerNav engine.
//!
//! These models describe restaurants, dishes, allergy profiles and community
//! votes. Tag vocabularies are closed enums so unknown allergens and vibes are
//! rejected at the edges. Scores are plain `f64` values in `0.0..=1.0`; see
//! [`sanitise`] and [`round_score`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod allergen;
mod dish;
mod error;
pub mod ledger;
mod profile;
mod restaurant;
pub mod risk;
mod scorer;
mod vibe;
mod vote;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use allergen::Allergen;
pub use dish::Dish;
pub use error::ValidationError;
pub use ledger::{MemoryVoteLedger, VoteLedger};
#[cfg(feature = "store-sqlite")]
pub use ledger::{SqliteLedgerError, SqliteVoteLedger};
pub use profile::{AllergyProfile, ProfileKind};
pub use restaurant::Restaurant;
pub use scorer::{DishScorer, round_score, sanitise};
pub use vibe::VibeTag;
pub use vote::{Vote, VoteChoice, VoteTally};

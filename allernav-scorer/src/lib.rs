//! Safety scoring for AllerNav dishes and restaurants.
//!
//! The crate layers three computations on top of `allernav-core`:
//! - **Dish scoring**: [`HeuristicScorer`] implements
//!   [`DishScorer`](allernav_core::DishScorer) by combining the allergen
//!   match, venue cross-contact and cuisine risk, extraction confidence and
//!   community votes. [`DishScoreBreakdown`] exposes each term.
//! - **Restaurant aggregation**: [`aggregate_restaurant`] averages the best
//!   dish scores and blends them with the venue's verified score.
//! - **Trust estimation**: [`estimate_trust`] blends the verified score with
//!   community sentiment. Trust is reported beside safety and never merged
//!   into it.
//!
//! [`SafetyAssessor`] wires these to a
//! [`VoteLedger`](allernav_core::VoteLedger), applies the profile's
//! sensitivity and ranks restaurants. Every numeric constant lives in
//! [`ScoringPolicy`].
//!
//! # Examples
//!
//! ```
//! use allernav_core::{AllergyProfile, MemoryVoteLedger};
//! use allernav_core::test_support::{thai_dishes, thai_palace};
//! use allernav_scorer::{SafetyAssessor, SafetyBand};
//!
//! let ledger = MemoryVoteLedger::default();
//! let assessor = SafetyAssessor::new(&ledger);
//! let venue = thai_palace();
//! let assessment = assessor
//!     .assess_restaurant(&venue, &thai_dishes(), &AllergyProfile::new())
//!     .expect("in-memory ledger never fails");
//! assert_eq!(assessment.band, SafetyBand::for_score(assessment.adjusted_score));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod assess;
mod band;
mod dish;
mod policy;

pub use aggregate::{TrustEstimate, aggregate_restaurant, estimate_trust};
pub use assess::{DishAssessment, RestaurantAssessment, SafetyAssessor, adjust_for_sensitivity};
pub use band::{CAUTION_THRESHOLD, SAFE_THRESHOLD, SafetyBand};
pub use dish::{
    DishScoreBreakdown, HeuristicScorer, community_adjustment, confidence_bonus,
    cross_contact_penalty, cuisine_penalty,
};
pub use policy::{PolicyError, ScoringPolicy};

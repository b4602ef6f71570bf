//! Append-only storage for community votes.
//!
//! The `VoteLedger` trait is the only mutable shared resource in the engine.
//! Scoring code reads tallies through it and never touches storage directly,
//! so tests can substitute [`MemoryVoteLedger`] for a durable backend.

use crate::{ValidationError, Vote, VoteTally};

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryVoteLedger;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteLedgerError, SqliteVoteLedger};

/// Append-only store of community votes.
///
/// Implementations must serialise appends so a concurrent [`tally`] never
/// observes a partially written vote. A vote appended concurrently with a
/// tally may or may not be counted by it.
///
/// [`tally`]: VoteLedger::tally
///
/// # Examples
///
/// ```rust
/// use allernav_core::{MemoryVoteLedger, VoteLedger};
///
/// # fn main() -> Result<(), allernav_core::ValidationError> {
/// let ledger = MemoryVoteLedger::default();
/// ledger.record("thai_1", "thai_1_pad", None, "safe", Some("no reaction"))?;
/// ledger.record("thai_1", "thai_1_curry", None, "avoid", None)?;
///
/// let dish = ledger.tally("thai_1", Some("thai_1_pad"))?;
/// assert_eq!((dish.safe, dish.avoid), (1, 0));
///
/// let venue = ledger.tally("thai_1", None)?;
/// assert_eq!(venue.total(), 2);
///
/// assert!(ledger.record("thai_1", "thai_1_pad", None, "maybe", None).is_err());
/// # Ok(())
/// # }
/// ```
pub trait VoteLedger {
    /// Error raised by the backing store.
    type Error: std::error::Error + From<ValidationError>;

    /// Durably append a validated vote.
    fn append(&self, vote: &Vote) -> Result<(), Self::Error>;

    /// Aggregate the votes for a key.
    ///
    /// `dish_id = None` aggregates every dish of the restaurant. Unknown keys
    /// yield an empty tally.
    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error>;

    /// Validate raw submission fields and append the resulting vote.
    ///
    /// # Errors
    /// Returns the backend error converted from [`ValidationError`] when the
    /// choice is not `safe`, `mild` or `avoid`, or when the append fails.
    fn record(
        &self,
        restaurant_id: &str,
        dish_id: &str,
        identity: Option<&str>,
        choice: &str,
        comment: Option<&str>,
    ) -> Result<Vote, Self::Error> {
        let vote = Vote::parse(restaurant_id, dish_id, identity, choice, comment)?;
        self.append(&vote)?;
        Ok(vote)
    }
}

impl<L: VoteLedger + ?Sized> VoteLedger for &L {
    type Error = L::Error;

    fn append(&self, vote: &Vote) -> Result<(), Self::Error> {
        (**self).append(vote)
    }

    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error> {
        (**self).tally(restaurant_id, dish_id)
    }
}

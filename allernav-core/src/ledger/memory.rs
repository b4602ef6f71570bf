//! In-memory vote ledger.

use std::sync::{Mutex, PoisonError};

use crate::{ValidationError, Vote, VoteTally};

use super::VoteLedger;

/// Vote ledger held in process memory.
///
/// Appends are serialised by a mutex. The ledger performs a linear scan per
/// tally and suits tests and small, short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryVoteLedger {
    votes: Mutex<Vec<Vote>>,
}

impl MemoryVoteLedger {
    /// Create a ledger pre-populated with `votes`, in order.
    pub fn with_votes<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = Vote>,
    {
        Self {
            votes: Mutex::new(votes.into_iter().collect()),
        }
    }

    /// Number of recorded votes.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Report whether no votes were recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A push either completes or never happens, so a poisoned vector is
    // still consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vote>> {
        self.votes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VoteLedger for MemoryVoteLedger {
    type Error = ValidationError;

    fn append(&self, vote: &Vote) -> Result<(), Self::Error> {
        self.lock().push(vote.clone());
        Ok(())
    }

    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error> {
        Ok(self
            .lock()
            .iter()
            .filter(|vote| vote.matches(restaurant_id, dish_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ledger() -> MemoryVoteLedger {
        let ledger = MemoryVoteLedger::default();
        for (dish, choice) in [("d1", "safe"), ("d1", "safe"), ("d1", "avoid"), ("d2", "mild")] {
            ledger
                .record("r", dish, Some("diner@example.com"), choice, None)
                .expect("record vote");
        }
        ledger
    }

    #[rstest]
    fn tallies_exact_dish(ledger: MemoryVoteLedger) {
        let tally = ledger.tally("r", Some("d1")).expect("tally");
        assert_eq!((tally.safe, tally.mild, tally.avoid), (2, 0, 1));
    }

    #[rstest]
    fn tallies_whole_restaurant(ledger: MemoryVoteLedger) {
        let tally = ledger.tally("r", None).expect("tally");
        assert_eq!((tally.safe, tally.mild, tally.avoid), (2, 1, 1));
    }

    #[rstest]
    fn unknown_key_yields_zero_tally(ledger: MemoryVoteLedger) {
        assert_eq!(ledger.tally("nope", None).expect("tally"), VoteTally::default());
        assert_eq!(ledger.tally("r", Some("d9")).expect("tally"), VoteTally::default());
    }

    #[rstest]
    fn rejected_votes_are_not_stored(ledger: MemoryVoteLedger) {
        let err = ledger
            .record("r", "d1", None, "delicious", None)
            .expect_err("invalid choice");
        assert!(matches!(err, ValidationError::InvalidChoice { .. }));
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn concurrent_appends_are_all_counted() {
        let ledger = MemoryVoteLedger::default();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        ledger.record("r", "d", None, "safe", None).expect("record vote");
                    }
                });
            }
        });
        assert_eq!(ledger.tally("r", Some("d")).expect("tally").safe, 200);
    }
}

//! SQLite-backed vote ledger.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::{ValidationError, Vote, VoteChoice, VoteTally};

use super::VoteLedger;

/// How long a writer waits for another process to release the database.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS votes (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id TEXT NOT NULL,
        dish_id TEXT NOT NULL,
        identity TEXT,
        choice TEXT NOT NULL CHECK (choice IN ('safe', 'mild', 'avoid')),
        comment TEXT
    );
    CREATE INDEX IF NOT EXISTS votes_by_key ON votes (restaurant_id, dish_id);";

const INSERT_VOTE_SQL: &str = "INSERT INTO votes (restaurant_id, dish_id, identity, choice, comment)
     VALUES (?1, ?2, ?3, ?4, ?5)";

const TALLY_SQL: &str = "SELECT choice, comment FROM votes
     WHERE restaurant_id = ?1 AND (?2 IS NULL OR dish_id = ?2)
     ORDER BY seq";

/// Errors raised by [`SqliteVoteLedger`].
#[derive(Debug, Error)]
pub enum SqliteLedgerError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite vote ledger at {path:?}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the `votes` table failed.
    #[error("failed to create votes table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Beginning, executing or committing the append transaction failed.
    #[error("failed to {operation}")]
    Append {
        /// Description of the failed step.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading votes back failed.
    #[error("failed to query {operation}")]
    Query {
        /// Description of the failed query.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Another thread panicked while holding the connection.
    #[error("vote ledger connection lock was poisoned")]
    Poisoned,
    /// The submitted vote was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Vote ledger persisted in an SQLite database.
///
/// Each append runs in its own transaction, so a vote is either fully
/// written or absent. A process-local mutex serialises access to the
/// connection and SQLite's file locking serialises writers across processes.
pub struct SqliteVoteLedger {
    connection: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl fmt::Debug for SqliteVoteLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteVoteLedger")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteVoteLedger {
    /// Open or create a ledger at `path`, creating the schema when missing.
    ///
    /// # Errors
    /// Returns [`SqliteLedgerError`] when the database cannot be opened or
    /// the schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteLedgerError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteLedgerError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::initialise(connection, Some(path.to_path_buf()))
    }

    /// Create a ledger backed by a private in-memory database.
    ///
    /// # Errors
    /// Returns [`SqliteLedgerError`] when SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqliteLedgerError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteLedgerError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::initialise(connection, None)
    }

    fn initialise(
        connection: Connection,
        path: Option<PathBuf>,
    ) -> Result<Self, SqliteLedgerError> {
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| SqliteLedgerError::CreateSchema { source })?;
        connection
            .execute_batch(CREATE_SCHEMA_SQL)
            .map_err(|source| SqliteLedgerError::CreateSchema { source })?;
        Ok(Self {
            connection: Mutex::new(connection),
            path,
        })
    }

    /// Number of recorded votes.
    ///
    /// # Errors
    /// Returns [`SqliteLedgerError::Query`] when the count fails.
    pub fn len(&self) -> Result<u64, SqliteLedgerError> {
        let connection = self.connection.lock().map_err(|_| SqliteLedgerError::Poisoned)?;
        let count: Option<i64> = connection
            .query_row("SELECT COUNT(*) FROM votes", [], |row| row.get(0))
            .optional()
            .map_err(|source| SqliteLedgerError::Query {
                operation: "vote count",
                source,
            })?;
        Ok(count.and_then(|value| u64::try_from(value).ok()).unwrap_or(0))
    }

    /// Whether no votes have been recorded yet.
    ///
    /// # Errors
    /// Returns [`SqliteLedgerError::Query`] when the count fails.
    pub fn is_empty(&self) -> Result<bool, SqliteLedgerError> {
        Ok(self.len()? == 0)
    }
}

impl VoteLedger for SqliteVoteLedger {
    type Error = SqliteLedgerError;

    fn append(&self, vote: &Vote) -> Result<(), Self::Error> {
        let mut connection = self.connection.lock().map_err(|_| SqliteLedgerError::Poisoned)?;
        // Dropping an uncommitted transaction rolls it back.
        let transaction = connection
            .transaction()
            .map_err(|source| SqliteLedgerError::Append {
                operation: "begin vote transaction",
                source,
            })?;
        transaction
            .execute(
                INSERT_VOTE_SQL,
                (
                    vote.restaurant_id.as_str(),
                    vote.dish_id.as_str(),
                    vote.identity.as_deref(),
                    vote.choice.as_str(),
                    vote.comment.as_deref(),
                ),
            )
            .map_err(|source| SqliteLedgerError::Append {
                operation: "insert vote",
                source,
            })?;
        transaction
            .commit()
            .map_err(|source| SqliteLedgerError::Append {
                operation: "commit vote transaction",
                source,
            })?;
        debug!(
            "Recorded {} vote for {}/{}",
            vote.choice, vote.restaurant_id, vote.dish_id
        );
        Ok(())
    }

    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error> {
        let connection = self.connection.lock().map_err(|_| SqliteLedgerError::Poisoned)?;
        let mut statement =
            connection
                .prepare_cached(TALLY_SQL)
                .map_err(|source| SqliteLedgerError::Query {
                    operation: "prepare tally",
                    source,
                })?;
        let rows = statement
            .query_map((restaurant_id, dish_id), |row| {
                let choice: String = row.get(0)?;
                let comment: Option<String> = row.get(1)?;
                Ok((choice, comment))
            })
            .map_err(|source| SqliteLedgerError::Query {
                operation: "votes for tally",
                source,
            })?;

        let mut tally = VoteTally::default();
        for row in rows {
            let (choice, comment) = row.map_err(|source| SqliteLedgerError::Query {
                operation: "read vote row",
                source,
            })?;
            let Ok(parsed) = choice.parse::<VoteChoice>() else {
                warn!("Skipped stored vote with unrecognised choice '{choice}'");
                continue;
            };
            tally.count(parsed);
            if let Some(text) = comment.filter(|text| !text.trim().is_empty()) {
                tally.comments.push(text);
            }
        }
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn ledger() -> SqliteVoteLedger {
        SqliteVoteLedger::open_in_memory().expect("open in-memory ledger")
    }

    #[rstest]
    fn records_and_tallies_votes(ledger: SqliteVoteLedger) {
        ledger
            .record("r", "d1", Some("a@example.com"), "safe", Some("great"))
            .expect("record");
        ledger.record("r", "d1", None, "avoid", Some("  ")).expect("record");
        ledger.record("r", "d2", None, "mild", Some("tingly")).expect("record");

        let dish = ledger.tally("r", Some("d1")).expect("tally dish");
        assert_eq!((dish.safe, dish.mild, dish.avoid), (1, 0, 1));
        assert_eq!(dish.comments, vec!["great"]);

        let venue = ledger.tally("r", None).expect("tally venue");
        assert_eq!(venue.total(), 3);
        assert_eq!(venue.comments, vec!["great", "tingly"]);
    }

    #[rstest]
    fn invalid_choice_is_rejected_before_storage(ledger: SqliteVoteLedger) {
        let err = ledger
            .record("r", "d1", None, "yum", None)
            .expect_err("invalid choice");
        assert!(matches!(
            err,
            SqliteLedgerError::Validation(ValidationError::InvalidChoice { .. })
        ));
        assert_eq!(ledger.len().expect("count"), 0);
    }

    #[rstest]
    fn emptiness_tracks_appends(ledger: SqliteVoteLedger) {
        assert!(ledger.is_empty().expect("empty check"));
        ledger.record("r", "d1", None, "safe", None).expect("record");
        assert!(!ledger.is_empty().expect("empty check"));
        assert_eq!(ledger.len().expect("count"), 1);
    }

    #[rstest]
    fn unknown_key_yields_zero_tally(ledger: SqliteVoteLedger) {
        assert!(ledger.tally("missing", None).expect("tally").is_empty());
    }

    #[test]
    fn votes_survive_reopening() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("votes.db");
        {
            let ledger = SqliteVoteLedger::open(&path).expect("open ledger");
            ledger.record("r", "d", None, "safe", None).expect("record");
        }
        let reopened = SqliteVoteLedger::open(&path).expect("reopen ledger");
        assert_eq!(reopened.tally("r", Some("d")).expect("tally").safe, 1);
    }

    #[test]
    fn open_reports_unusable_paths() {
        let dir = TempDir::new().expect("tempdir");
        let err = SqliteVoteLedger::open(dir.path().join("missing").join("votes.db"))
            .expect_err("missing parent directory");
        assert!(matches!(err, SqliteLedgerError::OpenDatabase { .. }));
    }
}

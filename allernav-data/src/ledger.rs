//! Vote ledger persisted as an append-only CSV file.
//!
//! The file uses the header `rid,dish_id,email,choice,comment`. Each append
//! encodes one complete record (plus the header when the file is empty) and
//! hands it to the operating system in a single write on a file opened in
//! append mode, so concurrent appenders never interleave partial rows.

use std::sync::{Mutex, PoisonError};

use allernav_core::{ValidationError, Vote, VoteChoice, VoteLedger, VoteTally};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde::Deserialize;
use std::io::Write;
use thiserror::Error;

/// Column names of the ledger file, in order.
pub const LEDGER_HEADER: [&str; 5] = ["rid", "dish_id", "email", "choice", "comment"];

/// Default ledger file name inside a data directory.
pub const LEDGER_FILE: &str = "feedback.csv";

/// Errors raised by [`CsvVoteLedger`].
#[derive(Debug, Error)]
pub enum CsvLedgerError {
    /// Opening or creating the ledger file failed.
    #[error("failed to open vote ledger at {path}")]
    Open {
        /// Ledger location.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Encoding a vote as CSV failed.
    #[error("failed to encode vote for {path}")]
    Encode {
        /// Ledger location.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// Writing the encoded vote failed.
    #[error("failed to append vote to {path}")]
    Append {
        /// Ledger location.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Reading the ledger back failed.
    #[error("failed to read vote ledger at {path}")]
    Read {
        /// Ledger location.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// The submitted vote was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(default)]
    rid: String,
    #[serde(default)]
    dish_id: String,
    #[serde(default)]
    choice: String,
    #[serde(default)]
    comment: String,
}

/// Vote ledger stored as a CSV file.
///
/// A missing file is an empty ledger; it is created on the first append.
///
/// # Examples
/// ```no_run
/// use allernav_core::VoteLedger;
/// use allernav_data::CsvVoteLedger;
/// use camino::Utf8Path;
///
/// let ledger = CsvVoteLedger::new(Utf8Path::new("data/feedback.csv"));
/// ledger.record("thai_1", "thai_1_pad", Some("diner@example.com"), "safe", None)?;
/// let tally = ledger.tally("thai_1", Some("thai_1_pad"))?;
/// assert!(tally.safe >= 1);
/// # Ok::<(), allernav_data::CsvLedgerError>(())
/// ```
#[derive(Debug)]
pub struct CsvVoteLedger {
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl CsvVoteLedger {
    /// Use the ledger file at `path`.
    pub fn new(path: &Utf8Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Use `feedback.csv` inside `data_dir`.
    pub fn in_dir(data_dir: &Utf8Path) -> Self {
        Self::new(&data_dir.join(LEDGER_FILE))
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn encode(&self, vote: &Vote, with_header: bool) -> Result<Vec<u8>, CsvLedgerError> {
        let encode_err = |source| CsvLedgerError::Encode {
            path: self.path.clone(),
            source,
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        if with_header {
            writer.write_record(LEDGER_HEADER).map_err(encode_err)?;
        }
        writer
            .write_record([
                vote.restaurant_id.as_str(),
                vote.dish_id.as_str(),
                vote.identity.as_deref().unwrap_or_default(),
                vote.choice.as_str(),
                vote.comment.as_deref().unwrap_or_default(),
            ])
            .map_err(encode_err)?;
        writer.into_inner().map_err(|err| CsvLedgerError::Append {
            path: self.path.clone(),
            source: err.into_error(),
        })
    }
}

impl VoteLedger for CsvVoteLedger {
    type Error = CsvLedgerError;

    fn append(&self, vote: &Vote) -> Result<(), Self::Error> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let open_err = |source| CsvLedgerError::Open {
            path: self.path.clone(),
            source,
        };
        let mut file = allernav_fs::open_append(&self.path).map_err(open_err)?;
        let is_empty = file.metadata().map_err(open_err)?.len() == 0;
        let bytes = self.encode(vote, is_empty)?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|source| CsvLedgerError::Append {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "Recorded {} vote for {}/{} in {}",
            vote.choice, vote.restaurant_id, vote.dish_id, self.path
        );
        Ok(())
    }

    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !allernav_fs::file_is_file(&self.path).map_err(|source| CsvLedgerError::Open {
            path: self.path.clone(),
            source,
        })? {
            return Ok(VoteTally::default());
        }
        let file = allernav_fs::open_utf8_file(&self.path).map_err(|source| {
            CsvLedgerError::Open {
                path: self.path.clone(),
                source,
            }
        })?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let mut tally = VoteTally::default();
        for (index, record) in reader.deserialize::<LedgerRow>().enumerate() {
            let row = match record {
                Ok(row) => row,
                Err(err) if err.is_io_error() => {
                    return Err(CsvLedgerError::Read {
                        path: self.path.clone(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!("Skipping malformed ledger row {} in {}: {err}", index + 1, self.path);
                    continue;
                }
            };
            if row.rid != restaurant_id || dish_id.is_some_and(|dish| row.dish_id != dish) {
                continue;
            }
            let Ok(choice) = row.choice.parse::<VoteChoice>() else {
                warn!(
                    "Skipping ledger row {} in {} with choice '{}'",
                    index + 1,
                    self.path,
                    row.choice
                );
                continue;
            };
            tally.count(choice);
            let comment = row.comment.trim();
            if !comment.is_empty() {
                tally.comments.push(comment.to_owned());
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
    fn ledger() -> (TempDir, CsvVoteLedger) {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let ledger = CsvVoteLedger::in_dir(&root.join("data"));
        (dir, ledger)
    }

    #[rstest]
    fn missing_file_is_an_empty_ledger(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        assert!(ledger.tally("thai_1", None).expect("tally").is_empty());
    }

    #[rstest]
    fn first_append_writes_header_once(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        ledger
            .record("thai_1", "thai_1_pad", Some(" a@b.c "), "safe", Some(" fine, thanks "))
            .expect("record");
        ledger
            .record("thai_1", "thai_1_pad", None, "avoid", None)
            .expect("record");

        let contents = allernav_fs::read_to_string(ledger.path()).expect("read ledger");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "rid,dish_id,email,choice,comment",
                "thai_1,thai_1_pad,a@b.c,safe,\"fine, thanks\"",
                "thai_1,thai_1_pad,,avoid,",
            ]
        );
    }

    #[rstest]
    fn tallies_by_dish_and_restaurant(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        for (dish, choice, comment) in [
            ("pad", "safe", Some("no reaction")),
            ("pad", "mild", None),
            ("curry", "avoid", Some("hives")),
        ] {
            ledger.record("thai_1", dish, None, choice, comment).expect("record");
        }
        ledger.record("ital_1", "pad", None, "safe", None).expect("record");

        let pad = ledger.tally("thai_1", Some("pad")).expect("tally");
        assert_eq!((pad.safe, pad.mild, pad.avoid), (1, 1, 0));
        assert_eq!(pad.comments, vec!["no reaction"]);

        let venue = ledger.tally("thai_1", None).expect("tally");
        assert_eq!(venue.total(), 3);
        assert_eq!(venue.comments, vec!["no reaction", "hives"]);
    }

    #[rstest]
    fn rejected_votes_leave_no_file(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        let err = ledger
            .record("thai_1", "pad", None, "great", None)
            .expect_err("invalid choice");
        assert!(matches!(
            err,
            CsvLedgerError::Validation(ValidationError::InvalidChoice { .. })
        ));
        assert!(!allernav_fs::file_is_file(ledger.path()).expect("file check"));
    }

    #[rstest]
    fn skips_malformed_rows(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        ledger.record("thai_1", "pad", None, "safe", None).expect("record");
        let mut file = allernav_fs::open_append(ledger.path()).expect("open");
        file.write_all(b"thai_1,pad,,delicious,\nthai_1\n").expect("append junk");

        let tally = ledger.tally("thai_1", Some("pad")).expect("tally");
        assert_eq!(tally.total(), 1);
    }

    #[rstest]
    fn concurrent_appends_are_all_counted(ledger: (TempDir, CsvVoteLedger)) {
        let (_guard, ledger) = ledger;
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let ledger = &ledger;
                scope.spawn(move || {
                    for _ in 0..10 {
                        let comment = format!("worker {worker}");
                        ledger
                            .record("thai_1", "pad", None, "safe", Some(&comment))
                            .expect("record");
                    }
                });
            }
        });
        let tally = ledger.tally("thai_1", Some("pad")).expect("tally");
        assert_eq!(tally.safe, 40);
        assert_eq!(tally.comments.len(), 40);
    }
}

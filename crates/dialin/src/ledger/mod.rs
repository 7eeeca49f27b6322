//! The append-only `(date, phrase)` ledger.
//!
//! Each line is `YYYY-MM-DD, phrase`. Reading is forgiving: malformed lines
//! are skipped and counted, and a missing file is an empty ledger. Writing
//! only ever appends, one line at a time, so an interrupted run leaves a
//! prefix of its batch behind and the next run tops up from there.

mod audit;
mod record;

pub use audit::*;
pub use record::*;

use std::{
    collections::BTreeSet,
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, Result, UsedPhrases};

/// A ledger line that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub reason: ParseRecordError,
}

/// Everything a run needs to know about the ledger, read in one pass.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    records: Vec<PhraseRecord>,
    used: UsedPhrases,
    dates: BTreeSet<NaiveDate>,
    skipped: Vec<SkippedLine>,
}

impl LedgerSnapshot {
    /// Records in file order.
    pub fn records(&self) -> &[PhraseRecord] {
        &self.records
    }

    pub fn used(&self) -> &UsedPhrases {
        &self.used
    }

    /// Every date that already carries a phrase.
    pub fn dates(&self) -> &BTreeSet<NaiveDate> {
        &self.dates
    }

    /// The latest date on record, wherever it appears in the file.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records dated strictly after `today`.
    pub fn count_future(&self, today: NaiveDate) -> usize {
        self.records.iter().filter(|r| r.date > today).count()
    }

    /// The first record scheduled for `date`.
    pub fn record_for(&self, date: NaiveDate) -> Option<&PhraseRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    /// Splits into the used-phrase set and the latest date.
    pub fn into_parts(self) -> (UsedPhrases, Option<NaiveDate>) {
        let last = self.last_date();
        (self.used, last)
    }

    /// Adds a record as if it had been read from the file.
    pub fn push(&mut self, record: PhraseRecord) {
        self.used.insert(&record.phrase);
        self.dates.insert(record.date);
        self.records.push(record);
    }
}

/// Reads every record from `reader`, skipping lines that do not parse.
///
/// # Errors
///
/// Returns an error only if the reader itself fails.
pub fn read_records<R: BufRead>(reader: R) -> io::Result<LedgerSnapshot> {
    let mut snapshot = LedgerSnapshot::default();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = index + 1;
        let parsed = match core::str::from_utf8(&bytes) {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => text.parse::<PhraseRecord>(),
            Err(_) => Err(ParseRecordError::InvalidUtf8),
        };
        match parsed {
            Ok(record) => snapshot.push(record),
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(line, %reason, "Skipping malformed ledger line");
                snapshot.skipped.push(SkippedLine { line, reason });
            }
        }
    }

    Ok(snapshot)
}

/// Writes each record as one `date, phrase` line, in the order given.
///
/// Returns the number of records written before any failure, together with
/// the failure itself.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[PhraseRecord],
) -> core::result::Result<usize, (usize, io::Error)> {
    for (written, record) in records.iter().enumerate() {
        let line = format!("{record}\n");
        writer
            .write_all(line.as_bytes())
            .map_err(|e| (written, e))?;
    }
    writer.flush().map_err(|e| (records.len(), e))?;
    Ok(records.len())
}

/// A ledger file on disk.
///
/// Every operation opens the file, does its work and closes it again; no
/// handle is held between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole ledger. A missing file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedgerIo`] if the file exists but cannot be read.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(path = %self.path.display())))]
    pub fn load(&self) -> Result<LedgerSnapshot> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Ledger not found, treating as empty");
                return Ok(LedgerSnapshot::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let snapshot = read_records(BufReader::new(file)).map_err(|e| self.io_error(e))?;

        #[cfg(feature = "tracing")]
        if !snapshot.skipped().is_empty() {
            tracing::warn!(
                skipped = snapshot.skipped().len(),
                "Ledger contains malformed lines"
            );
        }

        Ok(snapshot)
    }

    /// Appends `records` in order without touching existing content.
    ///
    /// A missing file is created. If the file does not end in a newline, one
    /// is written first so the new records start on their own line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedgerIo`] if the file cannot be opened and
    /// [`Error::LedgerAppend`] if a write fails; lines written before the
    /// failure remain.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, records), fields(path = %self.path.display(), count = records.len())))]
    pub fn append(&self, records: &[PhraseRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        if !ends_with_newline(&mut file).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|source| Error::LedgerAppend {
                path: self.path.clone(),
                written: 0,
                source,
            })?;
        }

        let written = write_records(&mut file, records).map_err(|(written, source)| {
            Error::LedgerAppend {
                path: self.path.clone(),
                written,
                source,
            }
        })?;

        #[cfg(feature = "tracing")]
        tracing::info!(written, "Appended records to ledger");

        Ok(written)
    }

    /// The rotation query: the record scheduled for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedgerIo`] if the ledger cannot be read.
    pub fn record_for(&self, date: NaiveDate) -> Result<Option<PhraseRecord>> {
        Ok(self.load()?.record_for(date).cloned())
    }

    /// Number of records dated strictly after `today`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedgerIo`] if the ledger cannot be read.
    pub fn count_future(&self, today: NaiveDate) -> Result<usize> {
        Ok(self.load()?.count_future(today))
    }

    /// Read-only health check of the ledger contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedgerIo`] if the ledger cannot be read.
    pub fn audit(&self) -> Result<AuditReport> {
        Ok(AuditReport::from_snapshot(&self.load()?))
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::LedgerIo {
            path: self.path.clone(),
            source,
        }
    }
}

/// An empty file counts as ending in a newline.
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0_u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

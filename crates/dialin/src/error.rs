use std::{io, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::Rejection;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `dialin` can produce.
///
/// Recoverable conditions such as malformed ledger lines or a synthesis
/// shortfall are not errors; they are reported through
/// [`crate::LedgerSnapshot::skipped`] and [`crate::SupplyReport::shortfall`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The ledger could not be opened or read.
    #[error("failed to read ledger {}: {source}", .path.display())]
    LedgerIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Appending to the ledger failed part way. Records written before the
    /// failure stay on disk.
    #[error("failed to append to ledger {} after {written} record(s): {source}", .path.display())]
    LedgerAppend {
        path: PathBuf,
        written: usize,
        #[source]
        source: io::Error,
    },

    /// The lexicon file could not be read.
    #[error("failed to read lexicon {}: {source}", .path.display())]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lexicon source is malformed.
    #[error("lexicon line {line}: {reason}")]
    Lexicon { line: usize, reason: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Date arithmetic ran past the representable calendar.
    #[error("no calendar date exists after {date}")]
    DateOverflow { date: NaiveDate },

    /// An operator-supplied phrase was refused.
    #[error("phrase rejected: {0}")]
    Rejected(#[from] Rejection),

    /// I/O on a caller-provided reader or writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn lexicon(line: usize, reason: impl Into<String>) -> Self {
        Self::Lexicon {
            line,
            reason: reason.into(),
        }
    }
}

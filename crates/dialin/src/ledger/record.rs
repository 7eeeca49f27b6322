use core::{fmt, str::FromStr};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{DATE_FORMAT, parse_date};

/// Separator between the date and the phrase on a ledger line.
pub const RECORD_SEPARATOR: &str = ", ";

/// One scheduled phrase: `YYYY-MM-DD, phrase`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhraseRecord {
    pub date: NaiveDate,
    pub phrase: String,
}

impl PhraseRecord {
    pub fn new(date: NaiveDate, phrase: impl Into<String>) -> Self {
        Self {
            date,
            phrase: phrase.into(),
        }
    }
}

impl fmt::Display for PhraseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{RECORD_SEPARATOR}{}",
            self.date.format(DATE_FORMAT),
            self.phrase
        )
    }
}

/// Why a ledger line could not be read as a [`PhraseRecord`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ParseRecordError {
    #[error("missing \", \" separator")]
    MissingSeparator,

    #[error("invalid date {value:?}")]
    InvalidDate { value: String },

    #[error("empty phrase")]
    EmptyPhrase,

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

impl FromStr for PhraseRecord {
    type Err = ParseRecordError;

    /// Splits on the first `", "`; everything after it is the phrase.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (date, phrase) = line
            .trim_start()
            .trim_end_matches(['\r', '\n'])
            .split_once(RECORD_SEPARATOR)
            .ok_or(ParseRecordError::MissingSeparator)?;
        let date = parse_date(date).ok_or_else(|| ParseRecordError::InvalidDate {
            value: date.trim().to_owned(),
        })?;
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(ParseRecordError::EmptyPhrase);
        }
        Ok(Self::new(date, phrase))
    }
}

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{Error, PhraseRecord, Result};

/// Returns the day after `last`.
///
/// # Errors
///
/// Returns [`Error::DateOverflow`] at the end of the representable calendar.
pub fn next_date(last: NaiveDate) -> Result<NaiveDate> {
    last.succ_opt().ok_or(Error::DateOverflow { date: last })
}

/// Scans forward from `from` (exclusive) to the first date not in `used`.
///
/// # Errors
///
/// Returns [`Error::DateOverflow`] if the scan runs off the calendar.
pub fn find_next_available_date(used: &BTreeSet<NaiveDate>, from: NaiveDate) -> Result<NaiveDate> {
    let mut date = next_date(from)?;
    while used.contains(&date) {
        date = next_date(date)?;
    }
    Ok(date)
}

/// Hands out consecutive dates following an anchor day.
///
/// Anchored on the latest ledger date, a sequencer can never collide with an
/// existing record and never leaves a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSequencer {
    last: NaiveDate,
}

impl DateSequencer {
    /// The first date handed out is the day after `anchor`.
    pub const fn after(anchor: NaiveDate) -> Self {
        Self { last: anchor }
    }

    /// The most recently assigned date, or the anchor if none was assigned.
    pub const fn last(&self) -> NaiveDate {
        self.last
    }

    /// Assigns the next date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateOverflow`] at the end of the calendar.
    pub fn advance(&mut self) -> Result<NaiveDate> {
        self.last = next_date(self.last)?;
        Ok(self.last)
    }

    /// Pairs each phrase with the next date, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateOverflow`] at the end of the calendar.
    pub fn assign<I>(&mut self, phrases: I) -> Result<Vec<PhraseRecord>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        phrases
            .into_iter()
            .map(|phrase| -> Result<PhraseRecord> { Ok(PhraseRecord::new(self.advance()?, phrase)) })
            .collect()
    }
}

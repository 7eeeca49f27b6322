//! Keeps the ledger stocked with future-dated phrases.
//!
//! [`PhraseSupply`] is what the scheduler calls. Every operation re-reads the
//! ledger, so a run that was interrupted part way, or a ledger edited by
//! hand, is picked up as it actually is on disk.
//!
//! Runs are not serialized against each other. Two overlapping runs both
//! snapshot the same ledger and can append the same dates; run at most one
//! at a time.

mod config;
mod report;
#[cfg(test)]
mod tests;

pub use config::*;
pub use report::*;

use chrono::NaiveDate;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    AuditReport, DateSequencer, DateSource, Ledger, LedgerSnapshot, Lexicon, PhraseRecord,
    PhraseSynthesizer, RandSource, Rejection, Result, find_next_available_date, validate,
};

/// The phrase supply pipeline: ledger, lexicon, randomness and a calendar.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use dialin::{FixedDate, Ledger, Lexicon, PhraseSupply, SeededRandom, SupplyConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
/// let supply = PhraseSupply::new(
///     Ledger::new(dir.path().join("words.txt")),
///     Lexicon::embedded().unwrap(),
///     SeededRandom::new(1),
///     FixedDate(today),
///     SupplyConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(supply.run_supply_check().unwrap(), 30);
/// assert_eq!(supply.run_supply_check().unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct PhraseSupply<R, C> {
    ledger: Ledger,
    lexicon: Lexicon,
    rng: R,
    calendar: C,
    config: SupplyConfig,
}

impl<R, C> PhraseSupply<R, C>
where
    R: RandSource<u64>,
    C: DateSource,
{
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if `config` does not validate.
    pub fn new(
        ledger: Ledger,
        lexicon: Lexicon,
        rng: R,
        calendar: C,
        config: SupplyConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger,
            lexicon,
            rng,
            calendar,
            config,
        })
    }

    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub const fn config(&self) -> &SupplyConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.today()
    }

    /// Number of ledger records dated strictly after today.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LedgerIo`] if the ledger cannot be read.
    pub fn count_future(&self) -> Result<usize> {
        self.ledger.count_future(self.today())
    }

    /// Tops the ledger up with a batch if fewer than
    /// [`SupplyConfig::min_days_ahead`] future records remain.
    ///
    /// New dates follow the latest date on record, or today if that is
    /// later, so the batch always lands in the future. Calling this again
    /// once supply suffices appends nothing.
    ///
    /// # Errors
    ///
    /// Returns ledger read or append errors. A synthesis shortfall is not an
    /// error; see [`SupplyReport::shortfall`].
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn ensure_supply(&self) -> Result<SupplyReport> {
        let today = self.today();
        let snapshot = self.ledger.load()?;
        let future = snapshot.count_future(today);

        if future >= self.config.min_days_ahead {
            #[cfg(feature = "tracing")]
            tracing::info!(
                future,
                min_days_ahead = self.config.min_days_ahead,
                "Sufficient phrases available"
            );
            return Ok(SupplyReport::unchanged(today, future));
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            future,
            min_days_ahead = self.config.min_days_ahead,
            batch_size = self.config.batch_size,
            "Running low on phrases, generating a batch"
        );

        let anchor = self.anchor(&snapshot, today).max(today);
        self.extend(&snapshot, anchor, self.config.batch_size, today)
    }

    /// The scheduler entry point: [`Self::ensure_supply`] reduced to the
    /// number of phrases added.
    ///
    /// # Errors
    ///
    /// See [`Self::ensure_supply`].
    pub fn run_supply_check(&self) -> Result<usize> {
        Ok(self.ensure_supply()?.added.len())
    }

    /// Appends `count` phrases regardless of current supply.
    ///
    /// Dates continue from the latest date on record, or from the configured
    /// epoch when the ledger is empty. Either way they never start before
    /// tomorrow.
    ///
    /// # Errors
    ///
    /// Returns ledger read or append errors.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn generate(&self, count: usize) -> Result<SupplyReport> {
        let today = self.today();
        let snapshot = self.ledger.load()?;
        let anchor = self.anchor(&snapshot, today).max(today);
        self.extend(&snapshot, anchor, count, today)
    }

    /// Validates and appends an operator-chosen phrase.
    ///
    /// Without a date the phrase takes the first free date after today. A
    /// phrase with a leading or trailing space is refused, since the reader
    /// would not give it back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Rejected`] if the phrase fails validation or
    /// the requested date is taken; nothing is written in that case.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn submit(&self, phrase: &str, date: Option<NaiveDate>) -> Result<PhraseRecord> {
        let snapshot = self.ledger.load()?;
        validate(phrase, snapshot.used())?;
        // Ledger lines are trimmed on read.
        if phrase.trim() != phrase {
            return Err(Rejection::SurroundingSpace {
                phrase: phrase.to_owned(),
            }
            .into());
        }

        let date = match date {
            Some(date) if snapshot.dates().contains(&date) => {
                return Err(Rejection::DateTaken { date }.into());
            }
            Some(date) => date,
            None => find_next_available_date(snapshot.dates(), self.today())?,
        };

        let record = PhraseRecord::new(date, phrase);
        self.ledger.append(core::slice::from_ref(&record))?;
        Ok(record)
    }

    /// The record scheduled for `date`, for the rotation process.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LedgerIo`] if the ledger cannot be read.
    pub fn phrase_for(&self, date: NaiveDate) -> Result<Option<PhraseRecord>> {
        self.ledger.record_for(date)
    }

    /// # Errors
    ///
    /// Returns [`crate::Error::LedgerIo`] if the ledger cannot be read.
    pub fn audit(&self) -> Result<AuditReport> {
        self.ledger.audit()
    }

    fn anchor(&self, snapshot: &LedgerSnapshot, today: NaiveDate) -> NaiveDate {
        snapshot
            .last_date()
            .or(self.config.epoch)
            .unwrap_or(today)
    }

    fn extend(
        &self,
        snapshot: &LedgerSnapshot,
        anchor: NaiveDate,
        count: usize,
        today: NaiveDate,
    ) -> Result<SupplyReport> {
        let future_before = snapshot.count_future(today);
        let synth = PhraseSynthesizer::new(&self.lexicon, &self.rng, self.config.synth)?;
        let mut used = snapshot.used().clone();
        let batch = synth.synthesize_batch(count, &mut used);

        #[cfg(feature = "tracing")]
        if batch.shortfall() > 0 {
            tracing::warn!(
                requested = count,
                produced = batch.phrases.len(),
                "Phrase synthesis fell short"
            );
        }

        let added = DateSequencer::after(anchor)
            .assign(batch.phrases.into_iter().map(|found| found.phrase))?;
        self.ledger.append(&added)?;

        #[cfg(feature = "tracing")]
        for record in &added {
            tracing::debug!(%record, "Added phrase");
        }

        let future_after = future_before + added.iter().filter(|r| r.date > today).count();

        Ok(SupplyReport {
            today,
            future_before,
            requested: count,
            added,
            future_after,
        })
    }
}

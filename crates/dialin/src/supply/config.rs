use chrono::NaiveDate;

use crate::{Error, Result, SynthConfig};

/// Default number of future days below which a supply check tops up.
pub const DEFAULT_MIN_DAYS_AHEAD: usize = 7;

/// Default number of phrases requested per top-up.
pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Settings for [`crate::PhraseSupply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyConfig {
    /// A supply check generates when fewer future records than this remain.
    pub min_days_ahead: usize,
    /// Phrases requested per top-up.
    pub batch_size: usize,
    pub synth: SynthConfig,
    /// Anchor date used in place of the latest ledger date when the ledger
    /// is empty. Defaults to today.
    pub epoch: Option<NaiveDate>,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            min_days_ahead: DEFAULT_MIN_DAYS_AHEAD,
            batch_size: DEFAULT_BATCH_SIZE,
            synth: SynthConfig::default(),
            epoch: None,
        }
    }
}

impl SupplyConfig {
    #[must_use]
    pub const fn with_min_days_ahead(mut self, days: usize) -> Self {
        self.min_days_ahead = days;
        self
    }

    #[must_use]
    pub const fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    #[must_use]
    pub const fn with_synth(mut self, synth: SynthConfig) -> Self {
        self.synth = synth;
        self
    }

    #[must_use]
    pub const fn with_epoch(mut self, epoch: Option<NaiveDate>) -> Self {
        self.epoch = epoch;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero batch size or an invalid
    /// synthesizer configuration.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_config("batch size must be greater than 0"));
        }
        self.synth.validate()
    }
}

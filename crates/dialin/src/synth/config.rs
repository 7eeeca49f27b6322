use crate::{Error, Result};

/// Default probability of trying a single dictionary word first.
pub const DEFAULT_SINGLE_WORD_WEIGHT: f64 = 0.2;

/// Default number of length partitions the pattern strategy tries.
pub const DEFAULT_PATTERN_RETRIES: usize = 3;

/// Default cascade runs allowed per requested phrase.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Tuning knobs for [`crate::PhraseSynthesizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Probability that a cascade starts with the single-word strategy
    /// instead of going straight to the multi-word ones.
    ///
    /// The roll decides which strategy leads: a win puts single words ahead
    /// of templates, a loss leaves single words out of that cascade.
    pub single_word_weight: f64,
    /// Partitions the pattern strategy draws before giving up.
    pub pattern_retries: usize,
    /// Cascade runs allowed per requested phrase before it counts as a
    /// shortfall.
    pub max_attempts: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            single_word_weight: DEFAULT_SINGLE_WORD_WEIGHT,
            pattern_retries: DEFAULT_PATTERN_RETRIES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SynthConfig {
    #[must_use]
    pub const fn with_single_word_weight(mut self, weight: f64) -> Self {
        self.single_word_weight = weight;
        self
    }

    #[must_use]
    pub const fn with_pattern_retries(mut self, retries: usize) -> Self {
        self.pattern_retries = retries;
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a weight outside `0.0..=1.0` or a
    /// zero retry or attempt budget.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.single_word_weight) {
            return Err(Error::invalid_config(format!(
                "single word weight must be within 0.0..=1.0, got {}",
                self.single_word_weight
            )));
        }
        if self.pattern_retries == 0 {
            return Err(Error::invalid_config("pattern retries must be greater than 0"));
        }
        if self.max_attempts == 0 {
            return Err(Error::invalid_config("max attempts must be greater than 0"));
        }
        Ok(())
    }
}

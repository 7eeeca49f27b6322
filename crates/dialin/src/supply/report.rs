use chrono::NaiveDate;

use crate::PhraseRecord;

/// What a supply check or generation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupplyReport {
    pub today: NaiveDate,
    /// Records dated after `today` before the run.
    pub future_before: usize,
    /// Phrases asked of the synthesizer; zero when no top-up was needed.
    pub requested: usize,
    /// Records appended to the ledger, in date order.
    pub added: Vec<PhraseRecord>,
    /// Records dated after `today` once the run finished.
    pub future_after: usize,
}

impl SupplyReport {
    pub(crate) fn unchanged(today: NaiveDate, future: usize) -> Self {
        Self {
            today,
            future_before: future,
            requested: 0,
            added: Vec::new(),
            future_after: future,
        }
    }

    /// Requested phrases the synthesizer could not produce.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.added.len())
    }

    /// `true` if the run left the ledger untouched because supply sufficed.
    pub fn is_noop(&self) -> bool {
        self.requested == 0
    }
}

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{LedgerSnapshot, PhraseRecord, SkippedLine};
use crate::{Rejection, UsedPhrases, validate};

/// A record whose phrase breaks the length or character rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidRecord {
    pub record: PhraseRecord,
    pub reason: Rejection,
}

/// A phrase that appears on more than one date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatedPhrase {
    /// Lowercased phrase.
    pub phrase: String,
    pub dates: Vec<NaiveDate>,
}

/// A date that carries more than one phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatedDate {
    pub date: NaiveDate,
    pub phrases: Vec<String>,
}

/// Findings from a read-only pass over the ledger.
///
/// Hand-edited ledgers and overlapping runs are the usual sources of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditReport {
    pub records: usize,
    pub invalid: Vec<InvalidRecord>,
    pub repeated_phrases: Vec<RepeatedPhrase>,
    pub repeated_dates: Vec<RepeatedDate>,
    pub malformed: Vec<SkippedLine>,
}

impl AuditReport {
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        let nothing_used = UsedPhrases::new();
        let mut by_phrase: BTreeMap<String, Vec<NaiveDate>> = BTreeMap::new();
        let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        let mut invalid = Vec::new();

        for record in snapshot.records() {
            if let Err(reason) = validate(&record.phrase, &nothing_used) {
                invalid.push(InvalidRecord {
                    record: record.clone(),
                    reason,
                });
            }
            by_phrase
                .entry(record.phrase.to_lowercase())
                .or_default()
                .push(record.date);
            by_date
                .entry(record.date)
                .or_default()
                .push(record.phrase.clone());
        }

        Self {
            records: snapshot.len(),
            invalid,
            repeated_phrases: by_phrase
                .into_iter()
                .filter(|(_, dates)| dates.len() > 1)
                .map(|(phrase, dates)| RepeatedPhrase { phrase, dates })
                .collect(),
            repeated_dates: by_date
                .into_iter()
                .filter(|(_, phrases)| phrases.len() > 1)
                .map(|(date, phrases)| RepeatedDate { date, phrases })
                .collect(),
            malformed: snapshot.skipped().to_vec(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
            && self.repeated_phrases.is_empty()
            && self.repeated_dates.is_empty()
            && self.malformed.is_empty()
    }
}

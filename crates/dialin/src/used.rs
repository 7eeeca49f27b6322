use std::collections::HashSet;

/// Phrases already on record, compared case-insensitively.
///
/// Built fresh from the ledger on every run and grown as phrases are
/// accepted, so a batch never repeats itself or its history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedPhrases {
    phrases: HashSet<String>,
}

impl UsedPhrases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `phrase` has been used, ignoring case.
    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(&phrase.to_lowercase())
    }

    /// Records `phrase`. Returns `false` if it was already present.
    pub fn insert(&mut self, phrase: &str) -> bool {
        self.phrases.insert(phrase.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Lowercased phrases in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for UsedPhrases {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut used = Self::new();
        used.extend(iter);
        used
    }
}

impl<'a> Extend<&'a str> for UsedPhrases {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for phrase in iter {
            self.insert(phrase);
        }
    }
}

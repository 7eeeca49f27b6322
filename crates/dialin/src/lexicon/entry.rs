use core::fmt;

/// Coarse bucket for a word's letter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthClass {
    /// Up to 4 letters.
    Short,
    /// 5 to 7 letters.
    Medium,
    /// 8 letters or more.
    Long,
}

impl LengthClass {
    pub const fn of(length: usize) -> Self {
        match length {
            0..=4 => Self::Short,
            5..=7 => Self::Medium,
            _ => Self::Long,
        }
    }
}

/// A single lexicon word with its derived length data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    word: String,
    length: usize,
    length_class: LengthClass,
}

impl LexiconEntry {
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let length = word.chars().count();
        Self {
            word,
            length,
            length_class: LengthClass::of(length),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn length_class(&self) -> LengthClass {
        self.length_class
    }
}

/// A curated multi-word phrase, stored as its parts.
///
/// The joined width is only checked when the template is used, so stale
/// entries are skipped rather than rejected at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseTemplate {
    parts: Vec<String>,
}

impl PhraseTemplate {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Character count of the parts joined by single spaces.
    pub fn width(&self) -> usize {
        let letters: usize = self.parts.iter().map(|p| p.chars().count()).sum();
        letters + self.parts.len().saturating_sub(1)
    }

    pub fn text(&self) -> String {
        self.parts.join(" ")
    }
}

impl fmt::Display for PhraseTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A prefix/suffix pair glued together without a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundPair {
    pub prefix: String,
    pub suffix: String,
}

impl CompoundPair {
    pub fn width(&self) -> usize {
        self.prefix.chars().count() + self.suffix.chars().count()
    }

    pub fn joined(&self) -> String {
        let mut word = String::with_capacity(self.prefix.len() + self.suffix.len());
        word.push_str(&self.prefix);
        word.push_str(&self.suffix);
        word
    }
}

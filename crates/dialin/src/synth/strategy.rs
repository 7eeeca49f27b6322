use core::fmt;

use crate::PHRASE_LENGTH;

/// One way of building a candidate phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// A curated multi-word template.
    Template,
    /// A single dictionary word of exactly the phrase length.
    SingleWord,
    /// A curated prefix and suffix glued together.
    Compound,
    /// Words of fixed lengths joined by spaces.
    Pattern,
    /// An adjective/noun pair, or failing that a pronounceable pseudo-word.
    Fallback,
}

impl Strategy {
    /// Cascade order for the common, multi-word case.
    pub const MULTI_WORD_CASCADE: [Self; 4] =
        [Self::Template, Self::Compound, Self::Pattern, Self::Fallback];

    /// Cascade order when the single-word roll wins.
    pub const SINGLE_WORD_CASCADE: [Self; 5] = [
        Self::SingleWord,
        Self::Template,
        Self::Compound,
        Self::Pattern,
        Self::Fallback,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::SingleWord => "single_word",
            Self::Compound => "compound",
            Self::Pattern => "pattern",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Word-length partitions for the pattern strategy. Each fills a phrase
/// exactly once the single spaces between words are counted.
pub const PATTERN_PARTITIONS: &[&[usize]] = &[
    &[3, 6],
    &[4, 5],
    &[5, 4],
    &[6, 3],
    &[2, 7],
    &[7, 2],
    &[2, 2, 4],
    &[2, 3, 3],
    &[3, 2, 3],
    &[3, 3, 2],
    &[4, 2, 2],
    &[1, 2, 2, 2],
];

/// Width of a phrase built from words of the given lengths.
pub const fn partition_width(parts: &[usize]) -> usize {
    let mut width = 0;
    let mut i = 0;
    while i < parts.len() {
        width += parts[i];
        i += 1;
    }
    width + parts.len().saturating_sub(1)
}

const fn partitions_fill_phrase(partitions: &[&[usize]]) -> bool {
    let mut i = 0;
    while i < partitions.len() {
        if partition_width(partitions[i]) != PHRASE_LENGTH {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(partitions_fill_phrase(PATTERN_PARTITIONS));

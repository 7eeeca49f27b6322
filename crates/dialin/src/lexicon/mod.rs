//! The canonical word data behind every synthesized phrase.
//!
//! One versioned text source feeds all strategies. It is compiled into the
//! crate (see [`Lexicon::embedded`]) and can be replaced at runtime with
//! [`Lexicon::load`]. A loaded lexicon is never mutated.

mod entry;
mod parse;

pub use entry::*;

use std::{collections::BTreeMap, fs, path::Path};

use crate::{Error, Result};

/// The lexicon shipped with the crate.
pub const EMBEDDED_LEXICON: &str = include_str!("../../data/lexicon.txt");

/// Lexicon format version this crate understands.
pub const LEXICON_VERSION: u32 = 1;

/// Immutable word tables indexed by exact length.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    version: u32,
    entries: Vec<LexiconEntry>,
    by_length: BTreeMap<usize, Vec<usize>>,
    templates: Vec<PhraseTemplate>,
    compounds: Vec<CompoundPair>,
    adjectives: Vec<String>,
    nouns: Vec<String>,
}

impl Lexicon {
    /// Parses the lexicon compiled into the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is malformed, which the test suite
    /// guards against.
    pub fn embedded() -> Result<Self> {
        EMBEDDED_LEXICON.parse()
    }

    /// Reads and parses a lexicon file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LexiconIo`] if the file cannot be read and
    /// [`Error::Lexicon`] if its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::LexiconIo {
            path: path.to_path_buf(),
            source,
        })?;
        source.parse()
    }

    pub const fn version(&self) -> u32 {
        self.version
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Words of exactly `length` characters, in source order.
    pub fn of_length(&self, length: usize) -> impl Iterator<Item = &LexiconEntry> + '_ {
        self.by_length
            .get(&length)
            .into_iter()
            .flatten()
            .map(|&index| &self.entries[index])
    }

    /// Words whose length falls into `class`.
    pub fn of_class(&self, class: LengthClass) -> impl Iterator<Item = &LexiconEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.length_class() == class)
    }

    pub fn templates(&self) -> &[PhraseTemplate] {
        &self.templates
    }

    pub fn compounds(&self) -> &[CompoundPair] {
        &self.compounds
    }

    pub fn adjectives(&self) -> &[String] {
        &self.adjectives
    }

    pub fn nouns(&self) -> &[String] {
        &self.nouns
    }

    /// Every `adjective noun` combination exactly `width` characters wide.
    pub fn adjective_noun_pairs(&self, width: usize) -> impl Iterator<Item = String> + '_ {
        self.adjectives.iter().flat_map(move |adjective| {
            self.nouns
                .iter()
                .filter(move |noun| adjective.len() + 1 + noun.len() == width)
                .map(move |noun| format!("{adjective} {noun}"))
        })
    }

    fn push_word(&mut self, word: String) {
        let entry = LexiconEntry::new(word);
        self.by_length
            .entry(entry.length())
            .or_default()
            .push(self.entries.len());
        self.entries.push(entry);
    }
}

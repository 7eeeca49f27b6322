#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CompoundPair, Lexicon, PATTERN_PARTITIONS, PHRASE_LENGTH, PhraseTemplate, RandSource,
    RandSourceExt, Result, Strategy, SynthConfig, UsedPhrases, is_valid,
};

const CONSONANTS: &[u8] = b"bcdfghjklmnprstvwz";
const VOWELS: &[u8] = b"aeiou";

/// A phrase together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Synthesized {
    pub phrase: String,
    pub strategy: Strategy,
}

/// The outcome of a batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub requested: usize,
    pub phrases: Vec<Synthesized>,
}

impl Batch {
    /// Requested phrases that could not be produced.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.phrases.len())
    }
}

/// Builds phrases from a lexicon with a pluggable random source.
///
/// The synthesizer never mutates the lexicon or the used-phrase set it is
/// given; [`Self::synthesize_batch`] is the one place that records accepted
/// phrases, so a batch cannot repeat itself.
///
/// # Example
/// ```
/// use dialin::{Lexicon, PhraseSynthesizer, SeededRandom, SynthConfig, UsedPhrases, is_valid};
///
/// let lexicon = Lexicon::embedded().unwrap();
/// let synth = PhraseSynthesizer::new(&lexicon, SeededRandom::new(7), SynthConfig::default()).unwrap();
///
/// let mut used = UsedPhrases::new();
/// let batch = synth.synthesize_batch(5, &mut used);
/// assert_eq!(batch.phrases.len(), 5);
/// assert_eq!(used.len(), 5);
/// ```
#[derive(Debug)]
pub struct PhraseSynthesizer<'a, R> {
    lexicon: &'a Lexicon,
    rng: R,
    config: SynthConfig,
}

impl<'a, R> PhraseSynthesizer<'a, R>
where
    R: RandSource<u64>,
{
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if `config` does not validate.
    pub fn new(lexicon: &'a Lexicon, rng: R, config: SynthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lexicon,
            rng,
            config,
        })
    }

    pub const fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Runs one cascade and returns the first valid, unused candidate.
    ///
    /// Returns `None` only when every strategy comes up empty, which in
    /// practice means the pseudo-word drawn by the fallback collided.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn synthesize(&self, used: &UsedPhrases) -> Option<Synthesized> {
        let cascade: &[Strategy] = if self.rng.chance(self.config.single_word_weight) {
            &Strategy::SINGLE_WORD_CASCADE
        } else {
            &Strategy::MULTI_WORD_CASCADE
        };

        cascade.iter().find_map(|&strategy| {
            self.attempt(strategy, used)
                .map(|phrase| Synthesized { phrase, strategy })
        })
    }

    /// Runs a single strategy.
    pub fn attempt(&self, strategy: Strategy, used: &UsedPhrases) -> Option<String> {
        match strategy {
            Strategy::Template => self.from_template(used),
            Strategy::SingleWord => self.single_word(used),
            Strategy::Compound => self.compound(used),
            Strategy::Pattern => self.pattern(used),
            Strategy::Fallback => self.fallback(used),
        }
    }

    /// Produces up to `count` phrases, recording each in `used` as it is
    /// accepted.
    ///
    /// Each phrase gets [`SynthConfig::max_attempts`] cascade runs; a phrase
    /// that exhausts them is skipped and shows up in [`Batch::shortfall`].
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, used)))]
    pub fn synthesize_batch(&self, count: usize, used: &mut UsedPhrases) -> Batch {
        let mut phrases = Vec::with_capacity(count);

        for _ in 0..count {
            let found = (0..self.config.max_attempts).find_map(|_| self.synthesize(used));
            match found {
                Some(found) => {
                    used.insert(&found.phrase);
                    phrases.push(found);
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempts = self.config.max_attempts,
                        "No unused phrase found within the attempt budget"
                    );
                }
            }
        }

        Batch {
            requested: count,
            phrases,
        }
    }

    fn from_template(&self, used: &UsedPhrases) -> Option<String> {
        let candidates = self
            .lexicon
            .templates()
            .iter()
            .filter(|template| template.width() == PHRASE_LENGTH)
            .map(PhraseTemplate::text)
            .filter(|text| is_valid(text, used))
            .collect();
        self.pick(candidates)
    }

    fn single_word(&self, used: &UsedPhrases) -> Option<String> {
        let candidates: Vec<&str> = self
            .lexicon
            .of_length(PHRASE_LENGTH)
            .map(|entry| entry.word())
            .filter(|word| is_valid(word, used))
            .collect();
        self.rng.choose(&candidates).map(|word| (*word).to_owned())
    }

    /// Walks every curated pair once, starting at a random offset.
    fn compound(&self, used: &UsedPhrases) -> Option<String> {
        let pairs = self.lexicon.compounds();
        if pairs.is_empty() {
            return None;
        }
        let (tail, head) = pairs.split_at(self.rng.below(pairs.len()));
        head.iter()
            .chain(tail)
            .filter(|pair| pair.width() == PHRASE_LENGTH)
            .map(CompoundPair::joined)
            .find(|word| is_valid(word, used))
    }

    fn pattern(&self, used: &UsedPhrases) -> Option<String> {
        for _ in 0..self.config.pattern_retries {
            let partition = self.rng.choose(PATTERN_PARTITIONS)?;
            if let Some(candidate) = self.fill_partition(partition) {
                if is_valid(&candidate, used) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn fill_partition(&self, partition: &[usize]) -> Option<String> {
        let mut words = Vec::with_capacity(partition.len());
        for &length in partition {
            let options: Vec<&str> = self
                .lexicon
                .of_length(length)
                .map(|entry| entry.word())
                .collect();
            words.push(*self.rng.choose(&options)?);
        }
        Some(words.join(" "))
    }

    fn fallback(&self, used: &UsedPhrases) -> Option<String> {
        let pairs = self
            .lexicon
            .adjective_noun_pairs(PHRASE_LENGTH)
            .filter(|pair| is_valid(pair, used))
            .collect();
        if let Some(pair) = self.pick(pairs) {
            return Some(pair);
        }

        let word = self.pseudo_word();
        is_valid(&word, used).then_some(word)
    }

    /// Alternating consonants and vowels, exactly one phrase long.
    pub fn pseudo_word(&self) -> String {
        let consonant_first = self.rng.chance(0.5);
        (0..PHRASE_LENGTH)
            .map(|i| {
                let pool = if (i % 2 == 0) == consonant_first {
                    CONSONANTS
                } else {
                    VOWELS
                };
                char::from(pool[self.rng.below(pool.len())])
            })
            .collect()
    }

    fn pick(&self, mut candidates: Vec<String>) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.below(candidates.len());
        Some(candidates.swap_remove(index))
    }
}

//! Syntactic checks every phrase must pass before it reaches the ledger.
//!
//! A phrase is exactly [`PHRASE_LENGTH`] characters, spaces included, drawn
//! from ASCII letters, digits and the space character, and not used before
//! (case-insensitively). The checks run in that order and the first failure
//! is reported.

use chrono::NaiveDate;
use thiserror::Error;

use crate::UsedPhrases;

/// Number of characters in every phrase, spaces included.
pub const PHRASE_LENGTH: usize = 10;

/// Why a candidate phrase was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Rejection {
    /// The candidate is not exactly [`PHRASE_LENGTH`] characters.
    #[error("expected {} characters, found {length}", PHRASE_LENGTH)]
    WrongLength { length: usize },

    /// The candidate contains something other than a letter, digit or space.
    #[error("character {character:?} at position {position} is not a letter, digit or space")]
    DisallowedCharacter { character: char, position: usize },

    /// The candidate is already on record.
    #[error("{phrase:?} has already been used")]
    Duplicate { phrase: String },

    /// The candidate starts or ends with a space, which the ledger format
    /// cannot store.
    #[error("{phrase:?} starts or ends with a space")]
    SurroundingSpace { phrase: String },

    /// An explicit date was requested but already carries a phrase.
    #[error("{date} already has a phrase")]
    DateTaken { date: NaiveDate },
}

/// Returns `true` for the characters a phrase may contain.
pub const fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Checks `candidate` against the length, character-set and uniqueness rules.
///
/// # Errors
///
/// Returns the first rule the candidate breaks.
///
/// # Example
/// ```
/// use dialin::{Rejection, UsedPhrases, validate};
///
/// let mut used = UsedPhrases::new();
/// assert!(validate("helloworld", &used).is_ok());
/// assert_eq!(validate("hello!", &used), Err(Rejection::WrongLength { length: 6 }));
///
/// used.insert("helloworld");
/// assert!(matches!(validate("HelloWorld", &used), Err(Rejection::Duplicate { .. })));
/// ```
pub fn validate(candidate: &str, used: &UsedPhrases) -> Result<(), Rejection> {
    let length = candidate.chars().count();
    if length != PHRASE_LENGTH {
        return Err(Rejection::WrongLength { length });
    }

    if let Some((position, character)) = candidate
        .chars()
        .enumerate()
        .find(|&(_, c)| !is_allowed_char(c))
    {
        return Err(Rejection::DisallowedCharacter {
            character,
            position,
        });
    }

    if used.contains(candidate) {
        return Err(Rejection::Duplicate {
            phrase: candidate.to_owned(),
        });
    }

    Ok(())
}

/// Boolean form of [`validate`].
pub fn is_valid(candidate: &str, used: &UsedPhrases) -> bool {
    validate(candidate, used).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_every_length_but_ten() {
        let used = UsedPhrases::new();
        for length in (0..30).filter(|&n| n != PHRASE_LENGTH) {
            let candidate = "a".repeat(length);
            assert_eq!(
                validate(&candidate, &used),
                Err(Rejection::WrongLength { length })
            );
        }
        assert!(is_valid(&"a".repeat(PHRASE_LENGTH), &used));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let used = UsedPhrases::new();
        // 10 chars, 11 bytes: passes the length rule, fails the charset rule.
        assert_eq!(
            validate("caf\u{e9} latte", &used),
            Err(Rejection::DisallowedCharacter {
                character: '\u{e9}',
                position: 3
            })
        );
    }

    #[test]
    fn rejects_disallowed_characters_at_full_length() {
        let used = UsedPhrases::new();
        for candidate in ["hello,worl", "top-shelf!", "tab\there12", "new\nline12", "under_scor"] {
            let candidate: String = candidate.chars().take(PHRASE_LENGTH).collect();
            assert_eq!(candidate.chars().count(), PHRASE_LENGTH);
            assert!(
                matches!(
                    validate(&candidate, &used),
                    Err(Rejection::DisallowedCharacter { .. })
                ),
                "{candidate:?} should be refused"
            );
        }
    }

    #[test]
    fn spaces_are_checked_per_character() {
        let used = UsedPhrases::new();
        assert!(is_valid("  spaced  ", &used));
        assert!(is_valid("a  b    cd", &used));
        assert!(is_valid("room 101 b", &used));
    }

    #[test]
    fn length_is_checked_before_charset() {
        let used = UsedPhrases::new();
        assert_eq!(
            validate("hello!", &used),
            Err(Rejection::WrongLength { length: 6 })
        );
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut used = UsedPhrases::new();
        assert!(is_valid("helloworld", &used));
        used.insert("helloworld");
        assert_eq!(
            validate("HELLOWORLD", &used),
            Err(Rejection::Duplicate {
                phrase: "HELLOWORLD".to_owned()
            })
        );
        assert!(!is_valid("helloworld", &used));
    }
}

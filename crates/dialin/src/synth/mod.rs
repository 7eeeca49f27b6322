//! Phrase synthesis.
//!
//! A [`PhraseSynthesizer`] turns a [`crate::Lexicon`], a snapshot of used
//! phrases and a [`crate::RandSource`] into at most one new phrase per call,
//! walking a cascade of [`Strategy`]s until one yields a candidate that
//! passes [`crate::validate`]. With a seeded random source the result is
//! fully reproducible.

mod config;
mod strategy;
mod synthesizer;

pub use config::*;
pub use strategy::*;
pub use synthesizer::*;

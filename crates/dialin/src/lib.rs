#![doc = include_str!("../README.md")]

mod calendar;
mod error;
mod ledger;
mod lexicon;
mod rand;
mod sequencer;
mod supply;
mod synth;
mod used;
mod validator;

pub use crate::calendar::*;
pub use crate::error::*;
pub use crate::ledger::*;
pub use crate::lexicon::*;
pub use crate::rand::*;
pub use crate::sequencer::*;
pub use crate::supply::*;
pub use crate::synth::*;
pub use crate::used::*;
pub use crate::validator::*;

pub mod commands;
pub mod config;
pub mod runner;
pub mod telemetry;

use anyhow::Context;
use dialin::{
    DateSource, FixedDate, Ledger, Lexicon, LocalCalendar, PhraseSupply, RandSource, SeededRandom,
    ThreadRandom,
};

use config::SchedulerConfig;

/// The supply pipeline with its randomness and calendar picked at runtime.
pub type Supply = PhraseSupply<Box<dyn RandSource<u64>>, Box<dyn DateSource>>;

pub fn build_supply(config: &SchedulerConfig) -> anyhow::Result<Supply> {
    let lexicon = match &config.lexicon {
        Some(path) => Lexicon::load(path)
            .with_context(|| format!("failed to load lexicon from {}", path.display()))?,
        None => Lexicon::embedded().context("embedded lexicon failed to parse")?,
    };

    let rng: Box<dyn RandSource<u64>> = match config.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let calendar: Box<dyn DateSource> = match config.today {
        Some(today) => Box::new(FixedDate(today)),
        None => Box::new(LocalCalendar),
    };

    PhraseSupply::new(
        Ledger::new(&config.ledger),
        lexicon,
        rng,
        calendar,
        config.supply,
    )
    .context("invalid supply configuration")
}

use core::cell::RefCell;

use crate::RandSource;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A reproducible `RandSource` backed by a seeded [`StdRng`].
///
/// Two sources built from the same seed yield the same sequence, which makes
/// a whole generation run replayable. Not `Sync`; use one per thread.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: RefCell<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandSource<u64> for SeededRandom {
    fn rand(&self) -> u64 {
        self.rng.borrow_mut().random()
    }
}

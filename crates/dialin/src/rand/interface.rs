/// A trait for random sources that return random integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. The phrase synthesizer only ever asks for `u64`.
///
/// # Example
/// ```
/// use dialin::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u64> for FixedRand {
///     fn rand(&self) -> u64 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}

impl<T, R> RandSource<T> for &R
where
    R: RandSource<T> + ?Sized,
{
    fn rand(&self) -> T {
        (**self).rand()
    }
}

impl<T, R> RandSource<T> for Box<R>
where
    R: RandSource<T> + ?Sized,
{
    fn rand(&self) -> T {
        (**self).rand()
    }
}

/// Draw helpers built on a raw `u64` source.
///
/// Modulo reduction is used for bounded draws; the bias is irrelevant at
/// lexicon sizes.
pub trait RandSourceExt: RandSource<u64> {
    /// Returns an index in `0..bound`. `bound` must be non-zero.
    fn below(&self, bound: usize) -> usize {
        debug_assert!(bound > 0, "bound must be non-zero");
        (self.rand() % bound as u64) as usize
    }

    /// Returns `true` with the given probability.
    fn chance(&self, probability: f64) -> bool {
        // 53 high bits give a uniform f64 in [0, 1).
        let unit = (self.rand() >> 11) as f64 / (1_u64 << 53) as f64;
        unit < probability
    }

    /// Picks one element uniformly, or `None` when `items` is empty.
    fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }
}

impl<R> RandSourceExt for R where R: RandSource<u64> + ?Sized {}

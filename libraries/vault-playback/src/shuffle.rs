//! Shuffle generator for play-order randomization
//!
//! Produces a uniform random permutation of catalog indices with the
//! Fisher-Yates swap. The randomness source is a swappable strategy so tests
//! can pin a seed while production draws from the thread RNG.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Source of random play orders
pub trait ShuffleStrategy: Send + Sync + fmt::Debug {
    /// A permutation of `[0, len)`
    fn permutation(&self, len: usize) -> Vec<usize>;
}

/// Fisher-Yates over `[0, len)`
///
/// Walks from the last slot down to slot 1, swapping each with a uniformly
/// chosen slot at or before it, so each of the `len!` orders is equally likely.
pub fn shuffle_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    for current in (1..len).rev() {
        let chosen = rng.gen_range(0..=current);
        order.swap(current, chosen);
    }
    order
}

/// Non-deterministic production strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngShuffle;

impl ShuffleStrategy for ThreadRngShuffle {
    fn permutation(&self, len: usize) -> Vec<usize> {
        shuffle_order(len, &mut thread_rng())
    }
}

/// Reproducible strategy driven by a fixed seed
///
/// Successive calls continue the same RNG stream, so a sequence of shuffles
/// is reproducible as a whole.
pub struct SeededShuffle {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededShuffle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededShuffle")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl ShuffleStrategy for SeededShuffle {
    fn permutation(&self, len: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle_order(len, &mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn is_permutation(order: &[usize]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..order.len()).collect::<Vec<_>>()
    }

    #[test]
    fn empty_and_single_orders() {
        let strategy = SeededShuffle::new(1);
        assert!(strategy.permutation(0).is_empty());
        assert_eq!(strategy.permutation(1), vec![0]);
    }

    #[test]
    fn random_shuffle_preserves_all_indices() {
        let order = ThreadRngShuffle.permutation(25);
        assert_eq!(order.len(), 25);
        assert!(is_permutation(&order));
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededShuffle::new(42);
        let b = SeededShuffle::new(42);
        for _ in 0..5 {
            assert_eq!(a.permutation(10), b.permutation(10));
        }
    }

    #[test]
    fn successive_calls_draw_fresh_orders() {
        let strategy = SeededShuffle::new(7);
        let orders: Vec<Vec<usize>> = (0..10).map(|_| strategy.permutation(8)).collect();
        // 10 draws out of 8! orders: at least two must differ
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn small_orders_are_near_uniform() {
        let strategy = SeededShuffle::new(2024);
        let trials = 6000;
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(strategy.permutation(3)).or_default() += 1;
        }

        // all 3! orders appear, each close to trials / 6 = 1000
        assert_eq!(counts.len(), 6);
        for (order, count) in &counts {
            assert!(
                (800..=1200).contains(count),
                "order {:?} drawn {} times",
                order,
                count
            );
        }
    }
}

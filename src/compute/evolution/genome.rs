//! Genome encodings and the random source threaded through every operator.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::*;

use crate::schema::Bounds;

/// Random number generator shared by every operator of a run.
///
/// Operators draw from this one source in a fixed order, so a seed fully
/// determines the run.
#[derive(Debug, Clone)]
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed derived from the wall clock.
    pub fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }

    /// Uniform sample in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Uniform sample in `[lower, upper]`.
    pub fn uniform_in(&mut self, bounds: Bounds) -> f64 {
        self.rng.gen_range(bounds.lower..=bounds.upper)
    }

    /// Standard normal sample.
    pub fn normal(&mut self) -> f64 {
        self.rng.sample(rand_distr::StandardNormal)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Bernoulli trial.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }
}

/// Fixed-length sequence of boolean genes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitString(pub Vec<bool>);

impl BitString {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of set genes.
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&bit| bit).count()
    }
}

/// Fixed-length sequence of real genes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RealVector(pub Vec<f64>);

impl RealVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every gene lies inside `bounds`.
    pub fn within(&self, bounds: Bounds) -> bool {
        self.0.iter().all(|&x| bounds.contains(x))
    }
}

/// Builds a fresh random genome.
pub trait Initializer<G> {
    fn initialize(&self, rng: &mut GenomeRng) -> G;
}

/// Fair-coin bitstrings of a fixed length.
#[derive(Debug, Clone)]
pub struct BitStringInit {
    pub length: usize,
}

impl Initializer<BitString> for BitStringInit {
    fn initialize(&self, rng: &mut GenomeRng) -> BitString {
        BitString((0..self.length).map(|_| rng.chance(0.5)).collect())
    }
}

/// Real vectors sampled uniformly inside the domain.
#[derive(Debug, Clone)]
pub struct UniformRealInit {
    pub length: usize,
    pub bounds: Bounds,
}

impl Initializer<RealVector> for UniformRealInit {
    fn initialize(&self, rng: &mut GenomeRng) -> RealVector {
        RealVector((0..self.length).map(|_| rng.uniform_in(self.bounds)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GenomeRng::new(42);
        let mut b = GenomeRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn test_bitstring_init() {
        let mut rng = GenomeRng::new(42);
        let init = BitStringInit { length: 10_000 };
        let genome = init.initialize(&mut rng);

        assert_eq!(genome.len(), 10_000);
        // Roughly half the bits set.
        let ones = genome.count_ones();
        assert!((4_500..=5_500).contains(&ones), "ones = {}", ones);
    }

    #[test]
    fn test_real_init_within_bounds() {
        let mut rng = GenomeRng::new(42);
        let bounds = Bounds::new(-5.12, 5.12);
        let init = UniformRealInit {
            length: 1024,
            bounds,
        };
        let genome = init.initialize(&mut rng);

        assert_eq!(genome.len(), 1024);
        assert!(genome.within(bounds));
        // Not degenerate.
        assert!(genome.0.iter().any(|&x| x < 0.0));
        assert!(genome.0.iter().any(|&x| x > 0.0));
    }

    #[test]
    fn test_index_in_range() {
        let mut rng = GenomeRng::new(7);
        for _ in 0..1000 {
            assert!(rng.index(3) < 3);
        }
    }
}

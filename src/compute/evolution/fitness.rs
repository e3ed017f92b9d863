//! Benchmark fitness functions.
//!
//! Every evaluator maps a genome to a fitness to maximize. Real-valued
//! evaluators also report the raw objective they normalized, which the
//! engine feeds into its best/worst trackers.

use crate::schema::Bounds;

use super::genome::{BitString, RealVector};

/// Rosenbrock raw values are capped here before normalization.
pub const ROSENBROCK_WORST_RAW: f64 = 1e10;

/// Per-dimension normalization scale for Rosenbrock.
const ROSENBROCK_SCALE: f64 = 40_000.0;

/// Schwefel offset per dimension.
const SCHWEFEL_OFFSET: f64 = 418.9829;

/// Outcome of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Fitness to maximize.
    pub fitness: f64,
    /// Unnormalized objective, for real-valued problems.
    pub raw: Option<f64>,
}

impl Evaluation {
    pub fn fitness(fitness: f64) -> Self {
        Self { fitness, raw: None }
    }

    /// Normalize a minimization objective into a `[0, 1]` fitness.
    pub fn normalized(raw: f64, fmax: f64) -> Self {
        let fitness = (1.0 - raw / fmax).clamp(0.0, 1.0);
        Self {
            fitness: if fitness.is_nan() { 0.0 } else { fitness },
            raw: Some(raw),
        }
    }
}

/// Maps a genome to its fitness. Must be a pure function of the genome.
pub trait Evaluator<G> {
    fn evaluate(&self, genome: &G) -> Evaluation;
}

/// Count of set bits.
#[derive(Debug, Clone, Default)]
pub struct OneMax;

impl Evaluator<BitString> for OneMax {
    fn evaluate(&self, genome: &BitString) -> Evaluation {
        Evaluation::fitness(genome.count_ones() as f64)
    }
}

/// Sum of squares, normalized by `length * magnitude^2`.
#[derive(Debug, Clone)]
pub struct Sphere {
    fmax: f64,
}

impl Sphere {
    pub fn new(length: usize, bounds: Bounds) -> Self {
        // Largest |gene| over the domain, which is `upper` only when symmetric.
        Self {
            fmax: length as f64 * bounds.magnitude().powi(2),
        }
    }

    pub fn fmax(&self) -> f64 {
        self.fmax
    }
}

impl Evaluator<RealVector> for Sphere {
    fn evaluate(&self, genome: &RealVector) -> Evaluation {
        let raw: f64 = genome.0.iter().map(|x| x * x).sum();
        Evaluation::normalized(raw, self.fmax)
    }
}

/// Rosenbrock valley over adjacent gene pairs.
#[derive(Debug, Clone)]
pub struct Rosenbrock {
    fmax: f64,
}

impl Rosenbrock {
    pub fn new(length: usize) -> Self {
        Self {
            fmax: length as f64 * ROSENBROCK_SCALE,
        }
    }

    pub fn fmax(&self) -> f64 {
        self.fmax
    }

    /// Unnormalized objective, capped at [`ROSENBROCK_WORST_RAW`].
    pub fn raw(genes: &[f64]) -> f64 {
        let raw: f64 = genes
            .windows(2)
            .map(|pair| {
                let (x, next) = (pair[0], pair[1]);
                100.0 * (next - x * x).powi(2) + (x - 1.0).powi(2)
            })
            .sum();

        if raw.is_finite() {
            raw.min(ROSENBROCK_WORST_RAW)
        } else {
            ROSENBROCK_WORST_RAW
        }
    }
}

impl Evaluator<RealVector> for Rosenbrock {
    fn evaluate(&self, genome: &RealVector) -> Evaluation {
        Evaluation::normalized(Self::raw(&genome.0), self.fmax)
    }
}

/// Schwefel multimodal landscape, optimum near 420.9687 per gene.
#[derive(Debug, Clone)]
pub struct Schwefel {
    fmax: f64,
}

impl Schwefel {
    pub fn new(length: usize, bounds: Bounds) -> Self {
        let n = length as f64;
        Self {
            fmax: SCHWEFEL_OFFSET * n + n * bounds.upper,
        }
    }

    pub fn fmax(&self) -> f64 {
        self.fmax
    }
}

impl Evaluator<RealVector> for Schwefel {
    fn evaluate(&self, genome: &RealVector) -> Evaluation {
        let sum: f64 = genome.0.iter().map(|x| x * x.abs().sqrt().sin()).sum();
        let raw = SCHWEFEL_OFFSET * genome.len() as f64 - sum;
        let raw = if raw.is_finite() {
            raw.min(self.fmax)
        } else {
            self.fmax
        };
        Evaluation::normalized(raw, self.fmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::genome::{BitStringInit, GenomeRng, Initializer};

    #[test]
    fn test_onemax_counts_bits() {
        let genome = BitString(vec![true, false, true, true, false]);
        assert_eq!(OneMax.evaluate(&genome).fitness, 3.0);
        assert_eq!(OneMax.evaluate(&genome).raw, None);
    }

    #[test]
    fn test_onemax_range_over_samples() {
        let mut rng = GenomeRng::new(3);
        let init = BitStringInit { length: 64 };
        let mut total = 0.0;
        for _ in 0..1000 {
            let genome = init.initialize(&mut rng);
            let fitness = OneMax.evaluate(&genome).fitness;
            assert!((0.0..=64.0).contains(&fitness));
            assert_eq!(fitness, genome.count_ones() as f64);
            total += fitness;
        }
        let mean = total / 1000.0;
        assert!((mean - 32.0).abs() < 1.0, "mean = {}", mean);
    }

    #[test]
    fn test_sphere_optimum() {
        let bounds = Bounds::new(-5.12, 5.12);
        let sphere = Sphere::new(4, bounds);
        let eval = sphere.evaluate(&RealVector(vec![0.0; 4]));
        assert_eq!(eval.fitness, 1.0);
        assert_eq!(eval.raw, Some(0.0));

        let worst = sphere.evaluate(&RealVector(vec![5.12; 4]));
        assert!(worst.fitness.abs() < 1e-12);
    }

    #[test]
    fn test_sphere_fmax_uses_largest_magnitude() {
        assert_eq!(Sphere::new(3, Bounds::new(-2.0, 2.0)).fmax(), 12.0);
        // Upper bound alone would give zero here.
        let sphere = Sphere::new(2, Bounds::new(-3.0, 0.0));
        assert_eq!(sphere.fmax(), 18.0);
        assert_eq!(sphere.evaluate(&RealVector(vec![-3.0, -3.0])).fitness, 0.0);
    }

    #[test]
    fn test_rosenbrock_optimum() {
        let rosenbrock = Rosenbrock::new(8);
        let eval = rosenbrock.evaluate(&RealVector(vec![1.0; 8]));
        assert_eq!(eval.raw, Some(0.0));
        assert_eq!(eval.fitness, 1.0);
    }

    #[test]
    fn test_rosenbrock_known_value() {
        // 100 * (0 - 0)^2 + (0 - 1)^2 = 1 for the single pair.
        assert_eq!(Rosenbrock::raw(&[0.0, 0.0]), 1.0);
        // Single gene has no adjacent pairs.
        assert_eq!(Rosenbrock::raw(&[3.0]), 0.0);
    }

    #[test]
    fn test_rosenbrock_caps_extreme_values() {
        let raw = Rosenbrock::raw(&[1e200, -1e200, 1e200]);
        assert_eq!(raw, ROSENBROCK_WORST_RAW);

        let eval = Rosenbrock::new(3).evaluate(&RealVector(vec![f64::NAN, 1.0, 1.0]));
        assert_eq!(eval.raw, Some(ROSENBROCK_WORST_RAW));
        assert!((0.0..=1.0).contains(&eval.fitness));
    }

    #[test]
    fn test_schwefel_near_optimum() {
        let bounds = Bounds::new(-500.0, 500.0);
        let schwefel = Schwefel::new(10, bounds);
        let eval = schwefel.evaluate(&RealVector(vec![420.9687; 10]));
        assert!(eval.raw.unwrap().abs() < 1e-3);
        assert!(eval.fitness > 0.999_999);

        let far = schwefel.evaluate(&RealVector(vec![-420.9687; 10]));
        assert!(far.fitness < eval.fitness);
    }

    #[test]
    fn test_normalized_is_clamped() {
        assert_eq!(Evaluation::normalized(-1.0, 10.0).fitness, 1.0);
        assert_eq!(Evaluation::normalized(100.0, 10.0).fitness, 0.0);
        assert_eq!(Evaluation::normalized(f64::NAN, 10.0).fitness, 0.0);
    }
}

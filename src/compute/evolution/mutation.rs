//! Unary variation operators.

use crate::schema::Bounds;

use super::genome::{BitString, GenomeRng, RealVector};

/// Gaussian step size as a fraction of the domain width.
const GAUSSIAN_SIGMA_FRACTION: f64 = 0.1;

/// Mutates a genome in place.
pub trait Mutation<G> {
    /// Returns `true` if any gene was touched.
    fn mutate(&self, genome: &mut G, rng: &mut GenomeRng) -> bool;
}

/// Flips each bit independently.
#[derive(Debug, Clone)]
pub struct BitFlipMutation {
    pub probability: f64,
}

impl Mutation<BitString> for BitFlipMutation {
    fn mutate(&self, genome: &mut BitString, rng: &mut GenomeRng) -> bool {
        let mut mutated = false;
        for bit in genome.0.iter_mut() {
            if rng.chance(self.probability) {
                *bit = !*bit;
                mutated = true;
            }
        }
        mutated
    }
}

/// Gaussian noise gated first per individual, then per gene.
#[derive(Debug, Clone)]
pub struct GaussianMutation {
    pub individual_probability: f64,
    pub gene_probability: f64,
    pub sigma: f64,
    pub bounds: Bounds,
}

impl GaussianMutation {
    /// Sigma is a tenth of the domain width.
    pub fn new(individual_probability: f64, gene_probability: f64, bounds: Bounds) -> Self {
        Self {
            individual_probability,
            gene_probability,
            sigma: bounds.width() * GAUSSIAN_SIGMA_FRACTION,
            bounds,
        }
    }
}

impl Mutation<RealVector> for GaussianMutation {
    fn mutate(&self, genome: &mut RealVector, rng: &mut GenomeRng) -> bool {
        if !rng.chance(self.individual_probability) {
            return false;
        }

        let mut mutated = false;
        for gene in genome.0.iter_mut() {
            if rng.chance(self.gene_probability) {
                *gene = self.bounds.clamp(*gene + rng.normal() * self.sigma);
                mutated = true;
            }
        }
        mutated
    }
}

/// Polynomial mutation scaled by the domain width.
#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    pub probability: f64,
    pub eta: f64,
    pub bounds: Bounds,
}

impl PolynomialMutation {
    pub fn new(probability: f64, eta: f64, bounds: Bounds) -> Self {
        Self {
            probability,
            eta,
            bounds,
        }
    }

    /// Signed perturbation in `[-1, 1]` for a uniform draw `u`.
    fn delta(&self, u: f64) -> f64 {
        let exponent = 1.0 / (self.eta + 1.0);
        if u < 0.5 {
            (2.0 * u).powf(exponent) - 1.0
        } else {
            1.0 - (2.0 * (1.0 - u)).powf(exponent)
        }
    }
}

impl Mutation<RealVector> for PolynomialMutation {
    fn mutate(&self, genome: &mut RealVector, rng: &mut GenomeRng) -> bool {
        let width = self.bounds.width();
        let mut mutated = false;
        for gene in genome.0.iter_mut() {
            if rng.chance(self.probability) {
                let delta = self.delta(rng.uniform());
                *gene = self.bounds.clamp(*gene + delta * width);
                mutated = true;
            }
        }
        mutated
    }
}

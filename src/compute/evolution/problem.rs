//! Problem definitions: a genome encoding together with its operators.

use std::fmt;
use std::marker::PhantomData;

use crate::schema::{ProblemKind, RunConfig};

use super::crossover::{BoundedSbx, Crossover, SafeSbx, SinglePointCrossover};
use super::fitness::{Evaluation, Evaluator, OneMax, Rosenbrock, Schwefel, Sphere};
use super::genome::{BitString, BitStringInit, GenomeRng, Initializer, RealVector, UniformRealInit};
use super::mutation::{BitFlipMutation, GaussianMutation, Mutation, PolynomialMutation};

/// Everything the engine needs to evolve one genome type.
///
/// The engine only talks to genomes through this trait.
pub trait Problem {
    type Genome: Clone + fmt::Debug;

    /// Short name used in logs and results.
    fn name(&self) -> &'static str;

    fn initialize(&self, rng: &mut GenomeRng) -> Self::Genome;

    fn evaluate(&self, genome: &Self::Genome) -> Evaluation;

    /// Returns `false` if the parents were left unchanged.
    fn crossover(&self, a: &mut Self::Genome, b: &mut Self::Genome, rng: &mut GenomeRng) -> bool;

    /// Returns `true` if any gene was touched.
    fn mutate(&self, genome: &mut Self::Genome, rng: &mut GenomeRng) -> bool;

    /// Raw objective below which the run stops with `convergence`.
    fn convergence_threshold(&self) -> Option<f64> {
        None
    }
}

/// A problem assembled from an initializer, an evaluator and two operators.
pub struct GeneticProblem<G, I, E, C, M> {
    name: &'static str,
    initializer: I,
    evaluator: E,
    crossover: C,
    mutation: M,
    convergence_threshold: Option<f64>,
    _genome: PhantomData<fn() -> G>,
}

impl<G, I, E, C, M> GeneticProblem<G, I, E, C, M> {
    pub fn new(
        name: &'static str,
        initializer: I,
        evaluator: E,
        crossover: C,
        mutation: M,
    ) -> Self {
        Self {
            name,
            initializer,
            evaluator,
            crossover,
            mutation,
            convergence_threshold: None,
            _genome: PhantomData,
        }
    }

    /// Stop as soon as the raw objective drops below `threshold`.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = Some(threshold);
        self
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<G, I, E, C, M> Problem for GeneticProblem<G, I, E, C, M>
where
    G: Clone + fmt::Debug,
    I: Initializer<G>,
    E: Evaluator<G>,
    C: Crossover<G>,
    M: Mutation<G>,
{
    type Genome = G;

    fn name(&self) -> &'static str {
        self.name
    }

    fn initialize(&self, rng: &mut GenomeRng) -> G {
        self.initializer.initialize(rng)
    }

    fn evaluate(&self, genome: &G) -> Evaluation {
        self.evaluator.evaluate(genome)
    }

    fn crossover(&self, a: &mut G, b: &mut G, rng: &mut GenomeRng) -> bool {
        self.crossover.crossover(a, b, rng)
    }

    fn mutate(&self, genome: &mut G, rng: &mut GenomeRng) -> bool {
        self.mutation.mutate(genome, rng)
    }

    fn convergence_threshold(&self) -> Option<f64> {
        self.convergence_threshold
    }
}

/// OneMax: single-point crossover and bit-flip mutation.
pub type OneMaxProblem =
    GeneticProblem<BitString, BitStringInit, OneMax, SinglePointCrossover, BitFlipMutation>;

/// Sphere: bounded SBX and polynomial mutation.
pub type SphereProblem =
    GeneticProblem<RealVector, UniformRealInit, Sphere, BoundedSbx, PolynomialMutation>;

/// Rosenbrock: guarded SBX and two-level Gaussian mutation.
pub type RosenbrockProblem =
    GeneticProblem<RealVector, UniformRealInit, Rosenbrock, SafeSbx, GaussianMutation>;

/// Schwefel: guarded SBX and two-level Gaussian mutation.
pub type SchwefelProblem =
    GeneticProblem<RealVector, UniformRealInit, Schwefel, SafeSbx, GaussianMutation>;

impl OneMaxProblem {
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            ProblemKind::OneMax.name(),
            BitStringInit {
                length: config.genome_length,
            },
            OneMax,
            SinglePointCrossover,
            BitFlipMutation {
                probability: config.mutation_probability,
            },
        )
    }
}

impl SphereProblem {
    pub fn from_config(config: &RunConfig) -> Self {
        let bounds = config.effective_bounds();
        Self::new(
            ProblemKind::Sphere.name(),
            UniformRealInit {
                length: config.genome_length,
                bounds,
            },
            Sphere::new(config.genome_length, bounds),
            BoundedSbx::new(config.effective_crossover_distribution_index(), bounds),
            PolynomialMutation::new(
                config.mutation_probability,
                config.mutation_distribution_index,
                bounds,
            ),
        )
        .with_convergence_threshold(config.convergence_threshold)
    }
}

impl RosenbrockProblem {
    pub fn from_config(config: &RunConfig) -> Self {
        let bounds = config.effective_bounds();
        Self::new(
            ProblemKind::Rosenbrock.name(),
            UniformRealInit {
                length: config.genome_length,
                bounds,
            },
            Rosenbrock::new(config.genome_length),
            SafeSbx::new(config.effective_crossover_distribution_index(), bounds),
            GaussianMutation::new(
                config.mutation_probability,
                config.gene_mutation_probability,
                bounds,
            ),
        )
        .with_convergence_threshold(config.convergence_threshold)
    }
}

impl SchwefelProblem {
    pub fn from_config(config: &RunConfig) -> Self {
        let bounds = config.effective_bounds();
        Self::new(
            ProblemKind::Schwefel.name(),
            UniformRealInit {
                length: config.genome_length,
                bounds,
            },
            Schwefel::new(config.genome_length, bounds),
            SafeSbx::new(config.effective_crossover_distribution_index(), bounds),
            GaussianMutation::new(
                config.mutation_probability,
                config.gene_mutation_probability,
                bounds,
            ),
        )
        .with_convergence_threshold(config.convergence_threshold)
    }
}

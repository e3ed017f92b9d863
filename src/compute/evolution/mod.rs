//! Generational genetic algorithm over bit-string and real-vector genomes.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Genomes** (`genome`): Encodings, initializers and the seeded random source
//! - **Fitness** (`fitness`): OneMax, Sphere, Rosenbrock and Schwefel evaluators
//! - **Variation** (`crossover`, `mutation`): Recombination and perturbation operators
//! - **Selection** (`selection`): Deterministic binary tournament
//! - **Search** (`search`): The engine, its statistics and stop conditions
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_bench::schema::{ProblemKind, RunConfig};
//! use evo_bench::compute::evolution::{EvolutionEngine, SphereProblem};
//!
//! let config = RunConfig {
//!     problem: ProblemKind::Sphere,
//!     genome_length: 8,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(SphereProblem::from_config(&config), &config)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.6}",
//!         progress.generation, progress.best_fitness);
//! });
//!
//! println!("Stopped by {} after {} generations", result.termination_cause, result.generations);
//! # Ok::<(), evo_bench::schema::ConfigError>(())
//! ```
//!
//! # Operators
//!
//! - `SinglePointCrossover` / `BitFlipMutation`: OneMax
//! - `BoundedSbx` / `PolynomialMutation`: Sphere
//! - `SafeSbx` / `GaussianMutation`: Rosenbrock and Schwefel

mod crossover;
mod fitness;
mod genome;
mod mutation;
mod population;
mod problem;
mod search;
mod selection;
mod stats;
mod termination;

pub use crossover::{BoundedSbx, Crossover, SBX_GENE_EPSILON, SafeSbx, SinglePointCrossover};
pub use fitness::{
    Evaluation, Evaluator, OneMax, ROSENBROCK_WORST_RAW, Rosenbrock, Schwefel, Sphere,
};
pub use genome::{BitString, BitStringInit, GenomeRng, Initializer, RealVector, UniformRealInit};
pub use mutation::{BitFlipMutation, GaussianMutation, Mutation, PolynomialMutation};
pub use population::{Individual, Population};
pub use problem::{
    GeneticProblem, OneMaxProblem, Problem, RosenbrockProblem, SchwefelProblem, SphereProblem,
};
pub use search::{EvolutionEngine, run_config};
pub use selection::TournamentSelector;
pub use stats::RunStatistics;
pub use termination::TerminationPolicy;

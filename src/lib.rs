//! Evo Bench - Generational genetic algorithm benchmarks.
//!
//! This crate runs a classic generational GA (binary tournament, pairwise
//! crossover and mutation, full replacement) on four benchmark problems:
//! OneMax over bit strings, and Sphere, Rosenbrock and Schwefel over bounded
//! real vectors.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Run configuration and result types
//! - `compute`: Genomes, operators, evaluators and the evolution engine
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_bench::{
//!     schema::{ProblemKind, RunConfig},
//!     compute::run_config,
//! };
//!
//! let config = RunConfig {
//!     problem: ProblemKind::OneMax,
//!     genome_length: 64,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let result = run_config(&config)?;
//! println!(
//!     "{}: best {} after {} generations ({})",
//!     result.problem, result.best_fitness, result.generations, result.termination_cause
//! );
//! # Ok::<(), evo_bench::schema::ConfigError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, run_config};
pub use schema::{ConfigError, ProblemKind, RunConfig, RunResult, TerminationCause};

//! Compute module - Evolutionary search over benchmark problems.

pub mod evolution;

pub use evolution::{EvolutionEngine, run_config};

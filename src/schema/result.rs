//! Result and progress types produced by the evolution engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCause {
    /// Best fitness reached the target fitness.
    TargetReached,
    /// Wall-clock budget spent.
    Timeout,
    /// Generation cap reached.
    MaxGenerations,
    /// Raw objective dropped below the convergence threshold.
    Convergence,
    /// Caller-supplied generation budget ran out before any stop condition fired.
    Exhausted,
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TargetReached => "target_reached",
            Self::Timeout => "timeout",
            Self::MaxGenerations => "max_generations",
            Self::Convergence => "convergence",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Current phase of the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// Population not built yet.
    #[default]
    Initializing,
    /// Generations in progress.
    Running,
    /// Run finished, statistics frozen.
    Terminated,
}

/// Per-generation fitness history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FitnessHistory {
    /// Best fitness per generation (index 0 is the initial population).
    pub best_fitness: Vec<f64>,
    /// Mean fitness per generation.
    pub mean_fitness: Vec<f64>,
}

impl FitnessHistory {
    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Progress update passed to run callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// Completed generations.
    pub generation: usize,
    /// Generation cap.
    pub max_generations: usize,
    /// Best fitness seen so far.
    pub best_fitness: f64,
    /// Best fitness in the current population.
    pub generation_best: f64,
    /// Mean fitness of the current population.
    pub mean_fitness: f64,
    /// Lowest raw objective seen so far (real-valued problems).
    pub best_raw: Option<f64>,
    /// Highest raw objective seen so far (real-valued problems).
    pub worst_raw: Option<f64>,
    /// Seconds since the run started.
    pub elapsed_seconds: f64,
    pub phase: EnginePhase,
}

/// Final statistics snapshot of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    /// Problem name.
    pub problem: String,
    /// Seed the random source was built from.
    pub seed: u64,
    /// Best fitness in the initial population.
    pub initial_fitness: f64,
    /// Best fitness reached.
    pub best_fitness: f64,
    /// `best_fitness - initial_fitness`.
    pub fitness_delta: f64,
    /// Generation in which `best_fitness` was first reached.
    pub best_generation: usize,
    /// Generations executed.
    pub generations: usize,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
    pub termination_cause: TerminationCause,
    /// Lowest raw objective observed (real-valued problems).
    pub best_raw: Option<f64>,
    /// Highest raw objective observed (real-valued problems).
    pub worst_raw: Option<f64>,
    /// Fitness history for analysis.
    pub history: FitnessHistory,
}

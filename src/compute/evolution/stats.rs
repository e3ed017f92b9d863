//! Run statistics accumulated by the engine.

use crate::schema::{FitnessHistory, TerminationCause};

/// Aggregate owned by the engine and updated once per generation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    initial_fitness: f64,
    best_fitness: f64,
    best_generation: usize,
    best_raw: Option<f64>,
    worst_raw: Option<f64>,
    cause: Option<TerminationCause>,
    history: FitnessHistory,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self {
            initial_fitness: f64::NEG_INFINITY,
            best_fitness: f64::NEG_INFINITY,
            best_generation: 0,
            best_raw: None,
            worst_raw: None,
            cause: None,
            history: FitnessHistory::default(),
        }
    }
}

impl RunStatistics {
    /// Record the evaluated initial population.
    pub fn record_initial(&mut self, best: f64, mean: f64) {
        self.initial_fitness = best;
        self.best_fitness = best;
        self.best_generation = 0;
        self.history.best_fitness.push(best);
        self.history.mean_fitness.push(mean);
    }

    /// Record a completed generation. Returns `true` if the best-ever improved.
    pub fn record_generation(&mut self, generation: usize, best: f64, mean: f64) -> bool {
        self.history.best_fitness.push(best);
        self.history.mean_fitness.push(mean);

        if best > self.best_fitness {
            self.best_fitness = best;
            self.best_generation = generation;
            true
        } else {
            false
        }
    }

    /// Track a raw objective from a single evaluation.
    pub fn observe_raw(&mut self, raw: f64) {
        self.best_raw = Some(self.best_raw.map_or(raw, |best| best.min(raw)));
        self.worst_raw = Some(self.worst_raw.map_or(raw, |worst| worst.max(raw)));
    }

    pub fn set_cause(&mut self, cause: TerminationCause) {
        self.cause = Some(cause);
    }

    pub fn initial_fitness(&self) -> f64 {
        self.initial_fitness
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn best_generation(&self) -> usize {
        self.best_generation
    }

    pub fn best_raw(&self) -> Option<f64> {
        self.best_raw
    }

    pub fn worst_raw(&self) -> Option<f64> {
        self.worst_raw
    }

    pub fn cause(&self) -> Option<TerminationCause> {
        self.cause
    }

    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// `best_fitness - initial_fitness`.
    pub fn fitness_delta(&self) -> f64 {
        self.best_fitness - self.initial_fitness
    }
}

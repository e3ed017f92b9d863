//! Stop conditions checked between generations.

use std::time::{Duration, Instant};

use crate::schema::{RunConfig, TerminationCause};

/// Wall-clock, generation and target-fitness limits of a run.
///
/// Only the generation counter changes after construction.
#[derive(Debug, Clone)]
pub struct TerminationPolicy {
    started: Instant,
    generation: usize,
    max_duration: Duration,
    max_generations: usize,
    target_fitness: f64,
}

impl TerminationPolicy {
    pub fn new(max_duration: Duration, max_generations: usize, target_fitness: f64) -> Self {
        Self {
            started: Instant::now(),
            generation: 0,
            max_duration,
            max_generations,
            target_fitness,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            Duration::try_from_secs_f64(config.max_seconds).unwrap_or(Duration::MAX),
            config.max_generations,
            config.effective_target_fitness(),
        )
    }

    /// Restart the wall clock and the generation counter.
    pub fn restart(&mut self) {
        self.started = Instant::now();
        self.generation = 0;
    }

    /// Count one completed generation.
    pub fn advance(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// First matching condition in order: timeout, generation cap, target.
    pub fn check(&self, best_fitness: f64) -> Option<TerminationCause> {
        self.check_at(self.elapsed(), best_fitness)
    }

    fn check_at(&self, elapsed: Duration, best_fitness: f64) -> Option<TerminationCause> {
        if elapsed >= self.max_duration {
            return Some(TerminationCause::Timeout);
        }

        if self.generation >= self.max_generations {
            return Some(TerminationCause::MaxGenerations);
        }

        if best_fitness >= self.target_fitness {
            return Some(TerminationCause::TargetReached);
        }

        None
    }
}

//! Generational evolution engine.

use std::time::Duration;

use crate::schema::{
    ConfigError, EnginePhase, GenerationProgress, ProblemKind, RunConfig, RunResult,
    TerminationCause,
};

use super::genome::GenomeRng;
use super::population::{Individual, Population};
use super::problem::{OneMaxProblem, Problem, RosenbrockProblem, SchwefelProblem, SphereProblem};
use super::selection::TournamentSelector;
use super::stats::RunStatistics;
use super::termination::TerminationPolicy;

/// Generations logged at debug level besides every 50th.
const LOGGED_EARLY_GENERATIONS: usize = 3;
const LOG_INTERVAL: usize = 50;

/// Evolution engine that runs a generational GA on one problem.
///
/// Random draws per offspring pair happen in a fixed order: select parent 1,
/// select parent 2, crossover gate, crossover, mutate parent 1, mutate
/// parent 2. Evaluation draws nothing. A fixed seed therefore reproduces a
/// run exactly.
pub struct EvolutionEngine<P: Problem> {
    problem: P,
    population_size: usize,
    crossover_probability: f64,
    selector: TournamentSelector,
    policy: TerminationPolicy,
    rng: GenomeRng,
    seed: u64,
    population: Population<P::Genome>,
    stats: RunStatistics,
    phase: EnginePhase,
    stopped_after: Option<Duration>,
}

impl<P: Problem> EvolutionEngine<P> {
    /// Create a new evolution engine. Rejects invalid configurations.
    pub fn new(problem: P, config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(GenomeRng::clock_seed);

        Ok(Self {
            problem,
            population_size: config.population_size,
            crossover_probability: config.crossover_probability,
            selector: TournamentSelector::new(config.tournament_size),
            policy: TerminationPolicy::from_config(config),
            rng: GenomeRng::new(seed),
            seed,
            population: Population::with_capacity(config.population_size),
            stats: RunStatistics::default(),
            phase: EnginePhase::Initializing,
            stopped_after: None,
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Seed the random source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn population(&self) -> &Population<P::Genome> {
        &self.population
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Completed generations.
    pub fn generation(&self) -> usize {
        self.policy.generation()
    }

    /// Fittest individual of the current population.
    pub fn best(&self) -> Option<&Individual<P::Genome>> {
        self.population.best()
    }

    /// Build and evaluate the initial population.
    pub fn initialize(&mut self) {
        log::info!(
            "Starting {} run: population={}, seed={}",
            self.problem.name(),
            self.population_size,
            self.seed
        );

        self.policy.restart();
        self.stats = RunStatistics::default();
        self.stopped_after = None;

        let mut population = Population::with_capacity(self.population_size);
        while !population.is_full() {
            let mut individual = Individual::new(self.problem.initialize(&mut self.rng));
            evaluate(&self.problem, &mut self.stats, &mut individual);
            population.push(individual);
        }
        self.population = population;

        self.stats
            .record_initial(self.population.best_fitness(), self.population.mean_fitness());
        self.phase = EnginePhase::Running;

        log::debug!(
            "Gen 0: best={:.6}, raw={:?}",
            self.stats.best_fitness(),
            self.stats.best_raw()
        );

        self.check_termination();
    }

    /// Run a single generation step.
    ///
    /// Initializes first if needed. Returns the termination cause once the
    /// run has stopped.
    pub fn step(&mut self) -> Option<TerminationCause> {
        match self.phase {
            EnginePhase::Initializing => {
                self.initialize();
                if self.phase == EnginePhase::Terminated {
                    return self.stats.cause();
                }
            }
            EnginePhase::Terminated => return self.stats.cause(),
            EnginePhase::Running => {}
        }

        let mut offspring = Population::with_capacity(self.population_size);
        while !offspring.is_full() {
            let (Some(mut first), Some(mut second)) = (
                self.selector.select(&self.population, &mut self.rng),
                self.selector.select(&self.population, &mut self.rng),
            ) else {
                break;
            };

            if self.rng.chance(self.crossover_probability) {
                self.problem
                    .crossover(first.genome_mut(), second.genome_mut(), &mut self.rng);
            }

            self.problem.mutate(first.genome_mut(), &mut self.rng);
            self.problem.mutate(second.genome_mut(), &mut self.rng);

            evaluate(&self.problem, &mut self.stats, &mut first);
            evaluate(&self.problem, &mut self.stats, &mut second);

            offspring.push(first);
            // Dropped when the first child filled the last slot.
            offspring.push(second);
        }

        self.population = offspring;
        self.policy.advance();

        let generation = self.policy.generation();
        let improved = self.stats.record_generation(
            generation,
            self.population.best_fitness(),
            self.population.mean_fitness(),
        );

        if generation < LOGGED_EARLY_GENERATIONS || generation % LOG_INTERVAL == 0 {
            log::debug!(
                "Gen {}: best={:.6}, raw={:?}, worst_raw={:?}",
                generation,
                self.stats.best_fitness(),
                self.stats.best_raw(),
                self.stats.worst_raw()
            );
        } else if improved {
            log::trace!(
                "Gen {}: new best {:.6}",
                generation,
                self.stats.best_fitness()
            );
        }

        self.check_termination()
    }

    /// Stop if the raw objective converged or the policy fires.
    fn check_termination(&mut self) -> Option<TerminationCause> {
        let converged = self
            .problem
            .convergence_threshold()
            .zip(self.stats.best_raw())
            .is_some_and(|(threshold, raw)| raw < threshold);

        let cause = if converged {
            Some(TerminationCause::Convergence)
        } else {
            self.policy.check(self.stats.best_fitness())
        };

        if let Some(cause) = cause {
            self.terminate(cause);
        }
        cause
    }

    fn terminate(&mut self, cause: TerminationCause) {
        self.stats.set_cause(cause);
        self.phase = EnginePhase::Terminated;
        self.stopped_after = Some(self.policy.elapsed());

        log::info!(
            "Finished {} run: cause={}, generations={}, initial={:.6}, best={:.6} (gen {})",
            self.problem.name(),
            cause,
            self.policy.generation(),
            self.stats.initial_fitness(),
            self.stats.best_fitness(),
            self.stats.best_generation()
        );
    }

    fn elapsed(&self) -> Duration {
        self.stopped_after.unwrap_or_else(|| self.policy.elapsed())
    }

    /// Get current progress.
    pub fn progress(&self) -> GenerationProgress {
        GenerationProgress {
            generation: self.policy.generation(),
            max_generations: self.policy.max_generations(),
            best_fitness: self.stats.best_fitness(),
            generation_best: self.population.best_fitness(),
            mean_fitness: self.population.mean_fitness(),
            best_raw: self.stats.best_raw(),
            worst_raw: self.stats.worst_raw(),
            elapsed_seconds: self.elapsed().as_secs_f64(),
            phase: self.phase,
        }
    }

    /// Statistics snapshot. The cause reads `exhausted` while the run is
    /// still going.
    pub fn result(&self) -> RunResult {
        RunResult {
            problem: self.problem.name().to_string(),
            seed: self.seed,
            initial_fitness: self.stats.initial_fitness(),
            best_fitness: self.stats.best_fitness(),
            fitness_delta: self.stats.fitness_delta(),
            best_generation: self.stats.best_generation(),
            generations: self.policy.generation(),
            elapsed_seconds: self.elapsed().as_secs_f64(),
            termination_cause: self.stats.cause().unwrap_or(TerminationCause::Exhausted),
            best_raw: self.stats.best_raw(),
            worst_raw: self.stats.worst_raw(),
            history: self.stats.history().clone(),
        }
    }

    /// Run evolution with progress callback.
    ///
    /// Continues from the current state if the engine was already
    /// initialized or stepped.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> RunResult
    where
        F: FnMut(&GenerationProgress),
    {
        if self.phase == EnginePhase::Initializing {
            self.initialize();
        }
        callback(&self.progress());

        while self.phase == EnginePhase::Running {
            self.step();
            callback(&self.progress());
        }

        self.result()
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> RunResult {
        self.run_with_callback(|_| {})
    }

    /// Run at most `budget` more generations.
    ///
    /// If no stop condition fired by then the run ends as `exhausted`.
    pub fn run_generations(&mut self, budget: usize) -> RunResult {
        if self.phase == EnginePhase::Initializing {
            self.initialize();
        }

        for _ in 0..budget {
            if self.phase != EnginePhase::Running {
                break;
            }
            self.step();
        }

        if self.phase == EnginePhase::Running {
            self.terminate(TerminationCause::Exhausted);
        }

        self.result()
    }
}

/// Evaluate an individual and feed its raw objective to the statistics.
fn evaluate<P: Problem>(
    problem: &P,
    stats: &mut RunStatistics,
    individual: &mut Individual<P::Genome>,
) {
    let evaluation = problem.evaluate(individual.genome());
    if let Some(raw) = evaluation.raw {
        stats.observe_raw(raw);
    }
    individual.set_evaluation(evaluation.fitness, evaluation.raw);
}

/// Build the problem named by `config` and run it to completion.
pub fn run_config(config: &RunConfig) -> Result<RunResult, ConfigError> {
    let result = match config.problem {
        ProblemKind::OneMax => {
            EvolutionEngine::new(OneMaxProblem::from_config(config), config)?.run()
        }
        ProblemKind::Sphere => {
            EvolutionEngine::new(SphereProblem::from_config(config), config)?.run()
        }
        ProblemKind::Rosenbrock => {
            EvolutionEngine::new(RosenbrockProblem::from_config(config), config)?.run()
        }
        ProblemKind::Schwefel => {
            EvolutionEngine::new(SchwefelProblem::from_config(config), config)?.run()
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::fitness::Rosenbrock;
    use crate::schema::Bounds;

    fn onemax_config(genome_length: usize, population_size: usize) -> RunConfig {
        RunConfig {
            problem: ProblemKind::OneMax,
            genome_length,
            population_size,
            crossover_probability: 0.9,
            mutation_probability: 0.05,
            max_generations: 10_000,
            max_seconds: 60.0,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    fn without_clock(result: RunResult) -> RunResult {
        RunResult {
            elapsed_seconds: 0.0,
            ..result
        }
    }

    #[test]
    fn test_evolution_engine_creation() {
        let config = onemax_config(16, 10);
        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();
        assert_eq!(engine.phase(), EnginePhase::Initializing);
        assert_eq!(engine.seed(), 42);

        engine.initialize();
        assert_eq!(engine.population().len(), 10);
        assert!(engine.population().iter().all(Individual::is_evaluated));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RunConfig {
            population_size: 0,
            ..onemax_config(16, 10)
        };
        let result = EvolutionEngine::new(OneMaxProblem::from_config(&config), &config);
        assert!(matches!(result, Err(ConfigError::EmptyPopulation)));

        let config = RunConfig {
            crossover_probability: 2.0,
            ..onemax_config(16, 10)
        };
        assert!(run_config(&config).is_err());
    }

    #[test]
    fn test_onemax_reaches_target() {
        let config = onemax_config(8, 50);
        let result = run_config(&config).unwrap();

        assert_eq!(result.termination_cause, TerminationCause::TargetReached);
        assert_eq!(result.best_fitness, 8.0);
        assert!(result.generations < 10_000);
        assert!(result.best_generation <= result.generations);
        assert_eq!(result.fitness_delta, result.best_fitness - result.initial_fitness);
    }

    #[test]
    fn test_generation_cap() {
        let config = RunConfig {
            max_generations: 5,
            ..onemax_config(1024, 10)
        };
        let result = run_config(&config).unwrap();

        assert_eq!(result.termination_cause, TerminationCause::MaxGenerations);
        assert_eq!(result.generations, 5);
        assert_eq!(result.history.len(), 6);
    }

    #[test]
    fn test_deterministic_with_seed() {
        for problem in [
            ProblemKind::OneMax,
            ProblemKind::Sphere,
            ProblemKind::Rosenbrock,
            ProblemKind::Schwefel,
        ] {
            let config = RunConfig {
                problem,
                genome_length: 32,
                population_size: 20,
                max_generations: 25,
                random_seed: Some(1234),
                ..Default::default()
            };
            let a = run_config(&config).unwrap();
            let b = run_config(&config).unwrap();
            assert_eq!(without_clock(a), without_clock(b), "{:?}", problem);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = run_config(&RunConfig {
            random_seed: Some(1),
            max_generations: 3,
            ..onemax_config(256, 10)
        })
        .unwrap();
        let b = run_config(&RunConfig {
            random_seed: Some(2),
            max_generations: 3,
            ..onemax_config(256, 10)
        })
        .unwrap();
        assert_ne!(a.history, b.history);
    }

    #[test]
    fn test_sphere_best_never_decreases() {
        let config = RunConfig {
            problem: ProblemKind::Sphere,
            genome_length: 4,
            bounds: Some(Bounds::new(-5.12, 5.12)),
            population_size: 100,
            crossover_probability: 0.8,
            mutation_probability: 0.1,
            max_generations: 500,
            random_seed: Some(7),
            ..Default::default()
        };
        let mut engine =
            EvolutionEngine::new(SphereProblem::from_config(&config), &config).unwrap();

        let mut best_so_far = f64::NEG_INFINITY;
        let result = engine.run_with_callback(|progress| {
            assert!(progress.best_fitness >= best_so_far);
            best_so_far = progress.best_fitness;
        });

        assert!(result.best_fitness >= result.initial_fitness);
        assert!(result.best_raw.unwrap() <= result.worst_raw.unwrap());
        assert!(engine.population().iter().all(|i| i.genome().within(Bounds::new(-5.12, 5.12))));
    }

    #[test]
    fn test_convergence_short_circuit() {
        // Every raw value is below this threshold, so the initial population converges.
        let config = RunConfig {
            problem: ProblemKind::Rosenbrock,
            genome_length: 8,
            population_size: 10,
            convergence_threshold: f64::MAX,
            random_seed: Some(3),
            ..Default::default()
        };
        let result = run_config(&config).unwrap();
        assert_eq!(result.termination_cause, TerminationCause::Convergence);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_timeout() {
        let config = RunConfig {
            max_seconds: 1e-9,
            ..onemax_config(1024, 10)
        };
        let result = run_config(&config).unwrap();
        assert_eq!(result.termination_cause, TerminationCause::Timeout);
    }

    #[test]
    fn test_run_generations_exhausts() {
        let config = onemax_config(1024, 10);
        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();

        let result = engine.run_generations(3);
        assert_eq!(result.termination_cause, TerminationCause::Exhausted);
        assert_eq!(result.generations, 3);
        assert_eq!(engine.phase(), EnginePhase::Terminated);

        // Further steps are no-ops once terminated.
        assert_eq!(engine.step(), Some(TerminationCause::Exhausted));
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn test_odd_population_size() {
        let config = RunConfig {
            max_generations: 4,
            ..onemax_config(64, 7)
        };
        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();
        engine.initialize();
        for _ in 0..4 {
            engine.step();
            assert_eq!(engine.population().len(), 7);
            assert!(engine.population().iter().all(Individual::is_evaluated));
        }
        assert_eq!(engine.phase(), EnginePhase::Terminated);
        assert_eq!(engine.result().termination_cause, TerminationCause::MaxGenerations);
    }

    #[test]
    fn test_step_initializes_lazily() {
        let config = onemax_config(64, 6);
        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();
        assert_eq!(engine.step(), None);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.phase(), EnginePhase::Running);
    }

    #[test]
    fn test_run_continues_after_initialize() {
        let config = RunConfig {
            max_generations: 20,
            ..onemax_config(128, 12)
        };

        let fresh = EvolutionEngine::new(OneMaxProblem::from_config(&config), &config)
            .unwrap()
            .run();

        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();
        engine.initialize();
        engine.step();
        let resumed = engine.run();
        assert_eq!(without_clock(fresh), without_clock(resumed.clone()));

        // A finished run is not restarted.
        let again = engine.run();
        assert_eq!(without_clock(again), without_clock(resumed));
        assert_eq!(engine.generation(), 20);
    }

    #[test]
    fn test_unreachable_target_keeps_stepping() {
        let config = RunConfig {
            max_generations: 50,
            target_fitness: Some(f64::INFINITY),
            ..onemax_config(4, 20)
        };
        let result = run_config(&config).unwrap();
        assert_eq!(result.termination_cause, TerminationCause::MaxGenerations);
        assert_eq!(result.generations, 50);
        assert_eq!(result.best_fitness, 4.0);
    }

    #[test]
    fn test_bounds_overflow_rejected_before_run() {
        let config = RunConfig {
            problem: ProblemKind::Rosenbrock,
            genome_length: 4,
            bounds: Some(Bounds::new(-1e308, 1e308)),
            random_seed: Some(5),
            ..Default::default()
        };
        assert!(matches!(
            run_config(&config),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_cached_raw_matches_evaluator() {
        let config = RunConfig {
            problem: ProblemKind::Rosenbrock,
            genome_length: 6,
            population_size: 10,
            max_generations: 5,
            random_seed: Some(9),
            ..Default::default()
        };
        let mut engine =
            EvolutionEngine::new(RosenbrockProblem::from_config(&config), &config).unwrap();
        engine.run();
        for individual in engine.population() {
            assert_eq!(individual.raw(), Some(Rosenbrock::raw(&individual.genome().0)));
        }
    }

    #[test]
    fn test_cached_fitness_matches_genome() {
        let config = RunConfig {
            max_generations: 10,
            ..onemax_config(128, 12)
        };
        let mut engine =
            EvolutionEngine::new(OneMaxProblem::from_config(&config), &config).unwrap();
        engine.run();
        for individual in engine.population() {
            assert_eq!(
                individual.fitness(),
                Some(individual.genome().count_ones() as f64)
            );
        }
    }
}

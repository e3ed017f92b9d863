//! Quick evolution performance test

use evo_bench::{
    compute::run_config,
    schema::{ProblemKind, RunConfig},
};
use std::time::Instant;

fn main() {
    env_logger::init();

    println!("=== Evolution Performance Test ===\n");

    // Test every problem at a fixed budget
    for problem in [
        ProblemKind::OneMax,
        ProblemKind::Sphere,
        ProblemKind::Rosenbrock,
        ProblemKind::Schwefel,
    ] {
        let genome_length = if problem.is_real_valued() { 10 } else { 256 };
        println!("Problem: {} (length {})", problem.name(), genome_length);

        let config = RunConfig {
            problem,
            genome_length,
            population_size: 50,
            max_generations: 200,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let result = match run_config(&config) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("  Invalid configuration: {}", e);
                continue;
            }
        };
        let elapsed = start.elapsed();

        let total_evals = (result.generations + 1) * config.population_size;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {:.6}", result.best_fitness);
        println!("  Stopped by:     {}", result.termination_cause);
        println!();
    }

    println!("=== Scalability Test (OneMax, length 1024) ===\n");

    // Test different population sizes
    for pop_size in [10, 20, 40, 80] {
        let config = RunConfig {
            problem: ProblemKind::OneMax,
            genome_length: 1024,
            population_size: pop_size,
            max_generations: 100,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let Ok(result) = run_config(&config) else {
            continue;
        };
        let elapsed = start.elapsed();

        println!(
            "  Pop {:3}: {:.2}s, {:.1} gens/s, best {}",
            pop_size,
            elapsed.as_secs_f64(),
            result.generations as f64 / elapsed.as_secs_f64(),
            result.best_fitness
        );
    }
}

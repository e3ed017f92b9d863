//! Evo Bench CLI - Run a benchmark from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;

use evo_bench::{
    compute::run_config,
    schema::{ProblemKind, RunConfig, RunResult},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!();
        eprintln!("Run a genetic algorithm benchmark from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    // Load configuration
    let config = RunConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config {}: {}", config_path.display(), e);
        std::process::exit(1);
    });

    let bounds = config.effective_bounds();

    println!("Evo Bench");
    println!("=========");
    println!("Problem: {}", config.problem.name());
    println!("Genome length: {}", config.genome_length);
    if config.problem.is_real_valued() {
        println!("Bounds: [{}, {}]", bounds.lower, bounds.upper);
    }
    println!("Population: {}", config.population_size);
    println!(
        "Crossover: {}, mutation: {}",
        config.crossover_probability, config.mutation_probability
    );
    println!(
        "Limits: {} generations, {}s",
        config.max_generations, config.max_seconds
    );
    println!();

    // Run
    println!("Running...");
    let result = run_config(&config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    print_summary(&result);

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_summary(result: &RunResult) {
    println!();
    println!("Result:");
    println!("  Seed: {}", result.seed);
    println!("  Termination: {}", result.termination_cause);
    println!("  Generations: {}", result.generations);
    println!("  Initial fitness: {:.6}", result.initial_fitness);
    println!(
        "  Best fitness: {:.6} (generation {})",
        result.best_fitness, result.best_generation
    );
    println!("  Improvement: {:.6}", result.fitness_delta);
    if let (Some(best), Some(worst)) = (result.best_raw, result.worst_raw) {
        println!("  Raw objective: best {:.6e}, worst {:.6e}", best, worst);
    }
    println!(
        "  Time: {:.2}s ({:.1} generations/s)",
        result.elapsed_seconds,
        result.generations as f64 / result.elapsed_seconds.max(f64::EPSILON)
    );
    println!();
}

fn print_example_config() {
    let config = RunConfig {
        problem: ProblemKind::Rosenbrock,
        genome_length: 10,
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}

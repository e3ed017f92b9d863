//! Run configuration for the evolution engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Benchmark problem to optimize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum ProblemKind {
    /// Bitstring, fitness = number of set bits.
    #[default]
    OneMax,
    /// Real vector, sum of squares with polynomial mutation and bounded SBX.
    Sphere,
    /// Real vector, Rosenbrock valley with guarded SBX and Gaussian mutation.
    Rosenbrock,
    /// Real vector, Schwefel landscape with guarded SBX and Gaussian mutation.
    Schwefel,
}

impl ProblemKind {
    /// Whether genomes are real vectors.
    pub fn is_real_valued(&self) -> bool {
        !matches!(self, Self::OneMax)
    }

    /// Domain used when the configuration does not set one.
    pub fn default_bounds(&self) -> Bounds {
        match self {
            Self::Schwefel => Bounds::new(-500.0, 500.0),
            _ => Bounds::new(-5.12, 5.12),
        }
    }

    /// SBX distribution index used when the configuration does not set one.
    pub fn default_crossover_distribution_index(&self) -> f64 {
        match self {
            Self::Sphere => 20.0,
            _ => 2.0,
        }
    }

    /// Short name used in logs and results.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneMax => "onemax",
            Self::Sphere => "sphere",
            Self::Rosenbrock => "rosenbrock",
            Self::Schwefel => "schwefel",
        }
    }
}

/// Closed interval `[lower, upper]` constraining every real gene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Domain width `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Clamp a value into the domain.
    ///
    /// NaN maps to the lower bound so a gene can never leave the domain.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.lower
        } else {
            value.clamp(self.lower, self.upper)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Largest absolute value reachable inside the domain.
    pub fn magnitude(&self) -> f64 {
        self.lower.abs().max(self.upper.abs())
    }
}

/// Complete input to a single evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Problem to optimize.
    #[serde(default)]
    pub problem: ProblemKind,
    /// Number of individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Probability of applying crossover to a parent pair.
    #[serde(default = "default_crossover_probability")]
    pub crossover_probability: f64,
    /// Per-gene probability for bit-flip and polynomial mutation,
    /// per-individual probability for Gaussian mutation.
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Per-gene probability for Gaussian mutation.
    #[serde(default = "default_gene_mutation_probability")]
    pub gene_mutation_probability: f64,
    /// Number of genes per genome.
    #[serde(default = "default_genome_length")]
    pub genome_length: usize,
    /// Gene domain for real-valued problems. Ignored for OneMax.
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// Wall-clock budget in seconds, checked between generations.
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,
    /// Generation cap.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Fitness at which the run stops. Defaults to the problem maximum.
    #[serde(default)]
    pub target_fitness: Option<f64>,
    /// Raw objective below which a real-valued run counts as converged.
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    /// SBX distribution index (eta).
    #[serde(default)]
    pub crossover_distribution_index: Option<f64>,
    /// Polynomial mutation distribution index (eta).
    #[serde(default = "default_mutation_distribution_index")]
    pub mutation_distribution_index: f64,
    /// Individuals sampled per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            problem: ProblemKind::default(),
            population_size: default_population_size(),
            crossover_probability: default_crossover_probability(),
            mutation_probability: default_mutation_probability(),
            gene_mutation_probability: default_gene_mutation_probability(),
            genome_length: default_genome_length(),
            bounds: None,
            max_seconds: default_max_seconds(),
            max_generations: default_max_generations(),
            target_fitness: None,
            convergence_threshold: default_convergence_threshold(),
            crossover_distribution_index: None,
            mutation_distribution_index: default_mutation_distribution_index(),
            tournament_size: default_tournament_size(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_crossover_probability() -> f64 {
    0.8
}
fn default_mutation_probability() -> f64 {
    0.1
}
fn default_gene_mutation_probability() -> f64 {
    0.1
}
fn default_genome_length() -> usize {
    1024
}
fn default_max_seconds() -> f64 {
    120.0
}
fn default_max_generations() -> usize {
    1_000_000
}
fn default_convergence_threshold() -> f64 {
    1e-10
}
fn default_mutation_distribution_index() -> f64 {
    20.0
}
fn default_tournament_size() -> usize {
    2
}

impl RunConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Gene domain, falling back to the problem default.
    pub fn effective_bounds(&self) -> Bounds {
        self.bounds.unwrap_or_else(|| self.problem.default_bounds())
    }

    /// SBX distribution index, falling back to the problem default.
    pub fn effective_crossover_distribution_index(&self) -> f64 {
        self.crossover_distribution_index
            .unwrap_or_else(|| self.problem.default_crossover_distribution_index())
    }

    /// Target fitness, falling back to the best attainable value.
    pub fn effective_target_fitness(&self) -> f64 {
        self.target_fitness.unwrap_or(match self.problem {
            ProblemKind::OneMax => self.genome_length as f64,
            _ => 1.0,
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.genome_length == 0 {
            return Err(ConfigError::EmptyGenome);
        }

        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }

        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }

        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::ProbabilityOutOfRange { name, value })
            }
        };

        check_probability(self.crossover_probability, "crossover_probability")?;
        check_probability(self.mutation_probability, "mutation_probability")?;
        check_probability(self.gene_mutation_probability, "gene_mutation_probability")?;

        if !(self.max_seconds.is_finite() && self.max_seconds > 0.0) {
            return Err(ConfigError::InvalidTimeout(self.max_seconds));
        }

        if self.problem.is_real_valued() {
            let bounds = self.effective_bounds();
            // The width feeds sampling ranges and mutation step sizes.
            if !(bounds.lower < bounds.upper && bounds.width().is_finite()) {
                return Err(ConfigError::InvalidBounds {
                    lower: bounds.lower,
                    upper: bounds.upper,
                });
            }
        }

        let check_index = |value: f64, name: &'static str| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidDistributionIndex { name, value })
            }
        };

        check_index(
            self.effective_crossover_distribution_index(),
            "crossover_distribution_index",
        )?;
        check_index(self.mutation_distribution_index, "mutation_distribution_index")?;

        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Genome length must be non-zero")]
    EmptyGenome,
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Tournament size must be non-zero")]
    EmptyTournament,
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("Invalid gene bounds [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDistributionIndex { name: &'static str, value: f64 },
    #[error("Timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

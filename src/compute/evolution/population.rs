//! Individuals and populations.

/// A genome plus its cached fitness.
///
/// Mutable access to the genome drops the cached fitness, so a stale value
/// can never be read after a variation operator ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    genome: G,
    fitness: Option<f64>,
    raw: Option<f64>,
}

impl<G> Individual<G> {
    /// Unevaluated individual.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: None,
            raw: None,
        }
    }

    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Mutable genome access. Invalidates the cached fitness.
    pub fn genome_mut(&mut self) -> &mut G {
        self.fitness = None;
        self.raw = None;
        &mut self.genome
    }

    /// Store an evaluation result.
    pub fn set_evaluation(&mut self, fitness: f64, raw: Option<f64>) {
        self.fitness = Some(fitness);
        self.raw = raw;
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Fitness for comparisons; unevaluated individuals rank last.
    pub fn rank_fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }

    /// Raw objective, for real-valued problems.
    pub fn raw(&self) -> Option<f64> {
        self.raw
    }
}

/// Ordered collection of individuals with a fixed target size.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
    capacity: usize,
}

impl<G> Population<G> {
    /// Empty population that fills up to `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn from_individuals(individuals: Vec<Individual<G>>) -> Self {
        let capacity = individuals.len();
        Self {
            individuals,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.individuals.len() >= self.capacity
    }

    /// Append unless the population is already full. Returns whether it was added.
    pub fn push(&mut self, individual: Individual<G>) -> bool {
        if self.is_full() {
            return false;
        }
        self.individuals.push(individual);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    /// Fittest individual; the first one wins ties.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals.iter().fold(None, |best, candidate| match best {
            Some(b) if b.rank_fitness() >= candidate.rank_fitness() => Some(b),
            _ => Some(candidate),
        })
    }

    /// Highest fitness, or negative infinity for an empty population.
    pub fn best_fitness(&self) -> f64 {
        self.best().map_or(f64::NEG_INFINITY, Individual::rank_fitness)
    }

    /// Mean fitness over evaluated individuals.
    pub fn mean_fitness(&self) -> f64 {
        let (sum, count) = self
            .individuals
            .iter()
            .filter_map(Individual::fitness)
            .fold((0.0, 0usize), |(sum, count), f| (sum + f, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

//! Parent selection.

use super::genome::GenomeRng;
use super::population::{Individual, Population};

/// Deterministic tournament: the fittest of `size` uniform draws, with replacement.
#[derive(Debug, Clone)]
pub struct TournamentSelector {
    pub size: usize,
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self { size: 2 }
    }
}

impl TournamentSelector {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Index of the winner. The first sampled individual wins ties.
    ///
    /// Returns `None` for an empty population.
    pub fn select_index<G>(&self, population: &Population<G>, rng: &mut GenomeRng) -> Option<usize> {
        if population.is_empty() {
            return None;
        }

        let mut best_idx = rng.index(population.len());
        let mut best_fitness = population.get(best_idx)?.rank_fitness();
        for _ in 1..self.size {
            let idx = rng.index(population.len());
            let fitness = population.get(idx)?.rank_fitness();
            if fitness > best_fitness {
                best_fitness = fitness;
                best_idx = idx;
            }
        }
        Some(best_idx)
    }

    /// Copy of the tournament winner.
    pub fn select<G: Clone>(
        &self,
        population: &Population<G>,
        rng: &mut GenomeRng,
    ) -> Option<Individual<G>> {
        let idx = self.select_index(population, rng)?;
        population.get(idx).cloned()
    }
}

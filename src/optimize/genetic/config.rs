//! Genetic algorithm parameters.

use serde::Deserialize;

use crate::error::{Result, RoutingError};

/// Parameters of [`GeneticAlgorithm`](super::GeneticAlgorithm).
///
/// # Examples
///
/// ```
/// use u_collect::optimize::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(30)
///     .with_generations(50)
///     .with_elite_size(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.mutation_rate, 0.15);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Probability of a swap mutation per child.
    pub mutation_rate: f64,
    /// Probability of recombining a selected pair instead of cloning it.
    pub crossover_rate: f64,
    /// Best individuals copied unchanged into the next generation.
    pub elite_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            mutation_rate: 0.15,
            crossover_rate: 0.8,
            elite_size: 20,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_size(mut self, elite_size: usize) -> Self {
        self.elite_size = elite_size;
        self
    }

    /// Checks that the population is non-empty and can hold the elite, and
    /// that both rates are probabilities.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(RoutingError::InvalidConfiguration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.population_size < self.elite_size {
            return Err(RoutingError::InvalidConfiguration(format!(
                "population_size {} is smaller than elite_size {}",
                self.population_size, self.elite_size
            )));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(RoutingError::InvalidConfiguration(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}

//! Optimizer configuration.

use sweep_sim::SimConfig;

use crate::{OptError, OptResult};

/// Genetic search parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticConfig {
    /// Candidates per generation.  The greedy seeds are always kept, so the
    /// effective size is never below three.
    pub population_size:  usize,
    pub max_generations:  usize,
    /// Stop after this many generations without a new best.
    pub stagnation_limit: usize,
    /// Probability that a child comes from crossover rather than cloning.
    pub crossover_rate:   f64,
    /// Probability that a child is mutated.
    pub mutation_rate:    f64,
    pub tournament_size:  usize,
    /// Best candidates copied unchanged into the next generation.
    pub elite_count:      usize,
    pub seed:             u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size:  50,
            max_generations:  100,
            stagnation_limit: 25,
            crossover_rate:   0.7,
            mutation_rate:    0.2,
            tournament_size:  3,
            elite_count:      2,
            seed:             42,
        }
    }
}

impl GeneticConfig {
    pub fn validate(&self) -> OptResult<()> {
        if self.population_size < 2 {
            return Err(OptError::Config("population_size must be at least 2".into()));
        }
        if self.tournament_size == 0 {
            return Err(OptError::Config("tournament_size must be at least 1".into()));
        }
        if self.elite_count >= self.population_size {
            return Err(OptError::Config(format!(
                "elite_count {} must be below population_size {}",
                self.elite_count, self.population_size
            )));
        }
        for (name, rate) in [("crossover_rate", self.crossover_rate), ("mutation_rate", self.mutation_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(OptError::Config(format!("{name} {rate} is outside [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Thresholds for [`Strategy::Auto`](crate::Strategy::Auto).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    pub max_simple_rooms:  usize,
    pub max_simple_floors: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { max_simple_rooms: 12, max_simple_floors: 1 }
    }
}

/// Everything [`optimize`](crate::optimize) needs besides the inputs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptConfig {
    pub genetic:  GeneticConfig,
    pub selector: SelectorConfig,
    pub sim:      SimConfig,
}

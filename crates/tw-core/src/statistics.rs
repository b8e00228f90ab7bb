use serde::{Deserialize, Serialize};

use crate::seed::{Gender, LifeStage, Seed};

/// Aggregate counters of a world, read and updated by simulation systems.
///
/// The population counters are kept in step with the seeds stored in a
/// [`crate::World`]; `food` and `food_resource` are owned by whatever rules
/// run each year. `food` may go negative (a deficit), `food_resource` may not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldStatistics {
    /// Current simulated year.
    pub year: u64,
    /// Accumulated food balance. Negative values are a deficit.
    pub food: f64,
    /// Depletable supply that adults harvest food from.
    pub food_resource: f64,
    /// Total number of seeds.
    pub population: u64,
    /// Adult males.
    pub men: u64,
    /// Adult females.
    pub women: u64,
    /// Male children.
    pub boys: u64,
    /// Female children.
    pub girls: u64,
}

impl WorldStatistics {
    /// Start with the given food balance and food resource and no population.
    pub fn with_food(food: f64, food_resource: f64) -> Self {
        Self {
            food,
            food_resource,
            ..Self::default()
        }
    }

    /// Men plus women.
    pub fn total_adults(&self) -> u64 {
        self.men + self.women
    }

    /// Boys plus girls.
    pub fn total_children(&self) -> u64 {
        self.boys + self.girls
    }

    pub(crate) fn record(&mut self, seed: &Seed) {
        *self.counter_mut(seed.gender, seed.stage) += 1;
        self.population += 1;
    }

    pub(crate) fn forget(&mut self, seed: &Seed) {
        let counter = self.counter_mut(seed.gender, seed.stage);
        *counter = counter.saturating_sub(1);
        self.population = self.population.saturating_sub(1);
    }

    fn counter_mut(&mut self, gender: Gender, stage: LifeStage) -> &mut u64 {
        match (gender, stage) {
            (Gender::Male, LifeStage::Adult) => &mut self.men,
            (Gender::Female, LifeStage::Adult) => &mut self.women,
            (Gender::Male, LifeStage::Child) => &mut self.boys,
            (Gender::Female, LifeStage::Child) => &mut self.girls,
        }
    }
}

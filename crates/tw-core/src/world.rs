use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TwError, TwResult};
use crate::seed::{LifeStage, Seed, SeedId};
use crate::statistics::WorldStatistics;

/// Metadata about the world itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Display name of the world.
    pub name: String,
    /// When the world was created.
    pub created_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Create metadata stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// The world model. Owns all seeds and the statistics aggregate.
///
/// Seed insertion, removal, and stage changes keep the population counters
/// in [`WorldStatistics`] consistent with the stored seeds. Food fields are
/// left to the simulation.
#[derive(Debug, Clone)]
pub struct World {
    /// World metadata.
    pub meta: WorldMeta,
    seeds: HashMap<SeedId, Seed>,
    statistics: WorldStatistics,
}

impl World {
    /// Create an empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self::with_statistics(meta, WorldStatistics::default())
    }

    /// Create an empty world with preset food and year fields.
    ///
    /// Population counters in `statistics` are reset; they are derived from seeds.
    pub fn with_statistics(meta: WorldMeta, statistics: WorldStatistics) -> Self {
        Self {
            meta,
            seeds: HashMap::new(),
            statistics: WorldStatistics {
                population: 0,
                men: 0,
                women: 0,
                boys: 0,
                girls: 0,
                ..statistics
            },
        }
    }

    // -----------------------------------------------------------------------
    // Seeds
    // -----------------------------------------------------------------------

    /// Add a seed to the world. Returns the seed's ID.
    pub fn add_seed(&mut self, seed: Seed) -> TwResult<SeedId> {
        let id = seed.id;
        if self.seeds.contains_key(&id) {
            return Err(TwError::DuplicateSeed(id));
        }
        self.statistics.record(&seed);
        self.seeds.insert(id, seed);
        Ok(id)
    }

    /// Remove a seed and return it.
    pub fn remove_seed(&mut self, id: SeedId) -> TwResult<Seed> {
        let seed = self.seeds.remove(&id).ok_or(TwError::SeedNotFound(id))?;
        self.statistics.forget(&seed);
        Ok(seed)
    }

    /// Move a seed to another life stage, updating the counters.
    pub fn set_stage(&mut self, id: SeedId, stage: LifeStage) -> TwResult<()> {
        let seed = self.seeds.get_mut(&id).ok_or(TwError::SeedNotFound(id))?;
        if seed.stage != stage {
            self.statistics.forget(seed);
            seed.stage = stage;
            self.statistics.record(seed);
        }
        Ok(())
    }

    /// Get a reference to a seed by ID.
    pub fn get_seed(&self, id: SeedId) -> Option<&Seed> {
        self.seeds.get(&id)
    }

    /// Iterate over all seeds in no particular order.
    pub fn seeds(&self) -> impl Iterator<Item = &Seed> {
        self.seeds.values()
    }

    /// Number of seeds in the world.
    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Read the statistics aggregate.
    pub fn statistics(&self) -> &WorldStatistics {
        &self.statistics
    }

    /// Mutable access to the statistics aggregate.
    ///
    /// Intended for yearly rules that own the food fields. Editing the
    /// population counters directly desynchronises them from the seeds.
    pub fn statistics_mut(&mut self) -> &mut WorldStatistics {
        &mut self.statistics
    }
}

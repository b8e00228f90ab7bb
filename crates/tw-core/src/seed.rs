use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for every seed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedId(pub Uuid);

impl SeedId {
    /// Generate a new random seed ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SeedId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Biological sex of a seed, used to split the population counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Counted as a boy or a man.
    Male,
    /// Counted as a girl or a woman.
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Whether a seed produces food (adult) or only consumes it (child).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    /// Consumes food, does not harvest.
    Child,
    /// Harvests food from the food resource.
    Adult,
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child => write!(f, "child"),
            Self::Adult => write!(f, "adult"),
        }
    }
}

/// A single inhabitant of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Unique identifier (auto-generated).
    pub id: SeedId,
    /// Sex of the seed.
    pub gender: Gender,
    /// Child or adult.
    pub stage: LifeStage,
    /// Intelligence score; world rules may add a bonus when the seed is introduced.
    pub iq: i32,
}

impl Seed {
    /// Create a new seed with a fresh ID and an IQ of zero.
    pub fn new(gender: Gender, stage: LifeStage) -> Self {
        Self {
            id: SeedId::new(),
            gender,
            stage,
            iq: 0,
        }
    }

    /// Set the starting IQ.
    pub fn with_iq(mut self, iq: i32) -> Self {
        self.iq = iq;
        self
    }

    /// Shorthand for an adult male.
    pub fn man() -> Self {
        Self::new(Gender::Male, LifeStage::Adult)
    }

    /// Shorthand for an adult female.
    pub fn woman() -> Self {
        Self::new(Gender::Female, LifeStage::Adult)
    }

    /// Shorthand for a male child.
    pub fn boy() -> Self {
        Self::new(Gender::Male, LifeStage::Child)
    }

    /// Shorthand for a female child.
    pub fn girl() -> Self {
        Self::new(Gender::Female, LifeStage::Child)
    }

    /// Returns true if this seed harvests food.
    pub fn is_adult(&self) -> bool {
        self.stage == LifeStage::Adult
    }
}

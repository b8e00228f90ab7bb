//! Core types for Tickworld: seeds, world statistics, and the world model.
//!
//! This crate holds the population data that simulation systems read and
//! update each year. It has no notion of time or rules; see `tw-simulation`
//! for the yearly tick driver.

/// Error types used throughout the crate.
pub mod error;
/// Seed (individual) types and identifiers.
pub mod seed;
/// Aggregate population and food counters.
pub mod statistics;
/// The world model that owns seeds and statistics.
pub mod world;

/// Re-export error types.
pub use error::{TwError, TwResult};
/// Re-export seed types.
pub use seed::{Gender, LifeStage, Seed, SeedId};
/// Re-export the statistics aggregate.
pub use statistics::WorldStatistics;
/// Re-export world model types.
pub use world::{World, WorldMeta};

//! Yearly tick simulation and world rules for Tickworld.
//!
//! Provides a system-based simulation framework operating on a
//! [`tw_core::World`]. Each tick is one in-world year. The [`RuleEngine`]
//! system recomputes food and the death chance every year and grants an IQ
//! bonus to new seeds.

/// Simulation clock counting years.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Food, famine, spoilage, and crowding rules.
pub mod rules;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of the rule engine and its configuration.
pub use rules::{RuleConfig, RuleEngine, RuleReport};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;

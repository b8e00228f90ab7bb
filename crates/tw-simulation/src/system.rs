use tw_core::Seed;

use crate::context::SimContext;
use crate::error::SimResult;

/// A simulation subsystem driven by the world's signals.
///
/// Systems are executed in registration order. The system's [`name`](System::name)
/// is its namespace: a [`crate::Simulation`] holds at most one system per name.
pub trait System: std::fmt::Debug {
    /// Namespace of this system. Registering another system with the same
    /// name replaces this one.
    fn name(&self) -> &str;

    /// Called once per simulated year.
    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// Called once when the simulation is initialized. Optional setup hook.
    fn init(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }

    /// Called for every new seed before it is stored in the world.
    fn seed_added(&mut self, _seed: &mut Seed) {}

    /// Support downcasting to concrete types for cross-system communication.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Support downcasting to concrete types for cross-system communication.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

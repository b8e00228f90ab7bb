use tw_core::world::World;

use crate::clock::SimClock;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// The world being simulated.
    pub world: &'a mut World,
    /// The simulation clock, already advanced to the current year.
    pub clock: &'a SimClock,
    /// Event log for the run.
    pub events: &'a mut EventLog,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current year.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.year(), kind, description));
    }

    /// Current in-world year.
    pub fn year(&self) -> u64 {
        self.clock.year()
    }
}

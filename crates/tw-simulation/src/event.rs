use tw_core::SeedId;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    // Population
    /// A seed joined the world.
    SeedAdded {
        /// The new seed.
        seed: SeedId,
    },

    // Rules
    /// Food fell to or below the famine unit.
    Famine {
        /// Whole famine units of deficit.
        steps: u64,
        /// Death chance added by the famine rule.
        death_chance: f64,
    },
    /// Part of the food surplus spoiled.
    FoodSpoiled {
        /// Food removed by spoilage.
        amount: f64,
    },
    /// Population exceeded the population limit.
    Overcrowded {
        /// Seeds above the limit.
        excess: u64,
        /// Death chance added by the crowding rule.
        death_chance: f64,
    },

    // Custom
    /// A user-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
        /// The seeds involved in this custom event.
        seeds: Vec<SeedId>,
    },
}

impl SimEventKind {
    /// Check whether a given seed is involved in this event.
    pub fn involves(&self, id: SeedId) -> bool {
        match self {
            Self::SeedAdded { seed } => *seed == id,
            Self::Custom { seeds, .. } => seeds.contains(&id),
            Self::Famine { .. } | Self::FoodSpoiled { .. } | Self::Overcrowded { .. } => false,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The in-world year when this event occurred.
    pub year: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given year, kind, and description.
    pub fn new(year: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            year,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred in the given year.
    pub fn events_in_year(&self, year: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.year == year).collect()
    }

    /// Return all events involving the given seed.
    pub fn events_for_seed(&self, id: SeedId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// The in-world year when the simulation begins.
    pub start_year: u64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl SimConfig {
    /// Set the in-world year when the simulation begins.
    pub fn with_start_year(mut self, year: u64) -> Self {
        self.start_year = year;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}

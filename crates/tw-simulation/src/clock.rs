/// Tracks simulation time. One tick is one in-world year.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    start_year: u64,
}

impl SimClock {
    /// Create a new clock at tick 0 of the given year.
    pub fn new(start_year: u64) -> Self {
        Self {
            tick: 0,
            start_year,
        }
    }

    /// Advance the clock by one year. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current in-world year.
    pub fn year(&self) -> u64 {
        self.start_year + self.tick
    }

    /// The year the clock started at.
    pub fn start_year(&self) -> u64 {
        self.start_year
    }
}

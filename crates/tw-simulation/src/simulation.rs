use tracing::{debug, info, trace};
use tw_core::{Seed, SeedId, TwError, World};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::system::System;

/// The top-level simulation orchestrator.
///
/// Owns the world, clock, event log, and registered systems. Drives the
/// yearly tick loop and dispatches new seeds to every system.
pub struct Simulation {
    world: World,
    clock: SimClock,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("year", &self.clock.year())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation from a world and configuration.
    ///
    /// The world's `year` is set to the configured start year.
    pub fn new(mut world: World, config: SimConfig) -> Self {
        let clock = SimClock::new(config.start_year);
        world.statistics_mut().year = clock.year();
        Self {
            world,
            clock,
            events: EventLog::new(config.max_events),
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Register a system. Systems are ticked in registration order.
    ///
    /// A system whose name is already registered replaces the earlier one
    /// in place; the replaced system is returned.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> Option<Box<dyn System>> {
        let boxed: Box<dyn System> = Box::new(system);
        match self.systems.iter().position(|s| s.name() == boxed.name()) {
            Some(i) => {
                debug!(system = boxed.name(), "replacing registered system");
                Some(std::mem::replace(&mut self.systems[i], boxed))
            }
            None => {
                self.systems.push(boxed);
                None
            }
        }
    }

    /// Unregister the system with the given name.
    pub fn remove_system(&mut self, name: &str) -> Option<Box<dyn System>> {
        let i = self.systems.iter().position(|s| s.name() == name)?;
        Some(self.systems.remove(i))
    }

    /// Names of the registered systems in tick order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for system in &mut self.systems {
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
            };
            system.init(&mut ctx)?;
        }
        info!(
            world = %self.world.meta.name,
            year = self.clock.year(),
            systems = self.systems.len(),
            "simulation initialized"
        );
        self.initialized = true;
        Ok(())
    }

    /// Advance the simulation by one year.
    pub fn tick(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance();
        self.world.statistics_mut().year = self.clock.year();

        for system in &mut self.systems {
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
            };
            system.tick(&mut ctx)?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` years.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Introduce a new seed into the world.
    ///
    /// Every system sees the seed first (and may adjust it); then it is
    /// stored and a [`SimEventKind::SeedAdded`] event is recorded.
    pub fn add_seed(&mut self, mut seed: Seed) -> SimResult<SeedId> {
        if self.world.get_seed(seed.id).is_some() {
            return Err(TwError::DuplicateSeed(seed.id).into());
        }
        for system in &mut self.systems {
            system.seed_added(&mut seed);
        }
        let description = format!("{} {} joined with iq {}", seed.stage, seed.gender, seed.iq);
        let id = self.world.add_seed(seed)?;
        trace!(seed = %id, "seed added");
        self.events.push(SimEvent::new(
            self.clock.year(),
            SimEventKind::SeedAdded { seed: id },
            description,
        ));
        Ok(id)
    }

    /// The simulated world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the simulated world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Extract the world, consuming the simulation.
    pub fn into_world(self) -> World {
        self.world
    }

    /// Current in-world year.
    pub fn current_year(&self) -> u64 {
        self.clock.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::rules::{RuleConfig, RuleEngine};
    use tw_core::{WorldMeta, WorldStatistics};

    #[derive(Debug)]
    struct Counter {
        name: &'static str,
        ticks: u64,
        seeds: u64,
    }

    impl Counter {
        fn named(name: &'static str) -> Self {
            Self {
                name,
                ticks: 0,
                seeds: 0,
            }
        }
    }

    impl System for Counter {
        fn name(&self) -> &str {
            self.name
        }
        fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
            self.ticks += 1;
            Ok(())
        }
        fn seed_added(&mut self, _seed: &mut Seed) {
            self.seeds += 1;
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn village() -> World {
        let stats = WorldStatistics::with_food(0.0, 1_000.0);
        let mut world = World::with_statistics(WorldMeta::new("Village"), stats);
        for _ in 0..10 {
            world.add_seed(Seed::man()).unwrap();
            world.add_seed(Seed::woman()).unwrap();
        }
        for _ in 0..5 {
            world.add_seed(Seed::boy()).unwrap();
            world.add_seed(Seed::girl()).unwrap();
        }
        world
    }

    #[test]
    fn year_follows_clock() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default().with_start_year(1000));
        assert_eq!(sim.world().statistics().year, 1000);

        sim.run(5).unwrap();

        assert_eq!(sim.current_year(), 1005);
        assert_eq!(sim.clock().tick(), 5);
        assert_eq!(sim.world().statistics().year, 1005);
    }

    #[test]
    fn custom_system_registration() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        assert!(sim.add_system(Counter::named("counter")).is_none());

        sim.run(3).unwrap();

        let counter = sim.get_system::<Counter>().unwrap();
        assert_eq!(counter.ticks, 3);
    }

    #[test]
    fn same_name_replaces_in_place() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(Counter::named("first"));
        sim.add_system(RuleEngine::with_default_config());
        sim.run(2).unwrap();

        let replaced = sim.add_system(Counter::named("first")).unwrap();
        assert_eq!(replaced.name(), "first");
        assert_eq!(sim.system_names(), vec!["first", "rules"]);

        // The fresh counter starts from zero
        sim.tick().unwrap();
        assert_eq!(sim.get_system::<Counter>().unwrap().ticks, 1);
    }

    #[test]
    fn remove_system_by_name() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(RuleEngine::with_default_config());
        sim.add_system(Counter::named("counter"));

        assert!(sim.remove_system("rules").is_some());
        assert!(sim.remove_system("rules").is_none());
        assert_eq!(sim.system_names(), vec!["counter"]);
    }

    #[test]
    fn rules_run_each_year() {
        let mut sim = Simulation::new(village(), SimConfig::default());
        let mut config = RuleConfig::default();
        config.food_spoilage.decay_fraction = 0.0;
        sim.add_system(RuleEngine::new(config).unwrap());

        sim.run(3).unwrap();

        let stats = sim.world().statistics();
        // 20 adults harvest 20, 10 children eat 10: +10 food a year
        assert_eq!(stats.food, 30.0);
        assert_eq!(stats.food_resource, 940.0);
    }

    #[test]
    fn add_seed_dispatches_to_systems() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        let mut config = RuleConfig::default();
        config.base_iq = 20;
        sim.add_system(RuleEngine::new(config).unwrap());
        sim.add_system(Counter::named("counter"));

        let id = sim.add_seed(Seed::girl().with_iq(80)).unwrap();

        assert_eq!(sim.world().get_seed(id).unwrap().iq, 100);
        assert_eq!(sim.world().statistics().girls, 1);
        assert_eq!(sim.get_system::<Counter>().unwrap().seeds, 1);
        assert_eq!(sim.events().events_for_seed(id).len(), 1);
    }

    #[test]
    fn add_seed_rejects_duplicates_before_dispatch() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(Counter::named("counter"));
        let seed = Seed::man();

        sim.add_seed(seed.clone()).unwrap();
        let result = sim.add_seed(seed);

        assert!(matches!(
            result,
            Err(SimError::World(TwError::DuplicateSeed(_)))
        ));
        assert_eq!(sim.get_system::<Counter>().unwrap().seeds, 1);
    }

    #[test]
    fn famine_emits_event() {
        let stats = WorldStatistics::with_food(-250.0, 0.0);
        let world = World::with_statistics(WorldMeta::new("Barren"), stats);
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(RuleEngine::with_default_config());

        sim.tick().unwrap();

        let events = sim.events().events_in_year(1);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, SimEventKind::Famine { steps: 2, .. }));
        let rules = sim.get_system::<RuleEngine>().unwrap();
        assert!((rules.config().chance.death - 0.2).abs() < 1e-9);
    }

    #[test]
    fn tuning_rules_between_ticks() {
        let mut sim = Simulation::new(village(), SimConfig::default());
        sim.add_system(RuleEngine::with_default_config());
        sim.get_system_mut::<RuleEngine>()
            .unwrap()
            .config_mut()
            .population_limit = 20;

        sim.tick().unwrap();

        let rules = sim.get_system::<RuleEngine>().unwrap();
        assert!((rules.config().chance.death - 1.0).abs() < 1e-9);
        assert_eq!(sim.events().len(), 2); // spoilage and crowding
    }

    #[test]
    fn into_world_preserves_changes() {
        let mut sim = Simulation::new(village(), SimConfig::default());
        sim.add_system(RuleEngine::with_default_config());
        sim.run(1).unwrap();

        let world = sim.into_world();
        assert_eq!(world.statistics().food_resource, 980.0);
    }

    /// Records the current adults each year, or fails when `fail` is set.
    #[derive(Debug, Default)]
    struct Founders {
        fail: bool,
    }

    impl System for Founders {
        fn name(&self) -> &str {
            "founders"
        }
        fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
            if self.fail {
                return Err(SimError::SystemError("founders ledger closed".into()));
            }
            let adults: Vec<SeedId> = ctx
                .world
                .seeds()
                .filter(|s| s.is_adult())
                .map(|s| s.id)
                .collect();
            ctx.emit(
                SimEventKind::Custom {
                    label: "founders".into(),
                    seeds: adults,
                },
                "founders recorded",
            );
            Ok(())
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    #[test]
    fn custom_system_emits_custom_event() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(Founders::default());
        let man = sim.add_seed(Seed::man()).unwrap();
        let boy = sim.add_seed(Seed::boy()).unwrap();

        sim.tick().unwrap();

        let events = sim.events().events_in_year(1);
        assert_eq!(events.len(), 1);
        assert!(events[0].kind.involves(man));
        assert!(!events[0].kind.involves(boy));
        assert_eq!(sim.events().events_for_seed(man).len(), 2);
    }

    #[test]
    fn system_error_stops_the_tick() {
        let world = World::new(WorldMeta::new("Test"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(Founders { fail: true });
        sim.add_system(Counter::named("counter"));

        let result = sim.tick();

        assert!(matches!(result, Err(SimError::SystemError(_))));
        assert_eq!(sim.get_system::<Counter>().unwrap().ticks, 0);
    }

    #[test]
    fn empty_world_no_crash() {
        let world = World::new(WorldMeta::new("Empty"));
        let mut sim = Simulation::new(world, SimConfig::default());
        sim.add_system(RuleEngine::with_default_config());
        sim.run(100).unwrap();
        assert_eq!(sim.current_year(), 100);
        assert!(sim.events().is_empty());
    }
}

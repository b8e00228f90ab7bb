use serde::{Deserialize, Serialize};
use tracing::debug;
use tw_core::{Seed, WorldStatistics};

use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::SimEventKind;
use crate::system::System;

/// A set of per-year probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chances {
    /// Chance of dying this year.
    pub death: f64,
    /// Chance of marrying this year.
    pub marriage: f64,
    /// Chance of giving birth this year.
    pub childbirth: f64,
}

/// Food production and consumption rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodRules {
    /// Food harvested per adult per year.
    pub adult_production: f64,
    /// Food change per child per year. Negative: children consume.
    pub child_consumption: f64,
    /// Percent of food resource increase per ten years. Stored for external
    /// systems; the yearly rules do not apply it.
    pub resource_growth_rate: f64,
    /// Floor for the food balance.
    pub minimum: f64,
}

impl Default for FoodRules {
    fn default() -> Self {
        Self {
            adult_production: 1.0,
            child_consumption: -1.0,
            resource_growth_rate: 0.0,
            minimum: -10_000.0,
        }
    }
}

/// Death chance raised for every `unit` of food deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamineRules {
    /// Death chance added per whole unit of deficit.
    pub death_chance_increment: f64,
    /// Size of one deficit step. Negative.
    pub unit: f64,
}

impl Default for FamineRules {
    fn default() -> Self {
        Self {
            death_chance_increment: 0.1,
            unit: -100.0,
        }
    }
}

/// Periodic loss of a fraction of the food surplus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilageRules {
    /// Fraction of a positive food balance lost on a spoilage year (0.0..=1.0).
    pub decay_fraction: f64,
    /// Spoilage happens on years divisible by this.
    pub interval_years: u64,
}

impl Default for SpoilageRules {
    fn default() -> Self {
        Self {
            decay_fraction: 0.9,
            interval_years: 1,
        }
    }
}

/// Death chance raised for population above the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdingRules {
    /// Death chance added per seed above the limit.
    pub death_chance_increment: f64,
    /// Seeds per increment step. Stored only; the crowding rule always
    /// charges every excess seed.
    pub unit: u64,
}

impl Default for CrowdingRules {
    fn default() -> Self {
        Self {
            death_chance_increment: 0.1,
            unit: 1,
        }
    }
}

/// Tunable thresholds and rates of the world rules.
///
/// All fields are public and may be changed between ticks. `chance.death`
/// is an output: it is overwritten by every [`RuleEngine::change`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Soft population cap before crowding raises the death chance.
    pub population_limit: u64,
    /// IQ bonus applied to every new seed.
    pub base_iq: i32,
    /// Current chances read by aging and reproduction systems.
    pub chance: Chances,
    /// Externally set offsets added to `chance` each year.
    pub chance_increment: Chances,
    /// Food production and consumption.
    pub food: FoodRules,
    /// Famine penalty.
    pub famine: FamineRules,
    /// Food spoilage.
    pub food_spoilage: SpoilageRules,
    /// Crowding penalty.
    pub crowding: CrowdingRules,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            population_limit: 100,
            base_iq: 0,
            chance: Chances::default(),
            chance_increment: Chances::default(),
            food: FoodRules::default(),
            famine: FamineRules::default(),
            food_spoilage: SpoilageRules::default(),
            crowding: CrowdingRules::default(),
        }
    }
}

impl RuleConfig {
    /// Check that every value is in range.
    pub fn validate(&self) -> SimResult<()> {
        let reals = [
            ("chance_increment.death", self.chance_increment.death),
            ("chance_increment.marriage", self.chance_increment.marriage),
            ("chance_increment.childbirth", self.chance_increment.childbirth),
            ("food.adult_production", self.food.adult_production),
            ("food.child_consumption", self.food.child_consumption),
            ("food.resource_growth_rate", self.food.resource_growth_rate),
            ("food.minimum", self.food.minimum),
            ("famine.death_chance_increment", self.famine.death_chance_increment),
            ("famine.unit", self.famine.unit),
            ("food_spoilage.decay_fraction", self.food_spoilage.decay_fraction),
            ("crowding.death_chance_increment", self.crowding.death_chance_increment),
        ];
        if let Some((name, value)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite, got {value}")));
        }

        if self.food.adult_production < 0.0 {
            return Err(invalid("food.adult_production must not be negative"));
        }
        if self.food.child_consumption > 0.0 {
            return Err(invalid("food.child_consumption must not be positive"));
        }
        if self.food.minimum > 0.0 {
            return Err(invalid(format!(
                "food.minimum must not be positive, got {}",
                self.food.minimum
            )));
        }
        if self.food.resource_growth_rate < 0.0 {
            return Err(invalid("food.resource_growth_rate must not be negative"));
        }
        if self.famine.unit >= 0.0 {
            return Err(invalid(format!(
                "famine.unit must be negative, got {}",
                self.famine.unit
            )));
        }
        if !(0.0..=1.0).contains(&self.food_spoilage.decay_fraction) {
            return Err(invalid(format!(
                "food_spoilage.decay_fraction must be within 0..=1, got {}",
                self.food_spoilage.decay_fraction
            )));
        }
        if self.food_spoilage.interval_years == 0 {
            return Err(invalid("food_spoilage.interval_years must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidRule(msg.into())
}

/// Breakdown of one [`RuleEngine::change`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleReport {
    /// Food harvested from the food resource.
    pub food_produced: f64,
    /// Food change from children (negative when they eat).
    pub food_consumed: f64,
    /// Whole famine units of deficit. 0 when there is no famine.
    pub famine_steps: u64,
    /// Death chance contributed by famine.
    pub famine_death_chance: f64,
    /// Food lost to spoilage.
    pub food_spoiled: f64,
    /// Seeds above the population limit.
    pub crowding_excess: u64,
    /// Death chance contributed by crowding.
    pub crowding_death_chance: f64,
    /// The committed `chance.death`.
    pub death_chance: f64,
}

/// Applies the yearly world rules: food harvest and consumption, famine,
/// spoilage, and crowding. Also grants the configured IQ bonus to new seeds.
#[derive(Debug, Default)]
pub struct RuleEngine {
    config: RuleConfig,
}

impl RuleEngine {
    /// Create a rule engine after validating `config`.
    pub fn new(config: RuleConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a rule engine with the default rule table.
    pub fn with_default_config() -> Self {
        Self {
            config: RuleConfig::default(),
        }
    }

    /// Current rules.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Mutable access for tuning rules between ticks.
    pub fn config_mut(&mut self) -> &mut RuleConfig {
        &mut self.config
    }

    /// Add the configured IQ bonus to a newly created seed.
    pub fn on_seed_added(&self, seed: &mut Seed) {
        seed.iq += self.config.base_iq;
    }

    /// Recompute food and the death chance for the current year.
    ///
    /// Updates `food` and `food_resource` in `stats` and overwrites
    /// `chance.death` in the config. Never fails; a non-negative famine unit
    /// or a zero spoilage interval disables the affected rule.
    pub fn change(&mut self, stats: &mut WorldStatistics) -> RuleReport {
        let rules = &self.config;
        let mut report = RuleReport::default();

        let total_adults = stats.total_adults() as f64;
        let total_children = stats.total_children() as f64;
        let mut food = stats.food;
        let mut food_resource = stats.food_resource;

        // Harvest is capped by the resource, consumption is not
        report.food_produced = food_resource.min(total_adults * rules.food.adult_production);
        report.food_consumed = total_children * rules.food.child_consumption;

        food_resource = (food_resource - report.food_produced).max(0.0);
        food += report.food_produced + report.food_consumed;
        if food < rules.food.minimum {
            food = rules.food.minimum;
        }

        let mut death_chance = 0.0;

        if rules.famine.unit < 0.0 && food <= rules.famine.unit {
            let steps = (food / rules.famine.unit).floor();
            report.famine_steps = steps as u64;
            report.famine_death_chance = steps * rules.famine.death_chance_increment;
            death_chance += report.famine_death_chance;
        }

        let interval = rules.food_spoilage.interval_years;
        if interval > 0 && stats.year % interval == 0 && food > 0.0 {
            report.food_spoiled = (food * rules.food_spoilage.decay_fraction).floor();
            food -= report.food_spoiled;
        }

        if stats.population > rules.population_limit {
            report.crowding_excess = stats.population - rules.population_limit;
            report.crowding_death_chance =
                report.crowding_excess as f64 * rules.crowding.death_chance_increment;
            death_chance += report.crowding_death_chance;
        }

        report.death_chance = death_chance + rules.chance_increment.death;

        stats.food = food;
        stats.food_resource = food_resource;
        self.config.chance.death = report.death_chance;
        report
    }
}

impl System for RuleEngine {
    fn name(&self) -> &str {
        "rules"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let report = self.change(ctx.world.statistics_mut());

        let (year, food, food_resource) = {
            let stats = ctx.world.statistics();
            (stats.year, stats.food, stats.food_resource)
        };
        debug!(
            year,
            food,
            food_resource,
            produced = report.food_produced,
            consumed = report.food_consumed,
            death_chance = report.death_chance,
            "world rules applied"
        );

        if report.famine_steps > 0 {
            ctx.emit(
                SimEventKind::Famine {
                    steps: report.famine_steps,
                    death_chance: report.famine_death_chance,
                },
                format!("famine in year {year}: food at {food}"),
            );
        }
        if report.food_spoiled > 0.0 {
            ctx.emit(
                SimEventKind::FoodSpoiled {
                    amount: report.food_spoiled,
                },
                format!("{} food spoiled", report.food_spoiled),
            );
        }
        if report.crowding_excess > 0 {
            ctx.emit(
                SimEventKind::Overcrowded {
                    excess: report.crowding_excess,
                    death_chance: report.crowding_death_chance,
                },
                format!(
                    "population exceeds the limit by {}",
                    report.crowding_excess
                ),
            );
        }
        Ok(())
    }

    fn seed_added(&mut self, seed: &mut Seed) {
        self.on_seed_added(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

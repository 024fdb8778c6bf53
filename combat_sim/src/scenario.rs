//! Battle scenario configuration

use combat_core::config::{self, ConfigError};
use combat_core::{CombatConstants, UnitRoster, UnitTemplate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Scenario loading error
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown unit template: {0}")]
    UnknownTemplate(String),
    #[error("Team {0} has no units")]
    EmptyTeam(&'static str),
}

/// One group of identical units spawned on a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub template: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Lane offset on the y axis
    #[serde(default)]
    pub lane: f64,
}

fn default_count() -> u32 {
    1
}

/// A full battle setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub constants: CombatConstants,
    /// Distance between the two bases
    #[serde(default = "default_field_length")]
    pub field_length: f64,
    /// How far units notice enemies and structures
    #[serde(default = "default_sight_range")]
    pub sight_range: f64,
    #[serde(default = "default_base_health")]
    pub base_health: f64,
    /// Time limit in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: f64,
    /// Extra templates, overriding built-in ones with the same id
    #[serde(default)]
    pub units: Vec<UnitTemplate>,
    pub heroes: Vec<SpawnEntry>,
    pub enemies: Vec<SpawnEntry>,
}

fn default_field_length() -> f64 {
    1200.0
}
fn default_sight_range() -> f64 {
    350.0
}
fn default_base_health() -> f64 {
    600.0
}
fn default_max_ms() -> f64 {
    180_000.0
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let scenario: Scenario = config::load_toml(path)?;
        Ok(scenario)
    }

    /// Load a scenario from a TOML string
    pub fn parse(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = config::parse_toml(content)?;
        Ok(scenario)
    }

    /// The scenario shipped with the simulator
    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::parse(include_str!("../config/battle.toml"))
    }

    /// Built-in roster extended with this scenario's templates
    pub fn roster(&self) -> Result<UnitRoster, ScenarioError> {
        let mut roster = UnitRoster::with_defaults();
        let mut extra = UnitRoster::new();
        for template in &self.units {
            template.validate()?;
            extra.register(template.clone());
        }
        roster.merge(extra);
        self.validate(&roster)?;
        Ok(roster)
    }

    /// Check that both teams exist and every spawn names a known template
    pub fn validate(&self, roster: &UnitRoster) -> Result<(), ScenarioError> {
        if self.heroes.iter().all(|s| s.count == 0) {
            return Err(ScenarioError::EmptyTeam("heroes"));
        }
        if self.enemies.iter().all(|s| s.count == 0) {
            return Err(ScenarioError::EmptyTeam("enemies"));
        }
        for spawn in self.heroes.iter().chain(&self.enemies) {
            if roster.get(&spawn.template).is_none() {
                return Err(ScenarioError::UnknownTemplate(spawn.template.clone()));
            }
        }
        Ok(())
    }
}

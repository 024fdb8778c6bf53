//! Unit template configuration loading

use super::ConfigError;
use crate::effect::OnHitEffect;
use crate::entity::UnitStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Stats and traits shared by every unit spawned from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub id: String,
    pub name: String,
    pub max_health: f64,
    pub speed: f64,
    pub attack_damage: f64,
    pub attack_speed: f64,
    pub attack_range: f64,
    /// Base of the speed multiplier before effects
    #[serde(default = "default_speed_baseline")]
    pub speed_baseline: f64,
    #[serde(default)]
    pub revivable: bool,
    #[serde(default)]
    pub on_hit: Option<OnHitEffect>,
}

fn default_speed_baseline() -> f64 {
    1.0
}

impl UnitTemplate {
    pub fn stats(&self) -> UnitStats {
        UnitStats {
            max_health: self.max_health,
            speed: self.speed,
            attack_damage: self.attack_damage,
            attack_speed: self.attack_speed,
            attack_range: self.attack_range,
        }
    }

    /// Reject non-positive health, attack speed or range and negative rates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_health", self.max_health),
            ("attack_speed", self.attack_speed),
            ("attack_range", self.attack_range),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "unit '{}': {} must be positive, got {}",
                    self.id, field, value
                )));
            }
        }
        if self.speed < 0.0 || self.attack_damage < 0.0 || self.speed_baseline < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "unit '{}': speed, attack_damage and speed_baseline must not be negative",
                self.id
            )));
        }
        Ok(())
    }
}

/// Container for unit configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitsConfig {
    #[serde(default)]
    units: Vec<UnitTemplate>,
}

/// Unit templates keyed by id
#[derive(Debug, Clone, Default)]
pub struct UnitRoster {
    templates: BTreeMap<String, UnitTemplate>,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any with the same id
    pub fn register(&mut self, template: UnitTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &str) -> Option<&UnitTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitTemplate> {
        self.templates.values()
    }

    /// Built-in heroes and enemies
    pub fn with_defaults() -> Self {
        let toml = include_str!("../../config/units.toml");
        parse_unit_roster(toml).unwrap_or_else(|err| {
            tracing::error!(%err, "built-in unit roster is invalid");
            UnitRoster::new()
        })
    }

    /// Add every template of `other`, overriding on id clashes
    pub fn merge(&mut self, other: UnitRoster) {
        self.templates.extend(other.templates);
    }
}

fn roster_from(config: UnitsConfig) -> Result<UnitRoster, ConfigError> {
    let mut roster = UnitRoster::new();
    for template in config.units {
        template.validate()?;
        roster.register(template);
    }
    Ok(roster)
}

/// Load unit templates from a TOML file
pub fn load_unit_roster(path: &Path) -> Result<UnitRoster, ConfigError> {
    roster_from(super::load_toml(path)?)
}

/// Load unit templates from a TOML string
pub fn parse_unit_roster(content: &str) -> Result<UnitRoster, ConfigError> {
    roster_from(super::parse_toml(content)?)
}

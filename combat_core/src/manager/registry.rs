//! MultiplierRegistry - per-category effect id → multiplier mapping

use crate::types::EffectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stat a registry feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierCategory {
    Speed,
    AttackSpeed,
    AttackDamage,
}

impl MultiplierCategory {
    pub fn all() -> &'static [MultiplierCategory] {
        &[
            MultiplierCategory::Speed,
            MultiplierCategory::AttackSpeed,
            MultiplierCategory::AttackDamage,
        ]
    }
}

/// Multipliers registered by active effects for one category
///
/// Combined value is `Π(value)`; an empty registry is the identity (1.0).
/// Entries are kept ordered by id so the product is computed in the same
/// order every time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiplierRegistry {
    entries: BTreeMap<EffectId, f64>,
}

impl MultiplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value, returning the one it replaced
    pub fn insert(&mut self, id: EffectId, value: f64) -> Option<f64> {
        self.entries.insert(id, value)
    }

    pub fn remove(&mut self, id: &EffectId) -> Option<f64> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &EffectId) -> Option<f64> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &EffectId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EffectId, f64)> {
        self.entries.iter().map(|(id, value)| (id, *value))
    }

    /// Product of every registered value
    pub fn product(&self) -> f64 {
        self.entries.values().product()
    }
}

/// The three independent registries owned by one effect manager
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiplierRegistries {
    pub speed: MultiplierRegistry,
    pub attack_speed: MultiplierRegistry,
    pub attack_damage: MultiplierRegistry,
}

impl MultiplierRegistries {
    pub fn get(&self, category: MultiplierCategory) -> &MultiplierRegistry {
        match category {
            MultiplierCategory::Speed => &self.speed,
            MultiplierCategory::AttackSpeed => &self.attack_speed,
            MultiplierCategory::AttackDamage => &self.attack_damage,
        }
    }

    pub fn get_mut(&mut self, category: MultiplierCategory) -> &mut MultiplierRegistry {
        match category {
            MultiplierCategory::Speed => &mut self.speed,
            MultiplierCategory::AttackSpeed => &mut self.attack_speed,
            MultiplierCategory::AttackDamage => &mut self.attack_damage,
        }
    }
}

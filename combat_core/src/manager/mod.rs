//! StatusEffectManager - active effects and combined multipliers of one entity

mod registry;

pub use registry::{MultiplierCategory, MultiplierRegistries, MultiplierRegistry};

use crate::effect::{Pulse, StatusEffect};
use crate::entity::CombatEntity;
use crate::types::{EffectId, EffectType};
use std::collections::BTreeSet;

/// Outcome of [`StatusEffectManager::add_effect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectApplication {
    /// New effect, its multipliers are now registered
    Applied,
    /// An effect with the same id was already active; its duration was reset
    Refreshed,
}

/// Owns the active effects of one entity
///
/// Registries are mutated only in matched apply/remove pairs, and every
/// mutation republishes the combined multipliers onto the entity. Locks are
/// held apart from the registries: a locked category reads 0 whatever the
/// effects register, and effect bookkeeping never touches a lock.
#[derive(Debug, Clone)]
pub struct StatusEffectManager {
    effects: Vec<StatusEffect>,
    registries: MultiplierRegistries,
    /// Categories forced to zero by the current behavior state
    locked: BTreeSet<MultiplierCategory>,
    /// Per-entity base for the speed category
    speed_baseline: f64,
}

impl Default for StatusEffectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusEffectManager {
    pub fn new() -> Self {
        Self::with_speed_baseline(1.0)
    }

    pub fn with_speed_baseline(speed_baseline: f64) -> Self {
        StatusEffectManager {
            effects: Vec::new(),
            registries: MultiplierRegistries::default(),
            locked: BTreeSet::new(),
            speed_baseline,
        }
    }

    /// Add an effect, or refresh the active one with the same id
    pub fn add_effect<E: CombatEntity + ?Sized>(
        &mut self,
        effect: StatusEffect,
        entity: &mut E,
    ) -> EffectApplication {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id() == effect.id()) {
            existing.refresh(effect.duration());
            tracing::debug!(
                entity = entity.id(),
                effect = %effect.id(),
                duration = effect.duration(),
                "status effect refreshed"
            );
            return EffectApplication::Refreshed;
        }

        effect.apply(&mut self.registries);
        tracing::debug!(
            entity = entity.id(),
            effect = %effect.id(),
            kind = ?effect.kind(),
            duration = effect.duration(),
            "status effect applied"
        );
        self.effects.push(effect);
        self.publish(entity);
        EffectApplication::Applied
    }

    /// Remove an effect by id; absent ids are ignored
    pub fn remove_effect<E: CombatEntity + ?Sized>(&mut self, id: &EffectId, entity: &mut E) -> bool {
        let Some(index) = self.effects.iter().position(|e| e.id() == id) else {
            return false;
        };
        let effect = self.effects.remove(index);
        effect.remove(&mut self.registries);
        tracing::debug!(entity = entity.id(), effect = %id, "status effect removed");
        self.publish(entity);
        true
    }

    /// Age every effect, apply pulses, then drop the expired ones
    ///
    /// Returns the ids removed this tick.
    pub fn update<E: CombatEntity + ?Sized>(&mut self, delta: f64, entity: &mut E) -> Vec<EffectId> {
        for effect in self.effects.iter_mut() {
            match effect.update(delta) {
                Some(Pulse::Heal(amount)) => entity.heal(amount),
                Some(Pulse::Damage(amount)) => entity.take_damage(amount),
                None => {}
            }
        }

        let expired: Vec<EffectId> = self
            .effects
            .iter()
            .filter(|e| e.is_expired())
            .map(|e| e.id().clone())
            .collect();

        for id in &expired {
            tracing::trace!(entity = entity.id(), effect = %id, "status effect expired");
            self.remove_effect(id, entity);
        }

        expired
    }

    pub fn has_effect_type(&self, effect_type: EffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type() == effect_type)
    }

    pub fn effects_by_type(&self, effect_type: EffectType) -> Vec<&StatusEffect> {
        self.effects
            .iter()
            .filter(|e| e.effect_type() == effect_type)
            .collect()
    }

    pub fn get(&self, id: &EffectId) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EffectId) -> bool {
        self.get(id).is_some()
    }

    /// Active effects in application order
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Remove every effect, restoring what the effects contributed
    ///
    /// Locks survive; they belong to the behavior state that placed them.
    pub fn clear<E: CombatEntity + ?Sized>(&mut self, entity: &mut E) {
        for effect in self.effects.drain(..) {
            effect.remove(&mut self.registries);
        }
        tracing::debug!(entity = entity.id(), "status effects cleared");
        self.publish(entity);
    }

    /// Force a category to zero until [`unlock`](Self::unlock)
    ///
    /// Used for state-driven modifiers such as the stun lock.
    pub fn lock<E: CombatEntity + ?Sized>(&mut self, category: MultiplierCategory, entity: &mut E) {
        if self.locked.insert(category) {
            tracing::trace!(entity = entity.id(), ?category, "multiplier locked");
        }
        self.publish(entity);
    }

    pub fn unlock<E: CombatEntity + ?Sized>(
        &mut self,
        category: MultiplierCategory,
        entity: &mut E,
    ) -> bool {
        let removed = self.locked.remove(&category);
        if removed {
            tracing::trace!(entity = entity.id(), ?category, "multiplier unlocked");
            self.publish(entity);
        }
        removed
    }

    pub fn is_locked(&self, category: MultiplierCategory) -> bool {
        self.locked.contains(&category)
    }

    pub fn registries(&self) -> &MultiplierRegistries {
        &self.registries
    }

    pub fn speed_baseline(&self) -> f64 {
        self.speed_baseline
    }

    /// Combined multiplier: base × Π(registered values), or 0 while locked
    pub fn multiplier(&self, category: MultiplierCategory) -> f64 {
        if self.is_locked(category) {
            return 0.0;
        }
        let base = match category {
            MultiplierCategory::Speed => self.speed_baseline,
            MultiplierCategory::AttackSpeed | MultiplierCategory::AttackDamage => 1.0,
        };
        base * self.registries.get(category).product()
    }

    /// Write the combined multipliers onto the entity and its animation rate
    pub fn publish<E: CombatEntity + ?Sized>(&self, entity: &mut E) {
        let speed = self.multiplier(MultiplierCategory::Speed);
        let attack_speed = self.multiplier(MultiplierCategory::AttackSpeed);
        let attack_damage = self.multiplier(MultiplierCategory::AttackDamage);

        let multipliers = entity.multipliers_mut();
        multipliers.speed = speed;
        multipliers.attack_speed = attack_speed;
        multipliers.attack_damage = attack_damage;

        entity.visuals().set_animation_rate(speed);
    }
}

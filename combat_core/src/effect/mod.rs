//! Status effects - timed modifiers applied to combat entities

mod id;
mod kind;
mod on_hit;
mod presets;

pub use id::{EffectIdGenerator, RandomIds, SequentialIds};
pub use kind::{EffectKind, IconConfig};
pub use on_hit::OnHitEffect;
pub use presets::EffectPresets;

use crate::manager::MultiplierRegistries;
use crate::types::{EffectId, EffectType};
use serde::{Deserialize, Serialize};

/// Class-wide id shared by every slow, so a second slow refreshes the first
pub const SLOW_EFFECT_ID: &str = "slow";

/// Health change produced by a pulse effect during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pulse {
    Heal(f64),
    Damage(f64),
}

/// One active timed modifier
///
/// The kind is fixed at construction; only the timers change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    id: EffectId,
    kind: EffectKind,
    /// Total duration in milliseconds
    duration: f64,
    /// Milliseconds left, never negative
    remaining: f64,
    /// Time accumulated toward the next pulse
    #[serde(default)]
    pulse_elapsed: f64,
}

impl StatusEffect {
    /// Create an effect with an explicit id
    pub fn new(id: impl Into<EffectId>, kind: EffectKind, duration: f64) -> Self {
        let duration = duration.max(0.0);
        StatusEffect {
            id: id.into(),
            kind,
            duration,
            remaining: duration,
            pulse_elapsed: 0.0,
        }
    }

    /// Create an effect whose id comes from `ids`, except for fixed-id kinds
    pub fn generated(kind: EffectKind, duration: f64, ids: &mut dyn EffectIdGenerator) -> Self {
        let id = match kind {
            EffectKind::Slow { .. } => EffectId::from(SLOW_EFFECT_ID),
            _ => ids.next_id(kind.effect_type()),
        };
        Self::new(id, kind, duration)
    }

    pub fn attack_damage(multiplier: f64, duration: f64, ids: &mut dyn EffectIdGenerator) -> Self {
        Self::generated(EffectKind::AttackDamage { multiplier }, duration, ids)
    }

    pub fn attack_speed(multiplier: f64, duration: f64, ids: &mut dyn EffectIdGenerator) -> Self {
        Self::generated(EffectKind::AttackSpeed { multiplier }, duration, ids)
    }

    pub fn move_speed(multiplier: f64, duration: f64, ids: &mut dyn EffectIdGenerator) -> Self {
        Self::generated(EffectKind::MoveSpeed { multiplier }, duration, ids)
    }

    /// Slow always carries [`SLOW_EFFECT_ID`], no generator needed
    pub fn slow(multiplier: f64, duration: f64) -> Self {
        Self::new(SLOW_EFFECT_ID, EffectKind::Slow { multiplier }, duration)
    }

    pub fn heal_over_time(
        amount: f64,
        interval: f64,
        duration: f64,
        ids: &mut dyn EffectIdGenerator,
    ) -> Self {
        Self::generated(EffectKind::HealOverTime { amount, interval }, duration, ids)
    }

    pub fn damage_over_time(
        amount: f64,
        interval: f64,
        duration: f64,
        ids: &mut dyn EffectIdGenerator,
    ) -> Self {
        Self::generated(EffectKind::DamageOverTime { amount, interval }, duration, ids)
    }

    pub fn id(&self) -> &EffectId {
        &self.id
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn effect_type(&self) -> EffectType {
        self.kind.effect_type()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn remaining_time(&self) -> f64 {
        self.remaining
    }

    pub fn icon(&self) -> Option<IconConfig> {
        self.kind.icon()
    }

    /// Register this effect's multipliers
    pub fn apply(&self, registries: &mut MultiplierRegistries) {
        match self.kind {
            EffectKind::AttackDamage { multiplier } => {
                registries.attack_damage.insert(self.id.clone(), multiplier);
            }
            EffectKind::AttackSpeed { multiplier } => {
                registries.attack_speed.insert(self.id.clone(), multiplier);
            }
            EffectKind::MoveSpeed { multiplier } => {
                registries.speed.insert(self.id.clone(), multiplier);
            }
            EffectKind::Slow { multiplier } => {
                registries.speed.insert(self.id.clone(), multiplier);
                registries.attack_speed.insert(self.id.clone(), multiplier);
            }
            EffectKind::HealOverTime { .. } | EffectKind::DamageOverTime { .. } => {}
        }
    }

    /// Unregister everything [`apply`](Self::apply) registered
    pub fn remove(&self, registries: &mut MultiplierRegistries) {
        match self.kind {
            EffectKind::AttackDamage { .. } => {
                registries.attack_damage.remove(&self.id);
            }
            EffectKind::AttackSpeed { .. } => {
                registries.attack_speed.remove(&self.id);
            }
            EffectKind::MoveSpeed { .. } => {
                registries.speed.remove(&self.id);
            }
            EffectKind::Slow { .. } => {
                registries.speed.remove(&self.id);
                registries.attack_speed.remove(&self.id);
            }
            EffectKind::HealOverTime { .. } | EffectKind::DamageOverTime { .. } => {}
        }
    }

    /// Age the effect by `delta` milliseconds
    ///
    /// Pulse kinds return the health change accumulated over the active part
    /// of `delta`; time past expiry never pulses.
    pub fn update(&mut self, delta: f64) -> Option<Pulse> {
        let active = delta.max(0.0).min(self.remaining);
        self.remaining = (self.remaining - delta.max(0.0)).max(0.0);

        let (amount, interval) = match self.kind {
            EffectKind::HealOverTime { amount, interval }
            | EffectKind::DamageOverTime { amount, interval } => (amount, interval),
            _ => return None,
        };
        if interval <= 0.0 {
            return None;
        }

        self.pulse_elapsed += active;
        let pulses = (self.pulse_elapsed / interval).floor();
        if pulses < 1.0 {
            return None;
        }
        self.pulse_elapsed -= pulses * interval;

        let total = amount * pulses;
        match self.kind {
            EffectKind::HealOverTime { .. } => Some(Pulse::Heal(total)),
            _ => Some(Pulse::Damage(total)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the timer with a new duration (re-application of the same id)
    pub fn refresh(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_expires_at_duration() {
        let mut ids = SequentialIds::new();
        let mut effect = StatusEffect::move_speed(0.5, 2000.0, &mut ids);

        effect.update(1500.0);
        assert!(!effect.is_expired());
        assert!((effect.remaining_time() - 500.0).abs() < f64::EPSILON);

        effect.update(500.0);
        assert!(effect.is_expired());
    }

    #[test]
    fn test_remaining_time_floored_at_zero() {
        let mut effect = StatusEffect::slow(0.5, 100.0);
        effect.update(250.0);
        assert_eq!(effect.remaining_time(), 0.0);
        assert!(effect.is_expired());
    }

    #[test]
    fn test_slow_uses_fixed_id() {
        let mut ids = SequentialIds::new();
        let a = StatusEffect::slow(0.5, 1000.0);
        let b = StatusEffect::generated(EffectKind::Slow { multiplier: 0.7 }, 1000.0, &mut ids);
        assert_eq!(a.id(), b.id());
        assert_eq!(a.id().as_str(), SLOW_EFFECT_ID);
    }

    #[test]
    fn test_apply_and_remove_registries() {
        let mut registries = MultiplierRegistries::default();
        let slow = StatusEffect::slow(0.5, 1000.0);

        slow.apply(&mut registries);
        assert_eq!(registries.speed.len(), 1);
        assert_eq!(registries.attack_speed.len(), 1);
        assert!(registries.attack_damage.is_empty());

        slow.remove(&mut registries);
        assert!(registries.speed.is_empty());
        assert!(registries.attack_speed.is_empty());
    }

    #[test]
    fn test_heal_over_time_pulses() {
        let mut ids = SequentialIds::new();
        let mut regen = StatusEffect::heal_over_time(10.0, 1000.0, 3000.0, &mut ids);

        assert_eq!(regen.update(600.0), None);
        assert_eq!(regen.update(600.0), Some(Pulse::Heal(10.0)));
        // 2200ms of the remaining 1800ms count; the rest is past expiry
        assert_eq!(regen.update(2200.0), Some(Pulse::Heal(20.0)));
        assert!(regen.is_expired());
    }

    #[test]
    fn test_damage_over_time_pulses() {
        let mut ids = SequentialIds::new();
        let mut poison = StatusEffect::damage_over_time(5.0, 500.0, 2000.0, &mut ids);
        assert_eq!(poison.update(1000.0), Some(Pulse::Damage(10.0)));
    }

    #[test]
    fn test_refresh_resets_timer() {
        let mut effect = StatusEffect::slow(0.5, 1000.0);
        effect.update(800.0);
        effect.refresh(3000.0);
        assert!((effect.remaining_time() - 3000.0).abs() < f64::EPSILON);
        assert!((effect.duration() - 3000.0).abs() < f64::EPSILON);
    }
}

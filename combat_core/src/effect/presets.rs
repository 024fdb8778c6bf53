//! Common effect presets

use super::{EffectIdGenerator, StatusEffect};

/// Ready-made effects used by skills and items
pub struct EffectPresets;

impl EffectPresets {
    /// +50% attack speed for 5s
    pub fn haste(ids: &mut dyn EffectIdGenerator) -> StatusEffect {
        StatusEffect::attack_speed(1.5, 5000.0, ids)
    }

    /// +50% attack damage for 5s
    pub fn rage(ids: &mut dyn EffectIdGenerator) -> StatusEffect {
        StatusEffect::attack_damage(1.5, 5000.0, ids)
    }

    /// +30% movement speed for 4s
    pub fn swift(ids: &mut dyn EffectIdGenerator) -> StatusEffect {
        StatusEffect::move_speed(1.3, 4000.0, ids)
    }

    /// Halves movement and attack speed for 2s
    pub fn frost_slow() -> StatusEffect {
        StatusEffect::slow(0.5, 2000.0)
    }

    /// 10 health per second for 5s
    pub fn regeneration(ids: &mut dyn EffectIdGenerator) -> StatusEffect {
        StatusEffect::heal_over_time(10.0, 1000.0, 5000.0, ids)
    }

    /// 5 damage per second for 4s
    pub fn poison(ids: &mut dyn EffectIdGenerator) -> StatusEffect {
        StatusEffect::damage_over_time(5.0, 1000.0, 4000.0, ids)
    }
}

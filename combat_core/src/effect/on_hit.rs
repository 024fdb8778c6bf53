//! Effects carried by attacks

use super::{EffectIdGenerator, StatusEffect};
use serde::{Deserialize, Serialize};

/// Effect a unit's attacks attach to the target on impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnHitEffect {
    /// Slow movement and attack speed
    Slow { multiplier: f64, duration: f64 },
    /// Reduce attack damage
    Weaken { multiplier: f64, duration: f64 },
    /// Damage over time
    Poison {
        amount: f64,
        #[serde(default = "default_pulse_interval")]
        interval: f64,
        duration: f64,
    },
    /// Stun the target; handled by the state machine, not the effect manager
    Stun { duration: f64 },
}

fn default_pulse_interval() -> f64 {
    1000.0
}

impl OnHitEffect {
    /// Build the status effect this on-hit applies, if it is one
    pub fn to_status_effect(&self, ids: &mut dyn EffectIdGenerator) -> Option<StatusEffect> {
        match *self {
            OnHitEffect::Slow {
                multiplier,
                duration,
            } => Some(StatusEffect::slow(multiplier, duration)),
            OnHitEffect::Weaken {
                multiplier,
                duration,
            } => Some(StatusEffect::attack_damage(multiplier, duration, ids)),
            OnHitEffect::Poison {
                amount,
                interval,
                duration,
            } => Some(StatusEffect::damage_over_time(amount, interval, duration, ids)),
            OnHitEffect::Stun { .. } => None,
        }
    }

    /// Stun duration, if this on-hit stuns
    pub fn stun_duration(&self) -> Option<f64> {
        match self {
            OnHitEffect::Stun { duration } => Some(*duration),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{SequentialIds, SLOW_EFFECT_ID};
    use crate::types::EffectType;

    #[test]
    fn test_slow_on_hit() {
        let mut ids = SequentialIds::new();
        let effect = OnHitEffect::Slow {
            multiplier: 0.6,
            duration: 2000.0,
        }
        .to_status_effect(&mut ids)
        .unwrap();
        assert_eq!(effect.id().as_str(), SLOW_EFFECT_ID);
    }

    #[test]
    fn test_stun_is_not_a_status_effect() {
        let mut ids = SequentialIds::new();
        let stun = OnHitEffect::Stun { duration: 500.0 };
        assert!(stun.to_status_effect(&mut ids).is_none());
        assert_eq!(stun.stun_duration(), Some(500.0));
    }

    #[test]
    fn test_parse_poison_default_interval() {
        let on_hit: OnHitEffect =
            toml::from_str("kind = \"poison\"\namount = 4.0\nduration = 3000.0\n").unwrap();
        let mut ids = SequentialIds::new();
        let effect = on_hit.to_status_effect(&mut ids).unwrap();
        assert_eq!(effect.effect_type(), EffectType::DamageOverTime);
        assert!((effect.duration() - 3000.0).abs() < f64::EPSILON);
    }
}

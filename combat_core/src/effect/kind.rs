//! Effect kind definitions

use crate::types::EffectType;
use serde::{Deserialize, Serialize};

/// The closed set of status effect variants
///
/// Multiplier variants register into the manager's registries while active.
/// Pulse variants (heal/damage over time) register nothing and instead act on
/// the entity's health every `interval` milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    AttackDamage { multiplier: f64 },
    AttackSpeed { multiplier: f64 },
    MoveSpeed { multiplier: f64 },
    /// Same multiplier on movement and attack speed, under a fixed id
    Slow { multiplier: f64 },
    HealOverTime { amount: f64, interval: f64 },
    DamageOverTime { amount: f64, interval: f64 },
}

impl EffectKind {
    /// Category this kind is reported under
    pub fn effect_type(&self) -> EffectType {
        match self {
            EffectKind::AttackDamage { .. } => EffectType::AttackDamage,
            EffectKind::AttackSpeed { .. } => EffectType::AttackSpeed,
            EffectKind::MoveSpeed { .. } | EffectKind::Slow { .. } => EffectType::MoveSpeed,
            EffectKind::HealOverTime { .. } => EffectType::HealOverTime,
            EffectKind::DamageOverTime { .. } => EffectType::DamageOverTime,
        }
    }

    /// Whether this kind acts on health instead of multipliers
    pub fn is_pulse(&self) -> bool {
        matches!(
            self,
            EffectKind::HealOverTime { .. } | EffectKind::DamageOverTime { .. }
        )
    }

    /// Whether this kind is harmful to its holder
    pub fn is_debuff(&self) -> bool {
        match self {
            EffectKind::AttackDamage { multiplier }
            | EffectKind::AttackSpeed { multiplier }
            | EffectKind::MoveSpeed { multiplier } => *multiplier < 1.0,
            EffectKind::Slow { .. } | EffectKind::DamageOverTime { .. } => true,
            EffectKind::HealOverTime { .. } => false,
        }
    }
}

/// Visual hint for the icon drawn over an affected entity
///
/// Ignored by the combat logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconConfig {
    /// Texture key in the visual collaborator's atlas
    pub texture: &'static str,
    /// RGB tint
    pub tint: u32,
}

impl EffectKind {
    pub fn icon(&self) -> Option<IconConfig> {
        let icon = match self {
            EffectKind::AttackDamage { multiplier } if *multiplier >= 1.0 => IconConfig {
                texture: "icon_attack_up",
                tint: 0xff5533,
            },
            EffectKind::AttackDamage { .. } => IconConfig {
                texture: "icon_attack_down",
                tint: 0x885544,
            },
            EffectKind::AttackSpeed { .. } => IconConfig {
                texture: "icon_haste",
                tint: 0xffcc00,
            },
            EffectKind::MoveSpeed { .. } => IconConfig {
                texture: "icon_boots",
                tint: 0x33ccff,
            },
            EffectKind::Slow { .. } => IconConfig {
                texture: "icon_slow",
                tint: 0x6699ff,
            },
            EffectKind::HealOverTime { .. } => IconConfig {
                texture: "icon_regen",
                tint: 0x33ff66,
            },
            // poison is shown through the entity tint, not an icon
            EffectKind::DamageOverTime { .. } => return None,
        };
        Some(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_reports_as_move_speed() {
        let kind = EffectKind::Slow { multiplier: 0.5 };
        assert_eq!(kind.effect_type(), EffectType::MoveSpeed);
        assert!(kind.is_debuff());
        assert!(!kind.is_pulse());
    }

    #[test]
    fn test_debuff_by_multiplier() {
        assert!(EffectKind::AttackSpeed { multiplier: 0.8 }.is_debuff());
        assert!(!EffectKind::AttackSpeed { multiplier: 1.2 }.is_debuff());
    }

    #[test]
    fn test_kind_serialization() {
        let kind = EffectKind::HealOverTime {
            amount: 10.0,
            interval: 1000.0,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"kind\":\"heal_over_time\""));
        assert!(kind.icon().is_some());
        assert!(EffectKind::DamageOverTime { amount: 1.0, interval: 1.0 }
            .icon()
            .is_none());
    }
}

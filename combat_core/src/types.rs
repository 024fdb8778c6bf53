//! Core types shared by the state machine and the effect engine

use crate::effect::OnHitEffect;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive combat behavior of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    Moving,
    Attacking,
    Stunned,
    Reviving,
    Dead,
}

impl BehaviorState {
    /// Get all behavior states
    pub fn all() -> &'static [BehaviorState] {
        &[
            BehaviorState::Moving,
            BehaviorState::Attacking,
            BehaviorState::Stunned,
            BehaviorState::Reviving,
            BehaviorState::Dead,
        ]
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviorState::Moving => "MOVING",
            BehaviorState::Attacking => "ATTACKING",
            BehaviorState::Stunned => "STUNNED",
            BehaviorState::Reviving => "REVIVING",
            BehaviorState::Dead => "DEAD",
        };
        f.write_str(name)
    }
}

/// Category of a status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    AttackSpeed,
    AttackDamage,
    MoveSpeed,
    HealOverTime,
    DamageOverTime,
}

impl EffectType {
    /// Stable snake_case key, used as the prefix of generated effect ids
    pub fn key(self) -> &'static str {
        match self {
            EffectType::AttackSpeed => "attack_speed",
            EffectType::AttackDamage => "attack_damage",
            EffectType::MoveSpeed => "move_speed",
            EffectType::HealOverTime => "heal_over_time",
            EffectType::DamageOverTime => "damage_over_time",
        }
    }
}

/// Identifier of an active status effect
///
/// Two effects with the same id never coexist on one entity: the later one
/// refreshes the earlier one's duration instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub String);

impl EffectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        EffectId(s.to_string())
    }
}

impl From<String> for EffectId {
    fn from(s: String) -> Self {
        EffectId(s)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side an entity fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Heroes,
    Enemies,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Heroes => Team::Enemies,
            Team::Enemies => Team::Heroes,
        }
    }

    /// Lane direction along the x axis (+1 for heroes, -1 for enemies)
    pub fn forward(self) -> DVec2 {
        match self {
            Team::Heroes => DVec2::X,
            Team::Enemies => DVec2::NEG_X,
        }
    }
}

/// What a target is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Unit,
    Structure,
}

/// Result of target acquisition, treated as a snapshot for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub kind: TargetKind,
    pub position: DVec2,
}

impl Target {
    pub fn unit(id: impl Into<String>, position: DVec2) -> Self {
        Target {
            id: id.into(),
            kind: TargetKind::Unit,
            position,
        }
    }

    pub fn structure(id: impl Into<String>, position: DVec2) -> Self {
        Target {
            id: id.into(),
            kind: TargetKind::Structure,
            position,
        }
    }
}

/// An attack that landed this tick, waiting to be routed to its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackHit {
    pub attacker_id: String,
    pub target_id: String,
    pub damage: f64,
    /// Effect carried by the attack, applied to the target on impact
    #[serde(default)]
    pub on_hit: Option<OnHitEffect>,
}

/// Game-level notifications raised by an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    /// Health reached zero
    HpZero { entity_id: String },
    /// Entity entered the dead state
    Died { entity_id: String, team: Team },
    /// Entity came back from the dead
    Revived { entity_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_state_display() {
        assert_eq!(BehaviorState::Moving.to_string(), "MOVING");
        assert_eq!(BehaviorState::Dead.to_string(), "DEAD");
        assert_eq!(BehaviorState::all().len(), 5);
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Heroes.opponent(), Team::Enemies);
        assert_eq!(Team::Enemies.opponent(), Team::Heroes);
        assert_eq!(Team::Enemies.forward(), DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_event_serialization() {
        let event = CombatEvent::Died {
            entity_id: "knight".to_string(),
            team: Team::Heroes,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"died\""));
        assert!(json.contains("heroes"));
    }
}

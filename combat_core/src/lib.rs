//! combat_core - Combat behavior and status effects for lane combatants
//!
//! This library provides:
//! - StateMachine: per-entity behavior (moving, attacking, stunned, reviving, dead)
//! - StatusEffect: timed multiplier and heal/damage-over-time modifiers
//! - StatusEffectManager: refresh-on-duplicate effect set with multiplicative registries
//! - CombatEntity: the capability contract both of the above drive
//! - Combatant: one entity bundled with its effect manager and state machine

pub mod config;
pub mod effect;
pub mod entity;
pub mod manager;
pub mod prelude;
pub mod state;
pub mod types;

// Re-export core types for convenience
pub use config::{CombatConstants, ConfigError, UnitRoster, UnitTemplate};
pub use effect::{
    EffectIdGenerator, EffectKind, EffectPresets, OnHitEffect, RandomIds, SequentialIds,
    StatusEffect, SLOW_EFFECT_ID,
};
pub use entity::{CombatEntity, Combatant, Multipliers, Unit, UnitStats, Visuals};
pub use manager::{EffectApplication, MultiplierCategory, StatusEffectManager};
pub use state::{StateHandler, StateMachine, TransitionError};
pub use types::{AttackHit, BehaviorState, CombatEvent, EffectId, EffectType, Target, TargetKind, Team};

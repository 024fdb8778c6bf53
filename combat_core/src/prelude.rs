//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{AttackHit, BehaviorState, CombatEvent, EffectId, EffectType, Target, Team};

// Entities
pub use crate::entity::{AnimationCue, CombatEntity, Combatant, Unit, UnitStats, Visuals};

// Effects
pub use crate::effect::{EffectIdGenerator, EffectKind, EffectPresets, SequentialIds, StatusEffect};
pub use crate::manager::{EffectApplication, MultiplierCategory, StatusEffectManager};

// Behavior
pub use crate::state::{StateContext, StateHandler, StateMachine, TransitionError};

// Config
pub use crate::config::{CombatConstants, UnitRoster};

//! Behavior state machine driving every combat entity

mod attacking;
mod dead;
mod distance;
mod machine;
mod moving;
mod reviving;
mod stunned;

pub use attacking::AttackingState;
pub use dead::DeadState;
pub use distance::{engagement_distance, in_attack_range};
pub use machine::StateMachine;
pub use moving::MovingState;
pub use reviving::RevivingState;
pub use stunned::{StunnedState, STUN_LOCKED};

pub use crate::types::BehaviorState;

use crate::entity::CombatEntity;
use crate::manager::StatusEffectManager;
use thiserror::Error;

/// Why a transition did not happen
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("transition {from} -> {to} refused by the current state")]
    Refused { from: BehaviorState, to: BehaviorState },
    #[error("no handler registered for state {0}")]
    Unregistered(BehaviorState),
    #[error("revive needs a dead, revivable entity (state {state:?}, revivable {revivable})")]
    CannotRevive {
        state: Option<BehaviorState>,
        revivable: bool,
    },
}

/// Per-entity timers shared between the combatant and its state handlers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Blackboard {
    /// Milliseconds of stun left
    pub stun_remaining: f64,
    /// Milliseconds until a revive completes
    pub revive_remaining: f64,
    /// `on_death` already fired for the current time at zero health
    pub death_reported: bool,
}

/// Everything a state handler may touch during one call
pub struct StateContext<'a, E: CombatEntity + ?Sized> {
    pub entity: &'a mut E,
    pub effects: &'a mut StatusEffectManager,
    pub blackboard: &'a mut Blackboard,
}

impl<'a, E: CombatEntity + ?Sized> StateContext<'a, E> {
    pub fn new(
        entity: &'a mut E,
        effects: &'a mut StatusEffectManager,
        blackboard: &'a mut Blackboard,
    ) -> Self {
        StateContext {
            entity,
            effects,
            blackboard,
        }
    }
}

/// Behavior of one [`BehaviorState`]
pub trait StateHandler<E: CombatEntity + ?Sized> {
    fn enter(&mut self, _ctx: &mut StateContext<'_, E>) {}

    /// Run one tick; the returned state is requested through the legality
    /// check of this handler
    fn update(&mut self, ctx: &mut StateContext<'_, E>, delta: f64) -> Option<BehaviorState>;

    fn exit(&mut self, _ctx: &mut StateContext<'_, E>) {}

    /// Whether `next` may follow this state
    fn can_transition_to(&self, _next: BehaviorState) -> bool {
        true
    }
}

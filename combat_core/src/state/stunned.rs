//! Stunned - inert until the stun timer runs out

use super::{BehaviorState, StateContext, StateHandler};
use crate::entity::CombatEntity;
use crate::manager::MultiplierCategory;

/// Categories held at zero while stunned
pub const STUN_LOCKED: [MultiplierCategory; 2] =
    [MultiplierCategory::Speed, MultiplierCategory::AttackSpeed];

/// Locks movement and attack speed at zero
///
/// The lock is held by the effect manager next to, not inside, its
/// registries. Effects keep stacking underneath it, and leaving the state
/// drops it so the multipliers go back to what the effects alone dictate.
#[derive(Debug, Clone, Copy)]
pub struct StunnedState {
    /// Used when the state is entered without a pending stun timer
    default_duration: f64,
}

impl StunnedState {
    pub fn new(default_duration: f64) -> Self {
        StunnedState { default_duration }
    }
}

impl<E: CombatEntity + ?Sized> StateHandler<E> for StunnedState {
    fn enter(&mut self, ctx: &mut StateContext<'_, E>) {
        if ctx.blackboard.stun_remaining <= 0.0 {
            ctx.blackboard.stun_remaining = self.default_duration;
        }

        for category in STUN_LOCKED {
            ctx.effects.lock(category, &mut *ctx.entity);
        }

        ctx.entity.play_stun_animation();
        ctx.entity.visuals().set_stun_indicator(true);
    }

    fn update(&mut self, ctx: &mut StateContext<'_, E>, delta: f64) -> Option<BehaviorState> {
        if ctx.entity.is_dead() {
            return Some(BehaviorState::Dead);
        }

        ctx.blackboard.stun_remaining = (ctx.blackboard.stun_remaining - delta).max(0.0);
        if ctx.blackboard.stun_remaining <= 0.0 {
            return Some(BehaviorState::Moving);
        }
        None
    }

    fn exit(&mut self, ctx: &mut StateContext<'_, E>) {
        for category in STUN_LOCKED {
            ctx.effects.unlock(category, &mut *ctx.entity);
        }

        ctx.blackboard.stun_remaining = 0.0;
        ctx.entity.visuals().set_stun_indicator(false);
    }
}

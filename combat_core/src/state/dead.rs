//! Dead - terminal

use super::{BehaviorState, StateContext, StateHandler};
use crate::entity::CombatEntity;

/// Refuses every transition; only a forced change leaves it
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadState;

impl<E: CombatEntity + ?Sized> StateHandler<E> for DeadState {
    fn enter(&mut self, ctx: &mut StateContext<'_, E>) {
        ctx.entity.play_dead_animation();
        ctx.effects.clear(&mut *ctx.entity);
        // a forced exit at zero health lands back here without a new death
        if !ctx.blackboard.death_reported {
            ctx.blackboard.death_reported = true;
            ctx.entity.on_death();
        }
    }

    fn update(&mut self, _ctx: &mut StateContext<'_, E>, _delta: f64) -> Option<BehaviorState> {
        None
    }

    fn can_transition_to(&self, _next: BehaviorState) -> bool {
        false
    }
}

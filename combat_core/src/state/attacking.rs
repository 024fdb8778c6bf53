//! Attacking - hit the target while it stays in range

use super::{in_attack_range, BehaviorState, StateContext, StateHandler};
use crate::entity::CombatEntity;

#[derive(Debug, Clone, Copy)]
pub struct AttackingState {
    melee_range_threshold: f64,
}

impl AttackingState {
    pub fn new(melee_range_threshold: f64) -> Self {
        AttackingState {
            melee_range_threshold,
        }
    }
}

impl<E: CombatEntity + ?Sized> StateHandler<E> for AttackingState {
    fn enter(&mut self, ctx: &mut StateContext<'_, E>) {
        ctx.entity.play_idle_animation();
    }

    fn update(&mut self, ctx: &mut StateContext<'_, E>, _delta: f64) -> Option<BehaviorState> {
        if ctx.entity.is_dead() {
            return Some(BehaviorState::Dead);
        }

        let Some(target) = ctx.entity.find_target() else {
            return Some(BehaviorState::Moving);
        };
        if !in_attack_range(&*ctx.entity, &target, self.melee_range_threshold) {
            return Some(BehaviorState::Moving);
        }

        ctx.entity.attack(&target);
        None
    }
}

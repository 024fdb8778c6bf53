//! Moving - advance until something is in range

use super::{in_attack_range, BehaviorState, StateContext, StateHandler};
use crate::entity::CombatEntity;

#[derive(Debug, Clone, Copy)]
pub struct MovingState {
    melee_range_threshold: f64,
}

impl MovingState {
    pub fn new(melee_range_threshold: f64) -> Self {
        MovingState {
            melee_range_threshold,
        }
    }
}

impl<E: CombatEntity + ?Sized> StateHandler<E> for MovingState {
    fn enter(&mut self, ctx: &mut StateContext<'_, E>) {
        ctx.entity.play_move_animation();
    }

    fn update(&mut self, ctx: &mut StateContext<'_, E>, delta: f64) -> Option<BehaviorState> {
        if ctx.entity.is_dead() {
            return Some(BehaviorState::Dead);
        }

        match ctx.entity.find_target() {
            Some(target) if in_attack_range(&*ctx.entity, &target, self.melee_range_threshold) => {
                Some(BehaviorState::Attacking)
            }
            Some(target) => {
                ctx.entity.move_toward(target.position, delta);
                None
            }
            None => {
                ctx.entity.move_forward(delta);
                None
            }
        }
    }
}

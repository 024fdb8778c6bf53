//! Reviving - hidden until the revive completes

use super::{BehaviorState, StateContext, StateHandler};
use crate::entity::CombatEntity;

/// Only [`BehaviorState::Moving`] may follow
#[derive(Debug, Clone, Copy, Default)]
pub struct RevivingState;

impl<E: CombatEntity + ?Sized> StateHandler<E> for RevivingState {
    fn enter(&mut self, ctx: &mut StateContext<'_, E>) {
        ctx.entity.visuals().set_visible(false);
    }

    fn update(&mut self, _ctx: &mut StateContext<'_, E>, _delta: f64) -> Option<BehaviorState> {
        None
    }

    fn exit(&mut self, ctx: &mut StateContext<'_, E>) {
        ctx.entity.visuals().set_visible(true);
    }

    fn can_transition_to(&self, next: BehaviorState) -> bool {
        next == BehaviorState::Moving
    }
}

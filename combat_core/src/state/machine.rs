//! StateMachine - registered handlers plus current/previous state

use super::{
    AttackingState, BehaviorState, DeadState, MovingState, RevivingState, StateContext,
    StateHandler, StunnedState, TransitionError,
};
use crate::config::CombatConstants;
use crate::entity::CombatEntity;
use std::collections::HashMap;

/// Generic controller bound to one entity
///
/// The registration table is filled at construction. `current` is `None`
/// only until the first transition.
pub struct StateMachine<E: CombatEntity + ?Sized> {
    states: HashMap<BehaviorState, Box<dyn StateHandler<E>>>,
    current: Option<BehaviorState>,
    previous: Option<BehaviorState>,
}

impl<E: CombatEntity + ?Sized> Default for StateMachine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CombatEntity + ?Sized> StateMachine<E> {
    /// Create a machine with no registered states
    pub fn new() -> Self {
        StateMachine {
            states: HashMap::new(),
            current: None,
            previous: None,
        }
    }

    /// Create a machine with the five standard handlers registered
    pub fn with_default_states(constants: &CombatConstants) -> Self {
        let mut machine = Self::new();
        machine.register_state(
            BehaviorState::Moving,
            MovingState::new(constants.melee_range_threshold),
        );
        machine.register_state(
            BehaviorState::Attacking,
            AttackingState::new(constants.melee_range_threshold),
        );
        machine.register_state(
            BehaviorState::Stunned,
            StunnedState::new(constants.default_stun_ms),
        );
        machine.register_state(BehaviorState::Reviving, RevivingState);
        machine.register_state(BehaviorState::Dead, DeadState);
        machine
    }

    /// Associate a handler with a state; a later registration replaces it
    pub fn register_state<H>(&mut self, state: BehaviorState, handler: H)
    where
        H: StateHandler<E> + 'static,
    {
        if self.states.insert(state, Box::new(handler)).is_some() {
            tracing::debug!(%state, "state handler replaced");
        }
    }

    pub fn is_registered(&self, state: BehaviorState) -> bool {
        self.states.contains_key(&state)
    }

    /// Transition through the current handler's legality check
    ///
    /// Requesting the current state is a no-op.
    pub fn change_state(
        &mut self,
        next: BehaviorState,
        ctx: &mut StateContext<'_, E>,
    ) -> Result<(), TransitionError> {
        if self.current == Some(next) {
            return Ok(());
        }
        if let Some(current) = self.current {
            let allowed = self
                .states
                .get(&current)
                .map_or(true, |handler| handler.can_transition_to(next));
            if !allowed {
                tracing::warn!(
                    entity = ctx.entity.id(),
                    from = %current,
                    to = %next,
                    "illegal state transition refused"
                );
                return Err(TransitionError::Refused { from: current, to: next });
            }
        }
        self.transition(next, ctx)
    }

    /// Transition without consulting the legality check
    pub fn force_change_state(
        &mut self,
        next: BehaviorState,
        ctx: &mut StateContext<'_, E>,
    ) -> Result<(), TransitionError> {
        if self.current == Some(next) {
            return Ok(());
        }
        self.transition(next, ctx)
    }

    fn transition(
        &mut self,
        next: BehaviorState,
        ctx: &mut StateContext<'_, E>,
    ) -> Result<(), TransitionError> {
        if !self.states.contains_key(&next) {
            tracing::warn!(entity = ctx.entity.id(), to = %next, "state not registered");
            return Err(TransitionError::Unregistered(next));
        }

        if let Some(handler) = self.current.and_then(|current| self.states.get_mut(&current)) {
            handler.exit(ctx);
        }

        tracing::debug!(
            entity = ctx.entity.id(),
            from = ?self.current,
            to = %next,
            "state transition"
        );
        self.previous = self.current;
        self.current = Some(next);

        if let Some(handler) = self.states.get_mut(&next) {
            handler.enter(ctx);
        }
        Ok(())
    }

    /// Run the current handler and follow the transition it requests
    pub fn update(&mut self, ctx: &mut StateContext<'_, E>, delta: f64) {
        let Some(current) = self.current else {
            return;
        };
        let Some(handler) = self.states.get_mut(&current) else {
            return;
        };
        if let Some(next) = handler.update(ctx, delta) {
            // refusals are logged by change_state
            let _ = self.change_state(next, ctx);
        }
    }

    pub fn current_state(&self) -> Option<BehaviorState> {
        self.current
    }

    pub fn previous_state(&self) -> Option<BehaviorState> {
        self.previous
    }

    pub fn is_in_state(&self, state: BehaviorState) -> bool {
        self.current == Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Unit, UnitStats};
    use crate::manager::StatusEffectManager;
    use crate::state::Blackboard;
    use crate::types::Team;
    use glam::DVec2;

    struct Fixture {
        unit: Unit,
        effects: StatusEffectManager,
        blackboard: Blackboard,
        machine: StateMachine<Unit>,
    }

    impl Fixture {
        fn new() -> Self {
            let unit = Unit::new(
                "unit",
                Team::Heroes,
                DVec2::ZERO,
                UnitStats {
                    max_health: 100.0,
                    speed: 100.0,
                    attack_damage: 10.0,
                    attack_speed: 1.0,
                    attack_range: 50.0,
                },
            );
            Fixture {
                unit,
                effects: StatusEffectManager::new(),
                blackboard: Blackboard::default(),
                machine: StateMachine::with_default_states(&CombatConstants::default()),
            }
        }

        fn change(&mut self, state: BehaviorState) -> Result<(), TransitionError> {
            let mut ctx = StateContext::new(&mut self.unit, &mut self.effects, &mut self.blackboard);
            self.machine.change_state(state, &mut ctx)
        }

        fn force(&mut self, state: BehaviorState) -> Result<(), TransitionError> {
            let mut ctx = StateContext::new(&mut self.unit, &mut self.effects, &mut self.blackboard);
            self.machine.force_change_state(state, &mut ctx)
        }
    }

    #[test]
    fn test_starts_without_state() {
        let fixture = Fixture::new();
        assert_eq!(fixture.machine.current_state(), None);
        assert_eq!(fixture.machine.previous_state(), None);
    }

    #[test]
    fn test_change_tracks_previous() {
        let mut fixture = Fixture::new();
        fixture.change(BehaviorState::Moving).unwrap();
        fixture.change(BehaviorState::Attacking).unwrap();

        assert!(fixture.machine.is_in_state(BehaviorState::Attacking));
        assert_eq!(fixture.machine.previous_state(), Some(BehaviorState::Moving));
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut fixture = Fixture::new();
        fixture.change(BehaviorState::Moving).unwrap();
        fixture.change(BehaviorState::Attacking).unwrap();
        fixture.change(BehaviorState::Attacking).unwrap();
        assert_eq!(fixture.machine.previous_state(), Some(BehaviorState::Moving));
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut fixture = Fixture::new();
        fixture.change(BehaviorState::Moving).unwrap();
        fixture.change(BehaviorState::Dead).unwrap();

        for state in [
            BehaviorState::Moving,
            BehaviorState::Attacking,
            BehaviorState::Stunned,
            BehaviorState::Reviving,
        ] {
            assert_eq!(
                fixture.change(state),
                Err(TransitionError::Refused {
                    from: BehaviorState::Dead,
                    to: state
                })
            );
            assert!(fixture.machine.is_in_state(BehaviorState::Dead));
        }

        fixture.force(BehaviorState::Reviving).unwrap();
        assert!(fixture.machine.is_in_state(BehaviorState::Reviving));
    }

    #[test]
    fn test_reviving_only_allows_moving() {
        let mut fixture = Fixture::new();
        fixture.force(BehaviorState::Reviving).unwrap();

        for state in [
            BehaviorState::Attacking,
            BehaviorState::Stunned,
            BehaviorState::Dead,
        ] {
            assert!(fixture.change(state).is_err());
            assert!(fixture.machine.is_in_state(BehaviorState::Reviving));
        }

        fixture.change(BehaviorState::Moving).unwrap();
        assert!(fixture.machine.is_in_state(BehaviorState::Moving));
    }

    #[test]
    fn test_unregistered_state_keeps_prior() {
        let mut fixture = Fixture::new();
        fixture.machine = StateMachine::new();
        fixture.machine.register_state(BehaviorState::Moving, MovingState::new(100.0));
        fixture.change(BehaviorState::Moving).unwrap();

        assert_eq!(
            fixture.change(BehaviorState::Stunned),
            Err(TransitionError::Unregistered(BehaviorState::Stunned))
        );
        assert!(fixture.machine.is_in_state(BehaviorState::Moving));
        assert_eq!(fixture.machine.previous_state(), None);
    }

    #[test]
    fn test_update_without_state_is_noop() {
        let mut fixture = Fixture::new();
        let mut ctx = StateContext::new(&mut fixture.unit, &mut fixture.effects, &mut fixture.blackboard);
        fixture.machine.update(&mut ctx, 16.0);
        assert_eq!(fixture.machine.current_state(), None);
        assert_eq!(fixture.unit.position(), DVec2::ZERO);
    }
}

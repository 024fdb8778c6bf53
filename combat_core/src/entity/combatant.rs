//! Combatant - an entity together with its effect manager and state machine

use super::CombatEntity;
use crate::config::CombatConstants;
use crate::effect::StatusEffect;
use crate::manager::{EffectApplication, StatusEffectManager};
use crate::state::{Blackboard, StateContext, StateMachine, TransitionError};
use crate::types::{BehaviorState, EffectId, EffectType};

/// Owns one entity, its status effects and its behavior
///
/// Nothing here is shared with other combatants. Each tick runs entity
/// bookkeeping, then effect aging (so multipliers are current), then the
/// state machine.
pub struct Combatant<E: CombatEntity> {
    body: E,
    effects: StatusEffectManager,
    machine: StateMachine<E>,
    blackboard: Blackboard,
    constants: CombatConstants,
    revivable: bool,
}

impl<E: CombatEntity> Combatant<E> {
    /// Wrap `body` with the standard states and enter MOVING
    pub fn new(body: E, constants: CombatConstants) -> Self {
        let machine = StateMachine::with_default_states(&constants);
        Self::with_machine(body, machine, constants)
    }

    /// Wrap `body` with a custom state table and enter MOVING
    pub fn with_machine(mut body: E, machine: StateMachine<E>, constants: CombatConstants) -> Self {
        let effects = StatusEffectManager::with_speed_baseline(body.speed_baseline());
        effects.publish(&mut body);

        let mut combatant = Combatant {
            body,
            effects,
            machine,
            blackboard: Blackboard::default(),
            constants,
            revivable: false,
        };
        // an unregistered MOVING leaves the machine without a state, which update tolerates
        let _ = combatant.change_state(BehaviorState::Moving);
        combatant
    }

    pub fn with_revive(mut self, revivable: bool) -> Self {
        self.revivable = revivable;
        self
    }

    pub fn body(&self) -> &E {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut E {
        &mut self.body
    }

    pub fn effects(&self) -> &StatusEffectManager {
        &self.effects
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn is_revivable(&self) -> bool {
        self.revivable
    }

    // === Tick ===

    /// Advance this combatant by `delta` milliseconds
    pub fn update(&mut self, delta: f64) {
        self.body.on_tick(delta);
        self.effects.update(delta, &mut self.body);
        if !self.body.is_dead() {
            self.blackboard.death_reported = false;
        }

        if self.machine.is_in_state(BehaviorState::Reviving) {
            self.blackboard.revive_remaining = (self.blackboard.revive_remaining - delta).max(0.0);
            if self.blackboard.revive_remaining <= 0.0 {
                self.finish_revive();
            }
        }

        let mut ctx = StateContext::new(&mut self.body, &mut self.effects, &mut self.blackboard);
        self.machine.update(&mut ctx, delta);
    }

    // === Effects ===

    pub fn add_effect(&mut self, effect: StatusEffect) -> EffectApplication {
        self.effects.add_effect(effect, &mut self.body)
    }

    pub fn remove_effect(&mut self, id: &EffectId) -> bool {
        self.effects.remove_effect(id, &mut self.body)
    }

    pub fn has_effect_type(&self, effect_type: EffectType) -> bool {
        self.effects.has_effect_type(effect_type)
    }

    pub fn clear_effects(&mut self) {
        self.effects.clear(&mut self.body);
    }

    // === States ===

    pub fn state(&self) -> Option<BehaviorState> {
        self.machine.current_state()
    }

    pub fn previous_state(&self) -> Option<BehaviorState> {
        self.machine.previous_state()
    }

    pub fn is_in_state(&self, state: BehaviorState) -> bool {
        self.machine.is_in_state(state)
    }

    pub fn change_state(&mut self, next: BehaviorState) -> Result<(), TransitionError> {
        let mut ctx = StateContext::new(&mut self.body, &mut self.effects, &mut self.blackboard);
        self.machine.change_state(next, &mut ctx)
    }

    pub fn force_change_state(&mut self, next: BehaviorState) -> Result<(), TransitionError> {
        let mut ctx = StateContext::new(&mut self.body, &mut self.effects, &mut self.blackboard);
        self.machine.force_change_state(next, &mut ctx)
    }

    /// Stun for `duration` ms; a running stun keeps the longer of the two
    pub fn stun(&mut self, duration: f64) -> Result<(), TransitionError> {
        let previous = self.blackboard.stun_remaining;
        self.blackboard.stun_remaining = previous.max(duration);

        let result = self.change_state(BehaviorState::Stunned);
        if result.is_err() {
            self.blackboard.stun_remaining = previous;
        }
        result
    }

    /// Start bringing a dead combatant back
    ///
    /// Forces DEAD → REVIVING; the revive completes on its own after
    /// `revive_delay_ms`, moving the combatant back to MOVING at full health.
    pub fn begin_revive(&mut self) -> Result<(), TransitionError> {
        if !self.revivable || !self.is_in_state(BehaviorState::Dead) {
            tracing::warn!(
                entity = self.body.id(),
                state = ?self.state(),
                revivable = self.revivable,
                "revive refused"
            );
            return Err(TransitionError::CannotRevive {
                state: self.state(),
                revivable: self.revivable,
            });
        }

        self.force_change_state(BehaviorState::Reviving)?;
        self.blackboard.revive_remaining = self.constants.revive_delay_ms;
        Ok(())
    }

    fn finish_revive(&mut self) {
        self.body.restore_health();
        self.blackboard.death_reported = false;
        if self.change_state(BehaviorState::Moving).is_ok() {
            tracing::debug!(entity = self.body.id(), "revived");
            self.body.on_revive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectPresets, SequentialIds};
    use crate::entity::{AnimationCue, RecordingVisuals, Unit, UnitStats, VisualCall};
    use crate::types::{CombatEvent, Target, Team};
    use glam::DVec2;

    fn stats(attack_range: f64) -> UnitStats {
        UnitStats {
            max_health: 100.0,
            speed: 100.0,
            attack_damage: 10.0,
            attack_speed: 1.0,
            attack_range,
        }
    }

    fn combatant(attack_range: f64) -> (Combatant<Unit>, RecordingVisuals) {
        let recorder = RecordingVisuals::new();
        let unit = Unit::new("hero", Team::Heroes, DVec2::ZERO, stats(attack_range))
            .with_visuals(Box::new(recorder.clone()));
        (Combatant::new(unit, CombatConstants::default()), recorder)
    }

    #[test]
    fn test_spawns_moving() {
        let (combatant, recorder) = combatant(50.0);
        assert_eq!(combatant.state(), Some(BehaviorState::Moving));
        assert_eq!(recorder.cues(), vec![AnimationCue::Move]);
    }

    #[test]
    fn test_moves_forward_without_target() {
        let (mut combatant, _) = combatant(50.0);
        combatant.update(1000.0);
        assert!((combatant.body().position().x - 100.0).abs() < 1e-9);
        assert!(combatant.is_in_state(BehaviorState::Moving));
    }

    #[test]
    fn test_attacks_target_in_range() {
        let (mut combatant, recorder) = combatant(80.0);
        combatant
            .body_mut()
            .set_perception(vec![Target::unit("orc", DVec2::new(50.0, 500.0))]);

        combatant.update(16.0);
        assert!(combatant.is_in_state(BehaviorState::Attacking));

        combatant.update(16.0);
        let hits = combatant.body_mut().drain_hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target_id, "orc");
        assert_eq!(
            recorder.cues(),
            vec![AnimationCue::Move, AnimationCue::Idle, AnimationCue::Attack]
        );
    }

    #[test]
    fn test_ranged_out_of_range_keeps_moving() {
        let (mut combatant, _) = combatant(300.0);
        combatant
            .body_mut()
            .set_perception(vec![Target::unit("orc", DVec2::new(50.0, 500.0))]);

        combatant.update(16.0);
        assert!(combatant.is_in_state(BehaviorState::Moving));
        // walked toward the target
        assert!(combatant.body().position().y > 0.0);
    }

    #[test]
    fn test_target_lost_returns_to_moving() {
        let (mut combatant, _) = combatant(80.0);
        combatant
            .body_mut()
            .set_perception(vec![Target::unit("orc", DVec2::new(40.0, 0.0))]);
        combatant.update(16.0);
        assert!(combatant.is_in_state(BehaviorState::Attacking));

        combatant.body_mut().set_perception(Vec::new());
        combatant.update(16.0);
        assert!(combatant.is_in_state(BehaviorState::Moving));
    }

    #[test]
    fn test_stun_locks_and_recovers() {
        let (mut combatant, recorder) = combatant(50.0);
        let mut ids = SequentialIds::new();
        combatant.add_effect(EffectPresets::swift(&mut ids));

        combatant.stun(500.0).unwrap();
        assert!(combatant.is_in_state(BehaviorState::Stunned));
        assert_eq!(combatant.body().multipliers().speed, 0.0);
        assert_eq!(combatant.body().multipliers().attack_speed, 0.0);

        combatant.update(300.0);
        assert!(combatant.is_in_state(BehaviorState::Stunned));
        assert_eq!(combatant.body().position(), DVec2::ZERO);

        combatant.update(300.0);
        assert!(combatant.is_in_state(BehaviorState::Moving));
        assert!((combatant.body().multipliers().speed - 1.3).abs() < 1e-12);
        assert_eq!(combatant.body().multipliers().attack_speed, 1.0);

        let calls = recorder.calls();
        assert!(calls.contains(&VisualCall::StunIndicator(true)));
        assert!(calls.contains(&VisualCall::StunIndicator(false)));
    }

    #[test]
    fn test_restun_keeps_longer_timer() {
        let (mut combatant, _) = combatant(50.0);
        combatant.stun(1000.0).unwrap();
        combatant.stun(200.0).unwrap();
        assert!((combatant.blackboard().stun_remaining - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_death_clears_effects_and_notifies() {
        let (mut combatant, recorder) = combatant(50.0);
        combatant.add_effect(EffectPresets::frost_slow());

        combatant.body_mut().take_damage(500.0);
        combatant.update(16.0);

        assert!(combatant.is_in_state(BehaviorState::Dead));
        assert!(combatant.effects().is_empty());
        assert_eq!(combatant.body().multipliers().speed, 1.0);
        assert_eq!(recorder.cues().last(), Some(&AnimationCue::Dead));

        let events = combatant.body_mut().drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CombatEvent::HpZero { .. }));
        assert!(matches!(events[1], CombatEvent::Died { .. }));

        assert!(combatant.stun(500.0).is_err());
        assert!(combatant.is_in_state(BehaviorState::Dead));
    }

    #[test]
    fn test_revive_cycle() {
        let (combatant, recorder) = combatant(50.0);
        let mut combatant = combatant.with_revive(true);
        combatant.body_mut().take_damage(500.0);
        combatant.update(16.0);

        combatant.begin_revive().unwrap();
        assert!(combatant.is_in_state(BehaviorState::Reviving));
        assert!(recorder.calls().contains(&VisualCall::Visible(false)));

        assert!(combatant.change_state(BehaviorState::Attacking).is_err());

        let delay = CombatConstants::default().revive_delay_ms;
        combatant.update(delay);
        assert!(combatant.is_in_state(BehaviorState::Moving));
        assert_eq!(combatant.previous_state(), Some(BehaviorState::Reviving));
        assert!((combatant.body().current_health() - 100.0).abs() < f64::EPSILON);
        assert_eq!(recorder.calls().last(), Some(&VisualCall::Play(AnimationCue::Move)));
    }

    #[test]
    fn test_revive_requires_flag_and_death() {
        let (combatant, _) = combatant(50.0);
        let mut revivable = combatant.with_revive(true);
        assert_eq!(
            revivable.begin_revive(),
            Err(TransitionError::CannotRevive {
                state: Some(BehaviorState::Moving),
                revivable: true,
            })
        );

        let mut combatant = revivable.with_revive(false);
        combatant.body_mut().take_damage(500.0);
        combatant.update(16.0);
        assert_eq!(
            combatant.begin_revive(),
            Err(TransitionError::CannotRevive {
                state: Some(BehaviorState::Dead),
                revivable: false,
            })
        );
        assert!(combatant.is_in_state(BehaviorState::Dead));
    }
}

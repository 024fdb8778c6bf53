//! Combat entity contract and the reference unit implementation

mod combatant;
mod unit;
mod visuals;

pub use combatant::Combatant;
pub use unit::{Unit, UnitStats};
pub use visuals::{AnimationCue, NullVisuals, RecordingVisuals, VisualCall, Visuals};

use crate::types::{Target, Team};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Combined effect multipliers published by the entity's effect manager
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub speed: f64,
    pub attack_speed: f64,
    pub attack_damage: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Multipliers {
            speed: 1.0,
            attack_speed: 1.0,
            attack_damage: 1.0,
        }
    }
}

/// Capabilities every combatant exposes to the state machine and the
/// effect manager
///
/// The state machine and effect manager are owned next to the entity by
/// [`Combatant`], never reached through it. Animation is delegated to the
/// [`Visuals`] strategy returned by [`visuals`](Self::visuals).
pub trait CombatEntity {
    fn id(&self) -> &str;

    fn team(&self) -> Team;

    fn position(&self) -> DVec2;

    fn multipliers(&self) -> &Multipliers;

    fn multipliers_mut(&mut self) -> &mut Multipliers;

    fn visuals(&mut self) -> &mut dyn Visuals;

    /// Per-entity base of the speed multiplier
    fn speed_baseline(&self) -> f64 {
        1.0
    }

    // === Health ===

    fn current_health(&self) -> f64;

    fn max_health(&self) -> f64;

    fn take_damage(&mut self, amount: f64);

    fn heal(&mut self, amount: f64);

    /// Refill health after a revive
    fn restore_health(&mut self);

    fn is_dead(&self) -> bool {
        self.current_health() <= 0.0
    }

    // === Movement and targeting ===

    /// Advance along the entity's lane direction
    fn move_forward(&mut self, delta: f64);

    fn move_toward(&mut self, point: DVec2, delta: f64);

    fn find_target(&self) -> Option<Target>;

    fn attack(&mut self, target: &Target);

    // === Effective stats ===

    fn speed(&self) -> f64;

    fn attack_damage(&self) -> f64;

    fn attack_speed(&self) -> f64;

    fn attack_range(&self) -> f64;

    // === Notifications ===

    fn on_death(&mut self);

    fn on_hp_zero(&mut self);

    fn on_revive(&mut self) {}

    /// Per-tick bookkeeping of the concrete entity (cooldowns), run before
    /// effects and behavior
    fn on_tick(&mut self, _delta: f64) {}

    // === Animation triggers ===

    fn play_idle_animation(&mut self) {
        self.visuals().play(AnimationCue::Idle);
    }

    fn play_move_animation(&mut self) {
        self.visuals().play(AnimationCue::Move);
    }

    fn play_attack_animation(&mut self) {
        self.visuals().play(AnimationCue::Attack);
    }

    fn play_stun_animation(&mut self) {
        self.visuals().play(AnimationCue::Stun);
    }

    fn play_dead_animation(&mut self) {
        self.visuals().play(AnimationCue::Dead);
    }
}

//! Unit - generic lane combatant (heroes, enemies, summons)

use super::{CombatEntity, Multipliers, NullVisuals, Visuals};
use crate::config::UnitTemplate;
use crate::effect::OnHitEffect;
use crate::types::{AttackHit, CombatEvent, Target, Team};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base stats before effect multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_health: f64,
    /// Distance units per second
    pub speed: f64,
    pub attack_damage: f64,
    /// Attacks per second
    pub attack_speed: f64,
    pub attack_range: f64,
}

/// A combatant walking a lane
///
/// Target acquisition works on the perception snapshot handed in by the
/// game loop each tick. Attacks and notifications are queued in an outbox
/// the loop drains; a unit never touches another entity directly.
pub struct Unit {
    id: String,
    team: Team,
    position: DVec2,
    stats: UnitStats,
    health: f64,
    speed_baseline: f64,
    multipliers: Multipliers,
    visuals: Box<dyn Visuals>,
    on_hit: Option<OnHitEffect>,

    /// Eligible targets for this tick
    perception: Vec<Target>,
    /// Milliseconds until the next attack may fire
    attack_cooldown: f64,

    hits: Vec<AttackHit>,
    events: Vec<CombatEvent>,
}

impl Unit {
    pub fn new(id: impl Into<String>, team: Team, position: DVec2, stats: UnitStats) -> Self {
        Unit {
            id: id.into(),
            team,
            position,
            stats,
            health: stats.max_health,
            speed_baseline: 1.0,
            multipliers: Multipliers::default(),
            visuals: Box::new(NullVisuals),
            on_hit: None,
            perception: Vec::new(),
            attack_cooldown: 0.0,
            hits: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create a unit from a roster template
    pub fn from_template(
        id: impl Into<String>,
        team: Team,
        position: DVec2,
        template: &UnitTemplate,
    ) -> Self {
        let mut unit = Unit::new(id, team, position, template.stats());
        unit.speed_baseline = template.speed_baseline;
        unit.on_hit = template.on_hit.clone();
        unit
    }

    pub fn with_visuals(mut self, visuals: Box<dyn Visuals>) -> Self {
        self.visuals = visuals;
        self
    }

    pub fn with_on_hit(mut self, on_hit: OnHitEffect) -> Self {
        self.on_hit = Some(on_hit);
        self
    }

    pub fn with_speed_baseline(mut self, baseline: f64) -> Self {
        self.speed_baseline = baseline;
        self
    }

    pub fn stats(&self) -> &UnitStats {
        &self.stats
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Replace the targets this unit can see
    pub fn set_perception(&mut self, targets: Vec<Target>) {
        self.perception = targets;
    }

    pub fn attack_cooldown(&self) -> f64 {
        self.attack_cooldown
    }

    /// Attacks fired since the last drain
    pub fn drain_hits(&mut self) -> Vec<AttackHit> {
        std::mem::take(&mut self.hits)
    }

    /// Notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.id)
            .field("team", &self.team)
            .field("position", &self.position)
            .field("health", &self.health)
            .field("multipliers", &self.multipliers)
            .finish_non_exhaustive()
    }
}

impl CombatEntity for Unit {
    fn id(&self) -> &str {
        &self.id
    }

    fn team(&self) -> Team {
        self.team
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn multipliers(&self) -> &Multipliers {
        &self.multipliers
    }

    fn multipliers_mut(&mut self) -> &mut Multipliers {
        &mut self.multipliers
    }

    fn visuals(&mut self) -> &mut dyn Visuals {
        self.visuals.as_mut()
    }

    fn speed_baseline(&self) -> f64 {
        self.speed_baseline
    }

    fn current_health(&self) -> f64 {
        self.health
    }

    fn max_health(&self) -> f64 {
        self.stats.max_health
    }

    fn take_damage(&mut self, amount: f64) {
        if self.is_dead() || amount <= 0.0 {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.on_hp_zero();
        }
    }

    fn heal(&mut self, amount: f64) {
        if self.is_dead() || amount <= 0.0 {
            return;
        }
        self.health = (self.health + amount).min(self.stats.max_health);
    }

    fn restore_health(&mut self) {
        self.health = self.stats.max_health;
    }

    fn move_forward(&mut self, delta: f64) {
        let step = self.speed() * delta / 1000.0;
        self.position += self.team.forward() * step;
    }

    fn move_toward(&mut self, point: DVec2, delta: f64) {
        let step = self.speed() * delta / 1000.0;
        let offset = point - self.position;
        let distance = offset.length();
        if distance <= step {
            self.position = point;
        } else if distance > 0.0 {
            self.position += offset / distance * step;
        }
    }

    fn find_target(&self) -> Option<Target> {
        self.perception
            .iter()
            .min_by(|a, b| {
                let da = self.position.distance_squared(a.position);
                let db = self.position.distance_squared(b.position);
                da.total_cmp(&db)
            })
            .cloned()
    }

    fn attack(&mut self, target: &Target) {
        let attack_speed = self.attack_speed();
        if self.attack_cooldown > 0.0 || attack_speed <= 0.0 {
            return;
        }
        self.play_attack_animation();
        self.hits.push(AttackHit {
            attacker_id: self.id.clone(),
            target_id: target.id.clone(),
            damage: self.attack_damage(),
            on_hit: self.on_hit.clone(),
        });
        self.attack_cooldown = 1000.0 / attack_speed;
    }

    fn speed(&self) -> f64 {
        self.stats.speed * self.multipliers.speed
    }

    fn attack_damage(&self) -> f64 {
        self.stats.attack_damage * self.multipliers.attack_damage
    }

    fn attack_speed(&self) -> f64 {
        self.stats.attack_speed * self.multipliers.attack_speed
    }

    fn attack_range(&self) -> f64 {
        self.stats.attack_range
    }

    fn on_death(&mut self) {
        self.events.push(CombatEvent::Died {
            entity_id: self.id.clone(),
            team: self.team,
        });
    }

    fn on_hp_zero(&mut self) {
        self.events.push(CombatEvent::HpZero {
            entity_id: self.id.clone(),
        });
    }

    fn on_revive(&mut self) {
        self.events.push(CombatEvent::Revived {
            entity_id: self.id.clone(),
        });
    }

    fn on_tick(&mut self, delta: f64) {
        self.attack_cooldown = (self.attack_cooldown - delta).max(0.0);
    }
}

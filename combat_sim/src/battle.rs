//! Battle - fixed-step driver for two teams of combatants on a lane

use crate::report::{BattleReport, Outcome, StructureSummary, UnitSummary};
use crate::scenario::{Scenario, ScenarioError, SpawnEntry};
use crate::visuals::TracingVisuals;
use combat_core::prelude::*;
use combat_core::OnHitEffect;
use glam::DVec2;
use tracing::{debug, info};

/// Distance from its base at which the first unit of a team spawns
const SPAWN_OFFSET: f64 = 40.0;
/// Gap between consecutive units of the same spawn entry
const SPAWN_SPACING: f64 = 30.0;

/// A team's base; destroying it ends the battle
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub id: String,
    pub team: Team,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
}

impl Structure {
    pub fn new(id: impl Into<String>, team: Team, position: DVec2, max_health: f64) -> Self {
        Structure {
            id: id.into(),
            team,
            position,
            health: max_health,
            max_health,
        }
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// Per-unit bookkeeping kept next to the combatant
#[derive(Debug, Clone, Default)]
struct UnitRecord {
    template: String,
    deaths: u32,
    damage_dealt: f64,
}

/// Owns every combatant and routes what they emit
///
/// Each step hands out perception snapshots, ticks every combatant, then
/// applies queued hits and drains notifications. Combatants never reach
/// into each other.
pub struct Battle {
    units: Vec<Combatant<Unit>>,
    records: Vec<UnitRecord>,
    structures: Vec<Structure>,
    sight_range: f64,
    constants: CombatConstants,
    ids: Box<dyn EffectIdGenerator>,
    elapsed: f64,
    ticks: u64,
    heroes_lost: u32,
    enemies_lost: u32,
    revives: u32,
}

impl Battle {
    /// Create an empty battle with a base per team
    pub fn new(field_length: f64, base_health: f64, sight_range: f64, constants: CombatConstants) -> Self {
        let structures = vec![
            Structure::new(base_id(Team::Heroes), Team::Heroes, DVec2::ZERO, base_health),
            Structure::new(
                base_id(Team::Enemies),
                Team::Enemies,
                DVec2::new(field_length, 0.0),
                base_health,
            ),
        ];
        Battle {
            units: Vec::new(),
            records: Vec::new(),
            structures,
            sight_range,
            constants,
            ids: Box::new(SequentialIds::new()),
            elapsed: 0.0,
            ticks: 0,
            heroes_lost: 0,
            enemies_lost: 0,
            revives: 0,
        }
    }

    /// Build a battle from a scenario, resolving templates against `roster`
    pub fn from_scenario(scenario: &Scenario, roster: &UnitRoster) -> Result<Self, ScenarioError> {
        scenario.validate(roster)?;

        let mut battle = Battle::new(
            scenario.field_length,
            scenario.base_health,
            scenario.sight_range,
            scenario.constants.clone(),
        );
        battle.spawn_all(Team::Heroes, &scenario.heroes, roster)?;
        battle.spawn_all(Team::Enemies, &scenario.enemies, roster)?;

        info!(
            units = battle.units.len(),
            field_length = scenario.field_length,
            "battle created"
        );
        Ok(battle)
    }

    /// Replace the generator used for on-hit effect ids
    pub fn with_id_generator(mut self, ids: Box<dyn EffectIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    fn spawn_all(
        &mut self,
        team: Team,
        entries: &[SpawnEntry],
        roster: &UnitRoster,
    ) -> Result<(), ScenarioError> {
        let base = self.base(team).map(|b| b.position).unwrap_or(DVec2::ZERO);
        let mut rank = 0u32;
        for entry in entries {
            let template = roster
                .get(&entry.template)
                .ok_or_else(|| ScenarioError::UnknownTemplate(entry.template.clone()))?;
            for n in 0..entry.count {
                // later ranks start further behind their base
                let along = SPAWN_OFFSET - f64::from(rank) * SPAWN_SPACING;
                let position = base + team.forward() * along + DVec2::new(0.0, entry.lane);
                let id = format!("{}-{}-{}", team_key(team), template.id, n);

                let unit = Unit::from_template(id.clone(), team, position, template)
                    .with_visuals(Box::new(TracingVisuals::new(id)));
                let combatant = Combatant::new(unit, self.constants.clone())
                    .with_revive(template.revivable);
                self.spawn(combatant, &template.id);
                rank += 1;
            }
        }
        Ok(())
    }

    /// Add a combatant; `template` is only used for reporting
    pub fn spawn(&mut self, combatant: Combatant<Unit>, template: &str) {
        debug!(entity = combatant.body().id(), template, "spawned");
        self.units.push(combatant);
        self.records.push(UnitRecord {
            template: template.to_string(),
            ..UnitRecord::default()
        });
    }

    pub fn units(&self) -> &[Combatant<Unit>] {
        &self.units
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn combatant(&self, id: &str) -> Option<&Combatant<Unit>> {
        self.units.iter().find(|c| c.body().id() == id)
    }

    pub fn combatant_mut(&mut self, id: &str) -> Option<&mut Combatant<Unit>> {
        self.units.iter_mut().find(|c| c.body().id() == id)
    }

    pub fn base(&self, team: Team) -> Option<&Structure> {
        self.structures.iter().find(|s| s.team == team)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // === Tick ===

    /// Advance the whole battle by `delta` milliseconds
    pub fn step(&mut self, delta: f64) {
        self.perceive();

        for combatant in &mut self.units {
            combatant.update(delta);
        }

        self.route_hits();
        self.collect_events();
        self.revive_fallen();

        self.elapsed += delta;
        self.ticks += 1;
    }

    /// Hand each unit the enemies and enemy structures within sight
    fn perceive(&mut self) {
        let visible: Vec<(Team, Target)> = self
            .units
            .iter()
            .filter(|c| is_targetable(c))
            .map(|c| (c.body().team(), Target::unit(c.body().id(), c.body().position())))
            .chain(
                self.structures
                    .iter()
                    .filter(|s| !s.is_destroyed())
                    .map(|s| (s.team, Target::structure(s.id.clone(), s.position))),
            )
            .collect();

        let sight_squared = self.sight_range * self.sight_range;
        for combatant in &mut self.units {
            let team = combatant.body().team();
            let position = combatant.body().position();
            let targets = visible
                .iter()
                .filter(|(owner, target)| {
                    *owner == team.opponent()
                        && position.distance_squared(target.position) <= sight_squared
                })
                .map(|(_, target)| target.clone())
                .collect();
            combatant.body_mut().set_perception(targets);
        }
    }

    /// Apply every attack fired this tick
    fn route_hits(&mut self) {
        let mut hits: Vec<(usize, AttackHit)> = Vec::new();
        for (index, combatant) in self.units.iter_mut().enumerate() {
            hits.extend(combatant.body_mut().drain_hits().into_iter().map(|hit| (index, hit)));
        }

        for (attacker, hit) in hits {
            let unit = self.units.iter().position(|c| c.body().id() == hit.target_id);
            let structure = self.structures.iter().position(|s| s.id == hit.target_id);

            let dealt = if let Some(target) = unit.map(|i| &mut self.units[i]) {
                let before = target.body().current_health();
                target.body_mut().take_damage(hit.damage);
                let dealt = before - target.body().current_health();

                // effects do not land on a unit the hit just killed
                if !target.body().is_dead() {
                    if let Some(on_hit) = &hit.on_hit {
                        apply_on_hit(target, on_hit, self.ids.as_mut());
                    }
                }
                dealt
            } else if let Some(structure) = structure.map(|i| &mut self.structures[i]) {
                let before = structure.health;
                structure.take_damage(hit.damage);
                if structure.is_destroyed() {
                    info!(structure = %structure.id, attacker = %hit.attacker_id, "base destroyed");
                }
                before - structure.health
            } else {
                debug!(target = %hit.target_id, "hit target no longer exists");
                0.0
            };

            if let Some(record) = self.records.get_mut(attacker) {
                record.damage_dealt += dealt;
            }
        }
    }

    fn collect_events(&mut self) {
        for (combatant, record) in self.units.iter_mut().zip(&mut self.records) {
            for event in combatant.body_mut().drain_events() {
                match event {
                    CombatEvent::HpZero { entity_id } => {
                        debug!(entity = %entity_id, "hp reached zero");
                    }
                    CombatEvent::Died { entity_id, team } => {
                        info!(entity = %entity_id, ?team, "unit died");
                        record.deaths += 1;
                        match team {
                            Team::Heroes => self.heroes_lost += 1,
                            Team::Enemies => self.enemies_lost += 1,
                        }
                    }
                    CombatEvent::Revived { entity_id } => {
                        info!(entity = %entity_id, "unit revived");
                        self.revives += 1;
                    }
                }
            }
        }
    }

    fn revive_fallen(&mut self) {
        for combatant in &mut self.units {
            if combatant.is_revivable() && combatant.is_in_state(BehaviorState::Dead) {
                if let Err(err) = combatant.begin_revive() {
                    debug!(entity = combatant.body().id(), %err, "revive not started");
                }
            }
        }
    }

    // === Outcome ===

    /// How the battle has ended, if it has
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(fallen) = self.structures.iter().find(|s| s.is_destroyed()) {
            return Some(Outcome::BaseDestroyed(fallen.team.opponent()));
        }
        for team in [Team::Heroes, Team::Enemies] {
            let standing = self
                .units
                .iter()
                .filter(|c| c.body().team() == team)
                .any(|c| c.is_revivable() || !c.is_in_state(BehaviorState::Dead));
            if !standing {
                return Some(Outcome::TeamWiped(team.opponent()));
            }
        }
        None
    }

    /// Step until the battle ends or `max_ms` has elapsed
    pub fn run(&mut self, max_ms: f64) -> BattleReport {
        let tick = self.constants.tick_ms.max(1.0);
        while self.outcome().is_none() && self.elapsed < max_ms {
            self.step(tick);
        }
        let report = self.report();
        info!(outcome = ?report.outcome, elapsed_ms = report.elapsed_ms, "battle finished");
        report
    }

    pub fn report(&self) -> BattleReport {
        let units = self
            .units
            .iter()
            .zip(&self.records)
            .map(|(c, record)| UnitSummary {
                id: c.body().id().to_string(),
                template: record.template.clone(),
                team: c.body().team(),
                state: c.state(),
                health: c.body().current_health(),
                max_health: c.body().max_health(),
                deaths: record.deaths,
                damage_dealt: record.damage_dealt,
            })
            .collect();
        let structures = self
            .structures
            .iter()
            .map(|s| StructureSummary {
                id: s.id.clone(),
                team: s.team,
                health: s.health,
                max_health: s.max_health,
            })
            .collect();

        BattleReport {
            outcome: self.outcome().unwrap_or(Outcome::TimeUp),
            elapsed_ms: self.elapsed,
            ticks: self.ticks,
            heroes_lost: self.heroes_lost,
            enemies_lost: self.enemies_lost,
            revives: self.revives,
            units,
            structures,
        }
    }
}

fn team_key(team: Team) -> &'static str {
    match team {
        Team::Heroes => "heroes",
        Team::Enemies => "enemies",
    }
}

fn base_id(team: Team) -> String {
    format!("{}-base", team_key(team))
}

/// Dead and reviving units cannot be attacked
fn is_targetable(combatant: &Combatant<Unit>) -> bool {
    !combatant.body().is_dead()
        && !combatant.is_in_state(BehaviorState::Dead)
        && !combatant.is_in_state(BehaviorState::Reviving)
}

fn apply_on_hit(target: &mut Combatant<Unit>, on_hit: &OnHitEffect, ids: &mut dyn EffectIdGenerator) {
    if let Some(duration) = on_hit.stun_duration() {
        if let Err(err) = target.stun(duration) {
            debug!(entity = target.body().id(), %err, "stun refused");
        }
    } else if let Some(effect) = on_hit.to_status_effect(ids) {
        let application = target.add_effect(effect);
        debug!(entity = target.body().id(), ?application, "on-hit effect");
    }
}

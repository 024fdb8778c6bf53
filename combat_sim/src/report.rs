//! Battle outcome summary

use combat_core::{BehaviorState, Team};
use serde::Serialize;
use std::fmt;

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The winner destroyed the opposing base
    BaseDestroyed(Team),
    /// The winner has the only units left standing
    TeamWiped(Team),
    /// Time ran out with both bases standing
    TimeUp,
}

impl Outcome {
    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::BaseDestroyed(team) | Outcome::TeamWiped(team) => Some(team),
            Outcome::TimeUp => None,
        }
    }
}

/// Final state of one unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    pub id: String,
    pub template: String,
    pub team: Team,
    pub state: Option<BehaviorState>,
    pub health: f64,
    pub max_health: f64,
    pub deaths: u32,
    pub damage_dealt: f64,
}

/// Final state of one base
#[derive(Debug, Clone, Serialize)]
pub struct StructureSummary {
    pub id: String,
    pub team: Team,
    pub health: f64,
    pub max_health: f64,
}

/// Everything the driver reports once a battle is over
#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub outcome: Outcome,
    pub elapsed_ms: f64,
    pub ticks: u64,
    pub heroes_lost: u32,
    pub enemies_lost: u32,
    pub revives: u32,
    pub units: Vec<UnitSummary>,
    pub structures: Vec<StructureSummary>,
}

impl BattleReport {
    /// Pretty-printed JSON form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::BaseDestroyed(team) => writeln!(f, "{team:?} win: enemy base destroyed")?,
            Outcome::TeamWiped(team) => writeln!(f, "{team:?} win: opposing team wiped out")?,
            Outcome::TimeUp => writeln!(f, "Draw: time limit reached")?,
        }
        writeln!(
            f,
            "Elapsed: {:.1}s over {} ticks",
            self.elapsed_ms / 1000.0,
            self.ticks
        )?;
        writeln!(
            f,
            "Deaths: heroes {}, enemies {}; revives {}",
            self.heroes_lost, self.enemies_lost, self.revives
        )?;

        writeln!(f)?;
        writeln!(f, "=== Bases ===")?;
        for structure in &self.structures {
            writeln!(
                f,
                "  {:<16} {:>7.1} / {:.0}",
                structure.id, structure.health, structure.max_health
            )?;
        }

        writeln!(f)?;
        writeln!(f, "=== Units ===")?;
        for unit in &self.units {
            let state = unit
                .state
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "  {:<20} {:<10} {:>7.1} / {:<5.0} deaths {:<2} dealt {:.1}",
                unit.id, state, unit.health, unit.max_health, unit.deaths, unit.damage_dealt
            )?;
        }
        Ok(())
    }
}

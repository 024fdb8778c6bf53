//! combat_sim - Headless lane battles on top of combat_core
//!
//! - Scenario: battle setup loaded from TOML
//! - Battle: fixed-step driver routing hits and events between combatants
//! - BattleReport: outcome summary, printable or serializable

pub mod battle;
pub mod logging;
pub mod report;
pub mod scenario;
pub mod visuals;

pub use battle::{Battle, Structure};
pub use report::{BattleReport, Outcome};
pub use scenario::{Scenario, ScenarioError, SpawnEntry};

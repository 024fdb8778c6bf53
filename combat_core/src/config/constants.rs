//! Combat tuning constants

use serde::{Deserialize, Serialize};

/// Tunable combat constants
///
/// All times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Attack ranges at or below this use horizontal-only distance
    #[serde(default = "default_melee_range_threshold")]
    pub melee_range_threshold: f64,
    /// Stun length when STUNNED is entered without an explicit duration
    #[serde(default = "default_stun_ms")]
    pub default_stun_ms: f64,
    /// Time spent hidden in REVIVING before returning to MOVING
    #[serde(default = "default_revive_delay_ms")]
    pub revive_delay_ms: f64,
    /// Fixed simulation step
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            melee_range_threshold: default_melee_range_threshold(),
            default_stun_ms: default_stun_ms(),
            revive_delay_ms: default_revive_delay_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_melee_range_threshold() -> f64 {
    100.0
}
fn default_stun_ms() -> f64 {
    1000.0
}
fn default_revive_delay_ms() -> f64 {
    3000.0
}
fn default_tick_ms() -> f64 {
    16.0
}

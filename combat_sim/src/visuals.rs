//! Headless visuals: animation requests become trace events

use combat_core::entity::{AnimationCue, Visuals};
use tracing::trace;

/// Logs every visual hook at trace level
#[derive(Debug, Clone)]
pub struct TracingVisuals {
    entity_id: String,
}

impl TracingVisuals {
    pub fn new(entity_id: impl Into<String>) -> Self {
        TracingVisuals {
            entity_id: entity_id.into(),
        }
    }
}

impl Visuals for TracingVisuals {
    fn play(&mut self, cue: AnimationCue) {
        trace!(entity = %self.entity_id, ?cue, "play animation");
    }

    fn set_visible(&mut self, visible: bool) {
        trace!(entity = %self.entity_id, visible, "visibility");
    }

    fn set_stun_indicator(&mut self, shown: bool) {
        trace!(entity = %self.entity_id, shown, "stun indicator");
    }

    fn set_animation_rate(&mut self, rate: f64) {
        trace!(entity = %self.entity_id, rate, "animation rate");
    }
}

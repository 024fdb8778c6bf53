//! Visual collaborator hooks

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Animation an entity can be asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCue {
    Idle,
    Move,
    Attack,
    Stun,
    Dead,
}

/// Fire-and-forget hooks into rendering
///
/// Nothing in the combat core waits on these; an attack animation is expected
/// to fall back to idle on its own.
pub trait Visuals {
    fn play(&mut self, cue: AnimationCue);

    fn set_visible(&mut self, _visible: bool) {}

    fn set_stun_indicator(&mut self, _shown: bool) {}

    /// Playback rate, driven by the combined speed multiplier
    fn set_animation_rate(&mut self, _rate: f64) {}
}

/// Discards every call
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisuals;

impl Visuals for NullVisuals {
    fn play(&mut self, _cue: AnimationCue) {}
}

/// A call received by [`RecordingVisuals`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualCall {
    Play(AnimationCue),
    Visible(bool),
    StunIndicator(bool),
    AnimationRate(f64),
}

/// Records calls into a shared log, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct RecordingVisuals {
    log: Rc<RefCell<Vec<VisualCall>>>,
}

impl RecordingVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the log that stays valid after the recorder is boxed
    pub fn log(&self) -> Rc<RefCell<Vec<VisualCall>>> {
        Rc::clone(&self.log)
    }

    pub fn calls(&self) -> Vec<VisualCall> {
        self.log.borrow().clone()
    }

    /// Animation cues only, in order
    pub fn cues(&self) -> Vec<AnimationCue> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                VisualCall::Play(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }
}

impl Visuals for RecordingVisuals {
    fn play(&mut self, cue: AnimationCue) {
        self.log.borrow_mut().push(VisualCall::Play(cue));
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().push(VisualCall::Visible(visible));
    }

    fn set_stun_indicator(&mut self, shown: bool) {
        self.log.borrow_mut().push(VisualCall::StunIndicator(shown));
    }

    fn set_animation_rate(&mut self, rate: f64) {
        self.log.borrow_mut().push(VisualCall::AnimationRate(rate));
    }
}

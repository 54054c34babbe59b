//! Scripted input for the headless driver

use amius_core::{InputState, Keys};

use crate::config::ScriptStep;
use super::InputMapper;

/// Plays back a list of held-key steps, one snapshot per frame
///
/// After the last step nothing is held.
pub struct InputScript {
    steps: Vec<(u32, Keys)>,
    step: usize,
    frame_in_step: u32,
    previous_held: Keys,
}

impl InputScript {
    pub fn new(steps: &[ScriptStep], mapper: &InputMapper) -> Self {
        Self {
            steps: steps
                .iter()
                .map(|s| (s.frames, mapper.map_held(s.keys.as_slice())))
                .collect(),
            step: 0,
            frame_in_step: 0,
            previous_held: Keys::empty(),
        }
    }

    /// Whether every step has been played
    pub fn is_finished(&self) -> bool {
        self.step >= self.steps.len()
    }

    /// Snapshot for the next frame
    pub fn next_frame(&mut self) -> InputState {
        // Zero-length steps are skipped
        while let Some(&(frames, _)) = self.steps.get(self.step) {
            if self.frame_in_step < frames {
                break;
            }
            self.step += 1;
            self.frame_in_step = 0;
        }

        let held = match self.steps.get(self.step) {
            Some(&(_, held)) => {
                self.frame_in_step += 1;
                held
            }
            None => Keys::empty(),
        };
        let state = InputState::from_transition(self.previous_held, held);
        self.previous_held = held;
        state
    }
}

use super::constants::{MELODY_MIDI, MELODY_STEP_SEC};

#[inline]
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// A melody step that has just begun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteStep {
    pub index: usize,
    pub frequency_hz: f32,
    /// Wall-clock length of this step at the current playback rate.
    pub duration_sec: f32,
}

/// Walks a fixed note sequence. Tempo scales with the playback rate, so the
/// phrase speeds up as the entity moves towards the top of the region.
#[derive(Clone, Debug)]
pub struct MelodySequencer {
    notes: &'static [f32],
    step_sec: f32,
    index: usize,
    phase: f32,
    started: bool,
}

impl Default for MelodySequencer {
    fn default() -> Self {
        Self::new(MELODY_MIDI, MELODY_STEP_SEC)
    }
}

impl MelodySequencer {
    pub fn new(notes: &'static [f32], step_sec: f32) -> Self {
        Self {
            notes,
            step_sec,
            index: 0,
            phase: 0.0,
            started: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Fraction of the current step already played, in [0, 1).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by `dt_sec` at `playback_rate`. Returns the step that started
    /// during this call, if any. The first call always starts step 0. When
    /// several boundaries fall into one call only the last one is reported.
    pub fn advance(&mut self, dt_sec: f32, playback_rate: f32) -> Option<NoteStep> {
        if self.notes.is_empty() || self.step_sec <= 0.0 {
            return None;
        }
        let rate = playback_rate.max(f32::EPSILON);
        if !self.started {
            self.started = true;
            return Some(self.current(rate));
        }
        self.phase += dt_sec.max(0.0) * rate / self.step_sec;
        if self.phase < 1.0 {
            return None;
        }
        let steps = self.phase.floor();
        self.phase -= steps;
        self.index = (self.index + steps as usize) % self.notes.len();
        Some(self.current(rate))
    }

    fn current(&self, rate: f32) -> NoteStep {
        NoteStep {
            index: self.index,
            frequency_hz: midi_to_hz(self.notes[self.index]),
            duration_sec: self.step_sec / rate,
        }
    }
}

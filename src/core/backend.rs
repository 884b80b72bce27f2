// Boundary between the simulation core and the platform.
//
// The core only talks to [`AudioBackend`] and [`RenderSink`]; the web shell
// implements them on top of Web Audio and the DOM, and tests use fakes.

use super::config::{BackendStrategy, Config, SmoothingConfig};
use super::mapper::AudioTargets;
use super::melody::{MelodySequencer, NoteStep};
use super::smoothing::Smoothed;
use glam::Vec2;

pub trait AudioBackend {
    /// Build the audio graph and start silent playback. Must be called from a
    /// user gesture; repeated calls never build a second graph.
    fn ensure_started(&mut self);
    /// Glide towards `targets` over `dt_sec`.
    fn apply_targets(&mut self, targets: &AudioTargets, dt_sec: f32);
    /// Called every frame to recover from platform suspension.
    fn resume_if_suspended(&mut self);
    fn is_ready(&self) -> bool;
}

pub trait RenderSink {
    /// Place the entity with its center at `position` (region-local pixels).
    fn render(&mut self, position: Vec2);
}

/// Parameter values to write to the audio graph this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioFrame {
    pub gain: f32,
    pub filter_frequency_hz: f32,
    pub playback_rate: f32,
    /// Synth only: a melody step began this frame.
    pub note: Option<NoteStep>,
}

/// Backend-owned parameter state: the smoothed current values and, for the
/// synth strategy, the melody position.
#[derive(Clone, Debug)]
pub struct AudioState {
    gain: Smoothed,
    filter: Smoothed,
    rate: Smoothed,
    melody: Option<MelodySequencer>,
}

impl AudioState {
    pub fn new(cfg: &Config) -> Self {
        let rest = AudioTargets::at_rest(&cfg.mapping);
        let SmoothingConfig {
            gain_tau,
            filter_tau,
            rate_tau,
        } = cfg.smoothing;
        Self {
            gain: Smoothed::new(0.0, gain_tau),
            filter: Smoothed::new(rest.filter_frequency_hz, filter_tau),
            rate: Smoothed::new(rest.playback_rate, rate_tau),
            melody: match cfg.strategy {
                BackendStrategy::Synth => Some(MelodySequencer::default()),
                BackendStrategy::File { .. } => None,
            },
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain.value
    }

    pub fn filter_frequency_hz(&self) -> f32 {
        self.filter.value
    }

    pub fn playback_rate(&self) -> f32 {
        self.rate.value
    }

    pub fn melody(&self) -> Option<&MelodySequencer> {
        self.melody.as_ref()
    }

    /// Smooth every parameter towards `targets`. The melody only runs once
    /// the backend is `ready`, so the first audible step is step 0.
    pub fn advance(&mut self, targets: &AudioTargets, dt_sec: f32, ready: bool) -> AudioFrame {
        let gain = self.gain.approach(targets.gain, dt_sec);
        let filter_frequency_hz = self.filter.approach(targets.filter_frequency_hz, dt_sec);
        let playback_rate = self.rate.approach(targets.playback_rate, dt_sec);
        let note = match &mut self.melody {
            Some(m) if ready => m.advance(dt_sec, playback_rate),
            _ => None,
        };
        AudioFrame {
            gain,
            filter_frequency_hz,
            playback_rate,
            note,
        }
    }
}

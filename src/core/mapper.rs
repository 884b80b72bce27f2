use super::config::{MappingConfig, MotionConfig};
use super::geometry::Region;
use glam::Vec2;

/// Values the backend should glide towards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioTargets {
    pub gain: f32,
    pub filter_frequency_hz: f32,
    pub playback_rate: f32,
    pub moving: bool,
}

impl AudioTargets {
    /// Silent targets with tone and tempo taken from the middle of their ranges.
    pub fn at_rest(cfg: &MappingConfig) -> Self {
        Self {
            gain: 0.0,
            filter_frequency_hz: tone_for(0.5, cfg),
            playback_rate: tempo_for(0.5, cfg),
            moving: false,
        }
    }
}

#[inline]
pub fn is_moving(velocity: Vec2, cfg: &MappingConfig) -> bool {
    velocity.length() > cfg.moving_threshold
}

/// Horizontal position (0 = left, 1 = right) to filter cutoff.
#[inline]
pub fn tone_for(norm_x: f32, cfg: &MappingConfig) -> f32 {
    cfg.filter_min_hz + norm_x * (cfg.filter_max_hz - cfg.filter_min_hz)
}

/// Upward position (0 = bottom, 1 = top) to playback rate, clamped to the safe range.
#[inline]
pub fn tempo_for(norm_up: f32, cfg: &MappingConfig) -> f32 {
    let rate = cfg.playback_rate_min + norm_up * (cfg.playback_rate_max - cfg.playback_rate_min);
    rate.clamp(cfg.playback_rate_safe[0], cfg.playback_rate_safe[1])
}

/// Map motion into audio targets. Tone and tempo only follow the position
/// while moving; at rest they repeat `previous`.
pub fn map_targets(
    previous: &AudioTargets,
    velocity: Vec2,
    position: Vec2,
    region: &Region,
    motion: &MotionConfig,
    cfg: &MappingConfig,
) -> AudioTargets {
    if !is_moving(velocity, cfg) {
        return AudioTargets {
            gain: 0.0,
            moving: false,
            ..*previous
        };
    }
    let norm = region.movable(motion.margin()).normalize(position);
    AudioTargets {
        gain: cfg.audio_gain,
        filter_frequency_hz: tone_for(norm.x, cfg),
        // screen y grows downwards
        playback_rate: tempo_for(1.0 - norm.y, cfg),
        moving: true,
    }
}

/// Keeps the last emitted targets between frames.
#[derive(Clone, Debug)]
pub struct ParameterMapper {
    last: AudioTargets,
}

impl ParameterMapper {
    pub fn new(cfg: &MappingConfig) -> Self {
        Self {
            last: AudioTargets::at_rest(cfg),
        }
    }

    pub fn last(&self) -> &AudioTargets {
        &self.last
    }

    pub fn update(
        &mut self,
        velocity: Vec2,
        position: Vec2,
        region: &Region,
        motion: &MotionConfig,
        cfg: &MappingConfig,
    ) -> AudioTargets {
        self.last = map_targets(&self.last, velocity, position, region, motion, cfg);
        self.last
    }
}

// Runtime configuration for the motion engine, the parameter mapper and the
// audio backend.
//
// Everything has a default built from `constants`. The web shell applies
// string overrides read from `data-*` attributes through
// [`Config::apply_override`], so parsing and validation stay host-testable.

use super::constants::*;
use thiserror::Error;

/// Attribute keys understood by [`Config::apply_override`], in the order the
/// shell should apply them.
pub const OVERRIDE_KEYS: &[&str] = &[
    "preset",
    "audio-src",
    "filter",
    "max-speed",
    "min-distance",
    "curve-exponent",
    "padding",
    "near-field",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("`{key}` must be {rule} (got {value})")]
    OutOfRange {
        key: &'static str,
        rule: &'static str,
        value: f32,
    },
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

/// What the speed curve does when the pointer is closer than `min_distance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NearField {
    /// Speed is forced to zero, so a pointer sitting on the entity does not jitter it.
    #[default]
    Rest,
    /// Speed saturates at `max_speed`.
    Flee,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub max_speed: f32,
    pub min_distance: f32,
    pub curve_exponent: f32,
    pub epsilon: f32,
    pub damping: f32,
    pub padding: f32,
    pub half_extent: [f32; 2],
    pub near_field: NearField,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            min_distance: MIN_DISTANCE,
            curve_exponent: CURVE_EXPONENT,
            epsilon: DISTANCE_EPSILON,
            damping: VELOCITY_DAMPING,
            padding: PADDING,
            half_extent: [HALF_EXTENT, HALF_EXTENT],
            near_field: NearField::Rest,
        }
    }
}

impl MotionConfig {
    /// Padding plus half extent on each axis.
    #[inline]
    pub fn margin(&self) -> [f32; 2] {
        [
            self.padding + self.half_extent[0],
            self.padding + self.half_extent[1],
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MappingConfig {
    pub moving_threshold: f32,
    pub audio_gain: f32,
    pub filter_min_hz: f32,
    pub filter_max_hz: f32,
    pub playback_rate_min: f32,
    pub playback_rate_max: f32,
    pub playback_rate_safe: [f32; 2],
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            moving_threshold: MOVING_THRESHOLD,
            audio_gain: AUDIO_GAIN,
            filter_min_hz: FILTER_MIN_HZ,
            filter_max_hz: FILTER_MAX_HZ,
            playback_rate_min: PLAYBACK_RATE_MIN,
            playback_rate_max: PLAYBACK_RATE_MAX,
            playback_rate_safe: [PLAYBACK_RATE_SAFE_MIN, PLAYBACK_RATE_SAFE_MAX],
        }
    }
}

/// Low-pass time constants used by the backend, in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingConfig {
    pub gain_tau: f32,
    pub filter_tau: f32,
    pub rate_tau: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            gain_tau: GAIN_TAU_SEC,
            filter_tau: FILTER_TAU_SEC,
            rate_tau: RATE_TAU_SEC,
        }
    }
}

/// Sound source. Chosen once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum BackendStrategy {
    /// Loop an audio asset and modulate it.
    File { url: String },
    /// Step an oscillator through the built-in melody.
    #[default]
    Synth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Tone filter on, inverse-distance curve.
    Filtered,
    /// No tone filter, steeper curve and a narrower tempo range.
    Plain,
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filtered" | "default" => Ok(Preset::Filtered),
            "plain" => Ok(Preset::Plain),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub motion: MotionConfig,
    pub mapping: MappingConfig,
    pub smoothing: SmoothingConfig,
    pub strategy: BackendStrategy,
    pub filter_enabled: bool,
    pub dt_cap: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self::preset(Preset::Filtered)
    }
}

impl Config {
    pub fn preset(preset: Preset) -> Self {
        let mut cfg = Self {
            motion: MotionConfig::default(),
            mapping: MappingConfig::default(),
            smoothing: SmoothingConfig::default(),
            strategy: BackendStrategy::Synth,
            filter_enabled: true,
            dt_cap: DT_CAP_SEC,
        };
        if preset == Preset::Plain {
            cfg.filter_enabled = false;
            cfg.motion.curve_exponent = PLAIN_CURVE_EXPONENT;
            cfg.motion.max_speed = PLAIN_MAX_SPEED;
            cfg.mapping.playback_rate_min = PLAIN_PLAYBACK_RATE_MIN;
            cfg.mapping.playback_rate_max = PLAIN_PLAYBACK_RATE_MAX;
        }
        cfg
    }

    /// Apply a single `key=value` override. Keys match the `data-*`
    /// attribute names without the prefix. `preset` resets everything else,
    /// so the shell applies it first. On error `self` is left untouched.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        next.set(key, value.trim())?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "preset" => {
                let strategy = self.strategy.clone();
                *self = Config::preset(value.parse()?);
                self.strategy = strategy;
            }
            "audio-src" => {
                self.strategy = if value.is_empty() {
                    BackendStrategy::Synth
                } else {
                    BackendStrategy::File {
                        url: value.to_string(),
                    }
                };
            }
            "filter" => {
                self.filter_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => return Err(invalid(key, value)),
                };
            }
            "max-speed" => self.motion.max_speed = parse_f32(key, value)?,
            "min-distance" => self.motion.min_distance = parse_f32(key, value)?,
            "curve-exponent" => self.motion.curve_exponent = parse_f32(key, value)?,
            "padding" => self.motion.padding = parse_f32(key, value)?,
            "near-field" => {
                self.motion.near_field = match value.to_ascii_lowercase().as_str() {
                    "rest" => NearField::Rest,
                    "flee" => NearField::Flee,
                    _ => return Err(invalid(key, value)),
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        check("max-speed", "positive", m.max_speed, m.max_speed > 0.0)?;
        check("min-distance", "non-negative", m.min_distance, m.min_distance >= 0.0)?;
        check(
            "curve-exponent",
            "positive",
            m.curve_exponent,
            m.curve_exponent > 0.0,
        )?;
        check("epsilon", "positive", m.epsilon, m.epsilon > 0.0)?;
        check(
            "damping",
            "within [0, 1]",
            m.damping,
            (0.0..=1.0).contains(&m.damping),
        )?;
        check("padding", "non-negative", m.padding, m.padding >= 0.0)?;

        let a = &self.mapping;
        check(
            "filter-min-hz",
            "positive and below filter-max-hz",
            a.filter_min_hz,
            a.filter_min_hz > 0.0 && a.filter_min_hz < a.filter_max_hz,
        )?;
        check(
            "playback-rate-min",
            "positive and below playback-rate-max",
            a.playback_rate_min,
            a.playback_rate_min > 0.0 && a.playback_rate_min < a.playback_rate_max,
        )?;
        check("dt-cap", "positive", self.dt_cap, self.dt_cap > 0.0)?;
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(key, value))
}

#[inline]
fn check(key: &'static str, rule: &'static str, value: f32, ok: bool) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, rule, value })
    }
}

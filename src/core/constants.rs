/// Default tuning for motion, audio mapping and smoothing.
///
/// These are the values `Config::default()` is built from; the shell may
/// override a subset of them from data attributes on the region element.

// Region layout (CSS pixels)
pub const PADDING: f32 = 40.0; // gap kept between the entity and region edges
pub const HALF_EXTENT: f32 = 60.0; // fallback half size of the entity when it cannot be measured

// Flee curve
pub const MAX_SPEED: f32 = 900.0; // px/s, cap on flee speed
pub const MIN_DISTANCE: f32 = 40.0; // px, near-field radius of the speed curve
pub const CURVE_EXPONENT: f32 = 1.0; // 1 = inverse distance
pub const DISTANCE_EPSILON: f32 = 0.001; // substituted for a zero pointer distance
pub const VELOCITY_DAMPING: f32 = 0.9; // per-frame velocity decay while untracked

// Audio gating and mapping
pub const MOVING_THRESHOLD: f32 = 5.0; // px/s below which the entity counts as at rest
pub const AUDIO_GAIN: f32 = 0.35; // output gain while moving
pub const FILTER_MIN_HZ: f32 = 400.0; // left edge: dark
pub const FILTER_MAX_HZ: f32 = 6000.0; // right edge: bright
pub const PLAYBACK_RATE_MIN: f32 = 0.6; // bottom edge: slow
pub const PLAYBACK_RATE_MAX: f32 = 1.6; // top edge: fast
pub const PLAYBACK_RATE_SAFE_MIN: f32 = 0.25; // hard limits regardless of configured range
pub const PLAYBACK_RATE_SAFE_MAX: f32 = 4.0;

// Backend smoothing time constants (seconds)
pub const GAIN_TAU_SEC: f32 = 0.08;
pub const FILTER_TAU_SEC: f32 = 0.12;
pub const RATE_TAU_SEC: f32 = 0.15;

// Frame scheduling
pub const DT_CAP_SEC: f32 = 0.1; // longest simulated step after a stall

// Synth fallback
pub const MELODY_STEP_SEC: f32 = 0.22; // step length at playback rate 1.0
pub const NOTE_ATTACK_SEC: f64 = 0.01;
pub const NOTE_SUSTAIN_LEVEL: f32 = 0.25; // envelope floor reached by the end of a step
pub const MELODY_MIDI: &[f32] = &[
    60.0, 64.0, 67.0, 69.0, 72.0, 69.0, 67.0, 64.0, // rising and falling pentatonic phrase
    62.0, 67.0, 71.0, 74.0, 71.0, 67.0, 62.0, 60.0,
];

// Plain preset (no tone filter, sharper near-field response)
pub const PLAIN_CURVE_EXPONENT: f32 = 1.5;
pub const PLAIN_MAX_SPEED: f32 = 700.0;
pub const PLAIN_PLAYBACK_RATE_MIN: f32 = 0.8;
pub const PLAIN_PLAYBACK_RATE_MAX: f32 = 1.25;

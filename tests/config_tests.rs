// Host-side tests for configuration defaults, presets and overrides, and the
// relationships between tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod shell_constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/core/config.rs");
}

use config::*;
use constants::*;

#[test]
fn defaults_validate() {
    let cfg = Config::default();
    assert_eq!(cfg.validate(), Ok(()));
    assert_eq!(cfg.strategy, BackendStrategy::Synth);
    assert!(cfg.filter_enabled);
    assert_eq!(cfg.motion.near_field, NearField::Rest);
    assert_eq!(cfg.motion.margin(), [100.0, 100.0]);
    assert_eq!(cfg, Config::preset(Preset::Filtered));
}

#[test]
fn plain_preset_turns_filter_off() {
    let cfg = Config::preset(Preset::Plain);
    assert_eq!(cfg.validate(), Ok(()));
    assert!(!cfg.filter_enabled);
    assert!(cfg.motion.curve_exponent > CURVE_EXPONENT);
    assert!(cfg.mapping.playback_rate_min > PLAYBACK_RATE_MIN);
    assert!(cfg.mapping.playback_rate_max < PLAYBACK_RATE_MAX);
}

#[test]
fn preset_names_parse() {
    assert_eq!("plain".parse::<Preset>(), Ok(Preset::Plain));
    assert_eq!(" Filtered ".parse::<Preset>(), Ok(Preset::Filtered));
    assert_eq!("default".parse::<Preset>(), Ok(Preset::Filtered));
    assert_eq!(
        "loud".parse::<Preset>(),
        Err(ConfigError::UnknownPreset("loud".to_string()))
    );
}

#[test]
fn numeric_overrides_apply() {
    let mut cfg = Config::default();
    cfg.apply_override("max-speed", "1200").expect("valid speed");
    cfg.apply_override("min-distance", " 25.5 ").expect("valid distance");
    cfg.apply_override("curve-exponent", "2").expect("valid exponent");
    cfg.apply_override("padding", "0").expect("zero padding");
    assert_eq!(cfg.motion.max_speed, 1200.0);
    assert_eq!(cfg.motion.min_distance, 25.5);
    assert_eq!(cfg.motion.curve_exponent, 2.0);
    assert_eq!(cfg.motion.margin(), [HALF_EXTENT, HALF_EXTENT]);
}

#[test]
fn switch_overrides_apply() {
    let mut cfg = Config::default();
    cfg.apply_override("filter", "off").expect("filter off");
    assert!(!cfg.filter_enabled);
    cfg.apply_override("filter", "TRUE").expect("filter on");
    assert!(cfg.filter_enabled);
    cfg.apply_override("near-field", "flee").expect("flee");
    assert_eq!(cfg.motion.near_field, NearField::Flee);
}

#[test]
fn invalid_override_leaves_config_untouched() {
    let mut cfg = Config::default();
    let before = cfg.clone();

    assert!(matches!(
        cfg.apply_override("max-speed", "fast"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.apply_override("max-speed", "-10"),
        Err(ConfigError::OutOfRange { key: "max-speed", .. })
    ));
    assert!(matches!(
        cfg.apply_override("curve-exponent", "0"),
        Err(ConfigError::OutOfRange { .. })
    ));
    assert!(cfg.apply_override("max-speed", "inf").is_err());
    assert!(cfg.apply_override("filter", "maybe").is_err());
    assert!(cfg.apply_override("near-field", "panic").is_err());
    assert_eq!(cfg, before);
}

#[test]
fn unknown_key_is_rejected() {
    let mut cfg = Config::default();
    assert_eq!(
        cfg.apply_override("volume", "11"),
        Err(ConfigError::UnknownKey("volume".to_string()))
    );
}

#[test]
fn audio_src_selects_strategy() {
    let mut cfg = Config::default();
    cfg.apply_override("audio-src", "assets/loop.ogg").expect("url");
    assert_eq!(
        cfg.strategy,
        BackendStrategy::File {
            url: "assets/loop.ogg".to_string()
        }
    );
    cfg.apply_override("audio-src", "  ").expect("empty src");
    assert_eq!(cfg.strategy, BackendStrategy::Synth);
}

#[test]
fn preset_keeps_audio_source_but_resets_tuning() {
    let mut cfg = Config::default();
    cfg.apply_override("audio-src", "loop.mp3").expect("url");
    cfg.apply_override("max-speed", "1500").expect("speed");
    cfg.apply_override("preset", "plain").expect("preset");
    assert_eq!(
        cfg.strategy,
        BackendStrategy::File {
            url: "loop.mp3".to_string()
        }
    );
    assert_eq!(cfg.motion.max_speed, PLAIN_MAX_SPEED);
    assert!(!cfg.filter_enabled);
}

#[test]
fn override_keys_are_all_accepted() {
    let samples = [
        ("preset", "plain"),
        ("audio-src", "a.ogg"),
        ("filter", "on"),
        ("max-speed", "800"),
        ("min-distance", "30"),
        ("curve-exponent", "1.2"),
        ("padding", "12"),
        ("near-field", "rest"),
    ];
    assert_eq!(samples.len(), OVERRIDE_KEYS.len());
    let mut cfg = Config::default();
    for (key, value) in samples {
        assert!(OVERRIDE_KEYS.contains(&key));
        cfg.apply_override(key, value)
            .unwrap_or_else(|e| panic!("{key}: {e}"));
    }
}

#[test]
fn error_messages_name_the_key() {
    let err = Config::default()
        .apply_override("padding", "-1")
        .expect_err("negative padding");
    assert_eq!(err.to_string(), "`padding` must be non-negative (got -1)");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mapping_ranges_are_ordered() {
    assert!(FILTER_MIN_HZ > 0.0 && FILTER_MIN_HZ < FILTER_MAX_HZ);
    assert!(PLAYBACK_RATE_MIN < PLAYBACK_RATE_MAX);
    assert!(PLAYBACK_RATE_SAFE_MIN <= PLAYBACK_RATE_MIN);
    assert!(PLAYBACK_RATE_MAX <= PLAYBACK_RATE_SAFE_MAX);
    assert!(PLAIN_PLAYBACK_RATE_MIN < PLAIN_PLAYBACK_RATE_MAX);
    assert!(AUDIO_GAIN > 0.0 && AUDIO_GAIN <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn motion_constants_are_sane() {
    assert!(MAX_SPEED > 0.0 && PLAIN_MAX_SPEED > 0.0);
    assert!(MIN_DISTANCE > DISTANCE_EPSILON);
    assert!(VELOCITY_DAMPING > 0.0 && VELOCITY_DAMPING < 1.0);
    // a pinned entity at the far wall still reads as moving
    assert!(MAX_SPEED * MIN_DISTANCE / 1000.0 > MOVING_THRESHOLD);
    assert!(DT_CAP_SEC > 0.0 && DT_CAP_SEC <= 0.25);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn synth_constants_are_sane() {
    assert!(!MELODY_MIDI.is_empty());
    assert!(MELODY_STEP_SEC > 0.0);
    assert!((NOTE_ATTACK_SEC as f32) < MELODY_STEP_SEC / PLAYBACK_RATE_SAFE_MAX);
    assert!(NOTE_SUSTAIN_LEVEL > 0.0 && NOTE_SUSTAIN_LEVEL < 1.0);
    assert!(MELODY_MIDI.iter().all(|n| (0.0..=127.0).contains(n)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shell_constants_are_consistent() {
    assert!(shell_constants::CONFIG_ATTR_PREFIX.ends_with('-'));
    assert_ne!(shell_constants::REGION_ID, shell_constants::ENTITY_ID);
    assert!(shell_constants::RENDER_EPSILON_PX > 0.0);
    assert!(shell_constants::RATE_WRITE_EPSILON > 0.0);
}

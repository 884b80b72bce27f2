// Host-side tests for backend-side audio state: smoothing, the synth melody
// and the lazy start gate.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod config {
    include!("../src/core/config.rs");
}
mod geometry {
    include!("../src/core/geometry.rs");
}
mod mapper {
    include!("../src/core/mapper.rs");
}
mod smoothing {
    include!("../src/core/smoothing.rs");
}
mod melody {
    include!("../src/core/melody.rs");
}
mod lifecycle {
    include!("../src/core/lifecycle.rs");
}
mod backend {
    include!("../src/core/backend.rs");
}

use backend::AudioState;
use config::{BackendStrategy, Config};
use lifecycle::*;
use mapper::AudioTargets;
use melody::*;
use smoothing::*;

const THREE_NOTES: &[f32] = &[60.0, 62.0, 64.0];

#[test]
fn smoothing_alpha_matches_time_constant() {
    // one time constant covers ~63.2% of the distance
    assert!((smoothing_alpha(0.1, 0.1) - 0.632_120_6).abs() < 1e-5);
    assert_eq!(smoothing_alpha(0.0, 0.1), 0.0);
    assert_eq!(smoothing_alpha(0.016, 0.0), 1.0);
    assert_eq!(smoothing_alpha(-1.0, 0.1), 0.0);
}

#[test]
fn smoothed_value_approaches_without_overshoot() {
    let mut s = Smoothed::new(0.0, 0.08);
    let mut prev = 0.0;
    for _ in 0..120 {
        let v = s.approach(0.35, 1.0 / 60.0);
        assert!(v >= prev && v <= 0.35);
        prev = v;
    }
    assert!((s.value - 0.35).abs() < 1e-4);
}

#[test]
fn midi_to_hz_matches_a4_and_octave() {
    let a4 = midi_to_hz(69.0);
    assert!((a4 - 440.0).abs() < 1e-4);
    let a5 = midi_to_hz(81.0);
    assert!((a5 / a4 - 2.0).abs() < 1e-4);
}

#[test]
fn melody_first_advance_starts_step_zero() {
    let mut m = MelodySequencer::new(THREE_NOTES, 0.5);
    let first = m.advance(0.0, 1.0).expect("first step");
    assert_eq!(first.index, 0);
    assert!((first.frequency_hz - midi_to_hz(60.0)).abs() < 1e-3);
    assert_eq!(first.duration_sec, 0.5);
    assert_eq!(m.advance(0.2, 1.0), None);
    assert!((m.phase() - 0.4).abs() < 1e-6);
}

#[test]
fn melody_tempo_follows_playback_rate() {
    let mut m = MelodySequencer::new(THREE_NOTES, 0.5);
    m.advance(0.0, 1.0);
    let next = m.advance(0.25, 2.0).expect("double speed reaches the boundary");
    assert_eq!(next.index, 1);
    assert_eq!(next.duration_sec, 0.25);
}

#[test]
fn melody_wraps_and_reports_last_step() {
    let mut m = MelodySequencer::new(THREE_NOTES, 0.5);
    m.advance(0.0, 1.0);
    let step = m.advance(1.5, 1.0).expect("three boundaries crossed");
    assert_eq!(step.index, 0);
    assert_eq!(m.index(), 0);
    assert!(m.phase() < 1.0);
}

#[test]
fn default_melody_cycles_through_every_note() {
    let mut m = MelodySequencer::default();
    let mut seen = Vec::new();
    for _ in 0..2000 {
        if let Some(step) = m.advance(1.0 / 60.0, 1.0) {
            seen.push(step.index);
        }
    }
    for i in 0..constants::MELODY_MIDI.len() {
        assert!(seen.contains(&i), "step {i} never played");
    }
}

#[test]
fn start_gate_builds_once() {
    let mut gate = StartGate::default();
    assert_eq!(gate.phase(), StartPhase::Uninitialized);
    assert_eq!(gate.request(), StartAction::BuildAndStart);
    assert!(gate.resolve(true));
    assert!(gate.is_ready());
    assert_eq!(gate.request(), StartAction::Nothing);
    assert!(!gate.resolve(true), "ready happens exactly once");
}

#[test]
fn rejected_start_is_retried_on_next_gesture() {
    let mut gate = StartGate::default();
    assert_eq!(gate.request(), StartAction::BuildAndStart);
    assert!(!gate.resolve(false));
    assert_eq!(gate.phase(), StartPhase::Starting { pending: false });
    assert_eq!(gate.request(), StartAction::RetryStart);
    assert!(gate.resolve(true));
    assert!(gate.is_ready());
}

#[test]
fn unsettled_start_does_not_block_later_gestures() {
    // the first attempt never resolves, e.g. resume() outside user activation
    let mut gate = StartGate::default();
    assert_eq!(gate.request(), StartAction::BuildAndStart);
    assert_eq!(gate.request(), StartAction::RetryStart);
    assert_eq!(gate.request(), StartAction::RetryStart);
    assert_eq!(gate.phase(), StartPhase::Starting { pending: true });
    assert!(gate.resolve(true));
    assert_eq!(gate.request(), StartAction::Nothing);
}

#[test]
fn late_failure_does_not_undo_ready() {
    let mut gate = StartGate::default();
    gate.request();
    gate.request();
    assert!(gate.resolve(true));
    assert!(!gate.resolve(false));
    assert!(gate.is_ready());
}

#[test]
fn failed_build_resets_gate() {
    let mut gate = StartGate::default();
    gate.request();
    gate.reset();
    assert_eq!(gate.phase(), StartPhase::Uninitialized);
    assert_eq!(gate.request(), StartAction::BuildAndStart);
    gate.resolve(true);
    gate.reset();
    assert!(gate.is_ready());
}

#[test]
fn audio_state_glides_to_targets() {
    let cfg = Config::default();
    let mut state = AudioState::new(&cfg);
    assert_eq!(state.gain(), 0.0);
    let targets = AudioTargets {
        gain: cfg.mapping.audio_gain,
        filter_frequency_hz: 5000.0,
        playback_rate: 1.5,
        moving: true,
    };
    let first = state.advance(&targets, 1.0 / 60.0, true);
    assert!(first.gain > 0.0 && first.gain < cfg.mapping.audio_gain);
    for _ in 0..300 {
        state.advance(&targets, 1.0 / 60.0, true);
    }
    assert!((state.gain() - cfg.mapping.audio_gain).abs() < 1e-4);
    assert!((state.filter_frequency_hz() - 5000.0).abs() < 0.5);
    assert!((state.playback_rate() - 1.5).abs() < 1e-3);
}

#[test]
fn synth_melody_waits_for_ready() {
    let cfg = Config::default();
    assert_eq!(cfg.strategy, BackendStrategy::Synth);
    let mut state = AudioState::new(&cfg);
    let rest = AudioTargets::at_rest(&cfg.mapping);
    for _ in 0..60 {
        assert_eq!(state.advance(&rest, 0.05, false).note, None);
    }
    let frame = state.advance(&rest, 0.05, true);
    assert_eq!(frame.note.map(|n| n.index), Some(0));
}

#[test]
fn file_strategy_has_no_melody() {
    let mut cfg = Config::default();
    cfg.strategy = BackendStrategy::File {
        url: "loop.ogg".to_string(),
    };
    let mut state = AudioState::new(&cfg);
    assert!(state.melody().is_none());
    let rest = AudioTargets::at_rest(&cfg.mapping);
    for _ in 0..60 {
        assert_eq!(state.advance(&rest, 0.05, true).note, None);
    }
}

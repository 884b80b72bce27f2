use crate::constants::RATE_WRITE_EPSILON;
use crate::core::constants::{NOTE_ATTACK_SEC, NOTE_SUSTAIN_LEVEL};
use crate::core::melody::NoteStep;
use crate::core::{
    AudioBackend, AudioFrame, AudioState, AudioTargets, BackendStrategy, Config, StartAction,
    StartGate,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

enum Source {
    File {
        media: web::HtmlAudioElement,
        _node: web::MediaElementAudioSourceNode,
    },
    Synth {
        osc: web::OscillatorNode,
        envelope: web::GainNode,
    },
}

/// source -> [tone filter] -> master gain -> destination
struct Graph {
    ctx: web::AudioContext,
    master: web::GainNode,
    filter: Option<web::BiquadFilterNode>,
    source: Source,
    last_rate: f32,
}

fn js_err(what: &str, e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{} error: {:?}", what, e)
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| js_err(label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn build_graph(
    strategy: &BackendStrategy,
    filter_enabled: bool,
    state: &AudioState,
) -> anyhow::Result<Graph> {
    let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
    let master = create_gain(&ctx, 0.0, "master gain")?;
    _ = master.connect_with_audio_node(&ctx.destination());

    let filter = if filter_enabled {
        let f = web::BiquadFilterNode::new(&ctx).map_err(|e| js_err("BiquadFilterNode", e))?;
        f.set_type(web::BiquadFilterType::Lowpass);
        f.frequency().set_value(state.filter_frequency_hz());
        _ = f.connect_with_audio_node(&master);
        Some(f)
    } else {
        None
    };
    let sink: &web::AudioNode = match &filter {
        Some(f) => f.as_ref(),
        None => master.as_ref(),
    };

    let source = match strategy {
        BackendStrategy::File { url } => {
            let media = web::HtmlAudioElement::new_with_src(url)
                .map_err(|e| js_err("HtmlAudioElement", e))?;
            media.set_loop(true);
            media.set_playback_rate(state.playback_rate() as f64);
            let node = ctx
                .create_media_element_source(&media)
                .map_err(|e| js_err("MediaElementAudioSourceNode", e))?;
            _ = node.connect_with_audio_node(sink);
            Source::File { media, _node: node }
        }
        BackendStrategy::Synth => {
            let osc = web::OscillatorNode::new(&ctx).map_err(|e| js_err("OscillatorNode", e))?;
            osc.set_type(web::OscillatorType::Triangle);
            let envelope = create_gain(&ctx, 0.0, "note envelope")?;
            _ = osc.connect_with_audio_node(&envelope);
            _ = envelope.connect_with_audio_node(sink);
            osc.start().map_err(|e| js_err("oscillator start", e))?;
            Source::Synth { osc, envelope }
        }
    };

    Ok(Graph {
        ctx,
        master,
        filter,
        source,
        last_rate: state.playback_rate(),
    })
}

impl Graph {
    fn write(&mut self, frame: &AudioFrame) {
        self.master.gain().set_value(frame.gain);
        if let Some(f) = &self.filter {
            f.frequency().set_value(frame.filter_frequency_hz);
        }
        match &self.source {
            Source::File { media, .. } => {
                if (frame.playback_rate - self.last_rate).abs() > RATE_WRITE_EPSILON {
                    media.set_playback_rate(frame.playback_rate as f64);
                    self.last_rate = frame.playback_rate;
                }
            }
            Source::Synth { osc, envelope } => {
                if let Some(note) = frame.note {
                    trigger_step(&self.ctx, osc, envelope, &note);
                }
            }
        }
    }
}

// Retune the oscillator and restart a short attack/decay envelope for one step
fn trigger_step(
    ctx: &web::AudioContext,
    osc: &web::OscillatorNode,
    envelope: &web::GainNode,
    note: &NoteStep,
) {
    let now = ctx.current_time();
    let end = now + (note.duration_sec as f64).max(NOTE_ATTACK_SEC * 2.0);
    _ = osc.frequency().set_value_at_time(note.frequency_hz, now);
    let env = envelope.gain();
    _ = env.cancel_scheduled_values(now);
    _ = env.set_value_at_time(0.0, now);
    _ = env.linear_ramp_to_value_at_time(1.0, now + NOTE_ATTACK_SEC);
    _ = env.linear_ramp_to_value_at_time(NOTE_SUSTAIN_LEVEL, end);
}

/// Web Audio implementation of the backend contract.
///
/// The graph is built on the first `ensure_started` call. Starting playback is
/// asynchronous; the outcome lands in the shared start gate, and a rejected
/// start is retried by the next gesture.
pub struct WebAudioBackend {
    strategy: BackendStrategy,
    filter_enabled: bool,
    gate: Rc<Cell<StartGate>>,
    graph: Option<Graph>,
    state: AudioState,
    on_ready: Option<Rc<dyn Fn()>>,
}

impl WebAudioBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            strategy: config.strategy.clone(),
            filter_enabled: config.filter_enabled,
            gate: Rc::new(Cell::new(StartGate::default())),
            graph: None,
            state: AudioState::new(config),
            on_ready: None,
        }
    }

    /// Run `f` once, when playback has started for the first time.
    pub fn on_ready(&mut self, f: impl Fn() + 'static) {
        self.on_ready = Some(Rc::new(f));
    }

    fn start_playback(&self) {
        let Some(graph) = &self.graph else {
            return;
        };
        let mut promises: Vec<js_sys::Promise> = Vec::new();
        let mut ok = true;
        match graph.ctx.resume() {
            Ok(p) => promises.push(p),
            Err(e) => {
                log::warn!("[audio] resume failed: {:?}", e);
                ok = false;
            }
        }
        if let Source::File { media, .. } = &graph.source {
            match media.play() {
                Ok(p) => promises.push(p),
                Err(e) => {
                    log::warn!("[audio] play failed: {:?}", e);
                    ok = false;
                }
            }
        }

        let gate = self.gate.clone();
        let on_ready = self.on_ready.clone();
        spawn_local(async move {
            for p in promises {
                if let Err(e) = JsFuture::from(p).await {
                    log::warn!("[audio] start rejected, waiting for next gesture: {:?}", e);
                    ok = false;
                }
            }
            let mut g = gate.get();
            let became_ready = g.resolve(ok);
            gate.set(g);
            if became_ready {
                log::info!("[audio] ready");
                if let Some(cb) = on_ready {
                    cb();
                }
            }
        });
    }
}

impl AudioBackend for WebAudioBackend {
    fn ensure_started(&mut self) {
        let mut gate = self.gate.get();
        let action = gate.request();
        self.gate.set(gate);
        match action {
            StartAction::Nothing => {}
            StartAction::RetryStart => self.start_playback(),
            StartAction::BuildAndStart => {
                match build_graph(&self.strategy, self.filter_enabled, &self.state) {
                    Ok(graph) => {
                        log::info!(
                            "[audio] graph built: strategy={:?} filter={}",
                            self.strategy,
                            self.filter_enabled
                        );
                        self.graph = Some(graph);
                        self.start_playback();
                    }
                    Err(e) => {
                        log::error!("[audio] {:?}", e);
                        gate.reset();
                        self.gate.set(gate);
                    }
                }
            }
        }
    }

    fn apply_targets(&mut self, targets: &AudioTargets, dt_sec: f32) {
        let frame = self.state.advance(targets, dt_sec, self.is_ready());
        if let Some(graph) = &mut self.graph {
            graph.write(&frame);
        }
    }

    fn resume_if_suspended(&mut self) {
        if !self.is_ready() {
            return;
        }
        let Some(graph) = &self.graph else {
            return;
        };
        if graph.ctx.state() == web::AudioContextState::Suspended {
            _ = graph.ctx.resume();
        }
        if let Source::File { media, .. } = &graph.source {
            if media.paused() {
                _ = media.play();
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.gate.get().is_ready()
    }
}

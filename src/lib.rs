#![cfg(target_arch = "wasm32")]
use crate::constants::{ENTITY_ID, REGION_ID};
use crate::core::{BackendStrategy, FrameClock, Simulation};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("skittish starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container: web::HtmlElement = dom::element_by_id(&document, REGION_ID)?;
    let entity: web::HtmlElement = dom::element_by_id(&document, ENTITY_ID)?;

    let config = dom::read_config(&container);
    match &config.strategy {
        BackendStrategy::File { url } => log::info!("[config] looping {}", url),
        BackendStrategy::Synth => log::info!("[config] no audio asset, using synth melody"),
    }

    let layout = dom::measure_layout(&container, &entity);
    let mut sim = Simulation::new(config.clone(), layout.region);
    sim.apply_layout(layout);

    // Audio is built lazily by the first gesture; the hint stays up until then
    let backend = Rc::new(RefCell::new(audio::WebAudioBackend::new(&config)));
    {
        let document = document.clone();
        backend
            .borrow_mut()
            .on_ready(move || overlay::set_sound_hint_visible(&document, false));
    }
    overlay::set_sound_hint_visible(&document, true);

    let pointer = Rc::new(RefCell::new(None));
    let pending_layout = Rc::new(RefCell::new(None));

    events::wire_input_handlers(events::InputWiring {
        container: container.clone(),
        pointer: pointer.clone(),
        backend: backend.clone(),
    });
    events::wire_resize(container, entity.clone(), pending_layout.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sim,
        clock: FrameClock::new(config.dt_cap),
        sink: dom::ElementSink::new(entity),
        pointer,
        pending_layout,
        backend,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

use crate::audio::WebAudioBackend;
use crate::core::{FrameClock, Layout, PointerState, Simulation};
use crate::dom::ElementSink;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sim: Simulation,
    pub clock: FrameClock,
    pub sink: ElementSink,

    // written by event listeners, read here
    pub pointer: Rc<RefCell<PointerState>>,
    pub pending_layout: Rc<RefCell<Option<Layout>>>,

    pub backend: Rc<RefCell<WebAudioBackend>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let dt_sec = self.clock.advance(Instant::now());

        if let Some(layout) = self.pending_layout.borrow_mut().take() {
            self.sim.apply_layout(layout);
        }
        self.sim.set_pointer(*self.pointer.borrow());

        let mut backend = self.backend.borrow_mut();
        self.sim.frame(dt_sec, &mut *backend, &mut self.sink);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

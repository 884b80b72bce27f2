use crate::audio::WebAudioBackend;
use crate::core::{AudioBackend, PointerState};
use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Handles shared between the pointer/gesture listeners and the frame loop.
///
/// Listeners only overwrite the pointer snapshot; the one exception is the
/// backend start, which has to run inside the gesture's call stack.
#[derive(Clone)]
pub struct InputWiring {
    pub container: web::HtmlElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub backend: Rc<RefCell<WebAudioBackend>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_pointerdown(&w);
    wire_click(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let container = w.container.clone();
    let moved_once = Cell::new(false);

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let region = dom::region_of(&w.container);
        let local = region.to_local(ev.client_x() as f32, ev.client_y() as f32);
        *w.pointer.borrow_mut() = Some(local);

        // The first move counts as an interaction; later moves do not retry
        if !moved_once.replace(true) {
            w.backend.borrow_mut().ensure_started();
        }
    }) as Box<dyn FnMut(_)>);

    _ = container.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let container = w.container.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        *w.pointer.borrow_mut() = None;
    }) as Box<dyn FnMut(_)>);

    _ = container.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let container = w.container.clone();

    // Touch input has no hover, so pressing counts as the gesture
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let region = dom::region_of(&w.container);
        *w.pointer.borrow_mut() = Some(region.to_local(ev.client_x() as f32, ev.client_y() as f32));
        w.backend.borrow_mut().ensure_started();
    }) as Box<dyn FnMut(_)>);

    _ = container.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        w.backend.borrow_mut().ensure_started();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

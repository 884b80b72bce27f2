use crate::core::Layout;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-measure on window resize. The frame loop picks up the pending layout
/// and re-clamps the entity before its next step.
pub fn wire_resize(
    container: web::HtmlElement,
    entity: web::HtmlElement,
    pending_layout: Rc<RefCell<Option<Layout>>>,
) {
    let closure = Closure::wrap(Box::new(move || {
        let layout = dom::measure_layout(&container, &entity);
        log::debug!(
            "[layout] region {:.0}x{:.0} half extent {:?}",
            layout.region.width,
            layout.region.height,
            layout.half_extent
        );
        *pending_layout.borrow_mut() = Some(layout);
    }) as Box<dyn FnMut()>);

    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

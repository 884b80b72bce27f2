use crate::constants::SOUND_HINT_ID;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Toggle the "click for sound" hint. Pages without the element are fine.
///
/// Sets both the `hidden` property and a `hidden` class, so the page may
/// animate the class while unstyled pages still lose the element.
pub fn set_sound_hint_visible(document: &web::Document, visible: bool) {
    let Some(hint) = document
        .get_element_by_id(SOUND_HINT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    hint.set_hidden(!visible);
    _ = hint.class_list().toggle_with_force("hidden", !visible);
    log::debug!("[audio] sound hint {}", if visible { "shown" } else { "hidden" });
}

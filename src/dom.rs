use crate::constants::{CONFIG_ATTR_PREFIX, RENDER_EPSILON_PX};
use crate::core::{Config, Layout, Region, RenderSink, OVERRIDE_KEYS};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

#[inline]
pub fn region_of(container: &web::Element) -> Region {
    let rect = container.get_bounding_client_rect();
    Region::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Region plus the entity's half size, if it has been laid out yet.
pub fn measure_layout(container: &web::Element, entity: &web::Element) -> Layout {
    let rect = entity.get_bounding_client_rect();
    let (w, h) = (rect.width() as f32, rect.height() as f32);
    Layout {
        region: region_of(container),
        half_extent: (w > 0.0 && h > 0.0).then_some([w * 0.5, h * 0.5]),
    }
}

/// Defaults overridden by `data-*` attributes on the region element. Bad
/// values are logged and skipped.
pub fn read_config(container: &web::Element) -> Config {
    let mut config = Config::default();
    for key in OVERRIDE_KEYS {
        let attr = format!("{}{}", CONFIG_ATTR_PREFIX, key);
        if let Some(value) = container.get_attribute(&attr) {
            if let Err(e) = config.apply_override(key, &value) {
                log::warn!("[config] ignoring {}=\"{}\": {}", attr, value, e);
            }
        }
    }
    config
}

/// Positions the entity element so its center sits on the simulated position.
pub struct ElementSink {
    el: web::HtmlElement,
    last: Option<Vec2>,
}

impl ElementSink {
    pub fn new(el: web::HtmlElement) -> Self {
        Self { el, last: None }
    }
}

impl RenderSink for ElementSink {
    fn render(&mut self, position: Vec2) {
        if let Some(last) = self.last {
            if (position - last).abs().max_element() < RENDER_EPSILON_PX {
                return;
            }
        }
        let transform = format!(
            "translate({:.2}px, {:.2}px) translate(-50%, -50%)",
            position.x, position.y
        );
        if let Err(e) = self.el.style().set_property("transform", &transform) {
            log::error!("[render] transform error: {:?}", e);
            return;
        }
        self.last = Some(position);
    }
}

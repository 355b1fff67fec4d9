//! Browser binding.
//!
//! [`WebElement`] adapts `web_sys::Element` to [`DomElement`], and
//! [`bind_messages`] attaches the single delegated click listener to
//! `#messages`.

use smol_str::SmolStr;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use warbler_common::http_client::HttpClient;

use super::{DomElement, Selector};
use crate::delegate::{Delegate, MESSAGES_CONTAINER_ID};
use crate::handler::{LikeToggleHandler, ToggleOptions};

/// A live DOM element.
#[derive(Debug, Clone)]
pub struct WebElement(pub web_sys::Element);

impl DomElement for WebElement {
    fn same_node(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other.0.as_ref();
        self.0.is_same_node(Some(other))
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(WebElement)
    }

    fn id(&self) -> Option<SmolStr> {
        let id = self.0.id();
        (!id.is_empty()).then(|| SmolStr::from(id))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().toggle(class) {
            clog(&format!("[warbler] toggling class {class} failed: {e:?}"));
        }
    }

    fn set_class(&self, class: &str, present: bool) {
        if let Err(e) = self.0.class_list().toggle_with_force(class, present) {
            clog(&format!("[warbler] setting class {class} failed: {e:?}"));
        }
    }

    fn data(&self, key: &str) -> Option<String> {
        self.0.get_attribute(&format!("data-{key}"))
    }
}

fn clog(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

/// Attach one click listener to the element with id `container_id`,
/// delegating to descendants matching `selector`.
///
/// Each matching click spawns its own toggle task on the browser event loop.
/// Failures the handler does not absorb are written to the console.
pub fn bind<C>(
    handler: LikeToggleHandler<C>,
    container_id: &str,
    selector: Selector,
) -> Result<(), JsValue>
where
    C: HttpClient + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{container_id}`")))?;

    let delegate = Delegate::new(WebElement(container.clone()), selector);

    let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let Some(icon) = delegate.resolve(&WebElement(target)) else {
            return;
        };

        let handler = handler.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = handler.toggle(&icon).await {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, "toggle_like failed");
                clog(&format!("[warbler] toggle_like failed: {e}"));
            }
        });
    }) as Box<dyn FnMut(web_sys::Event)>);

    container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Bind `handler` to heart icons inside `#messages`.
pub fn bind_messages<C>(handler: LikeToggleHandler<C>) -> Result<(), JsValue>
where
    C: HttpClient + 'static,
{
    bind(
        handler,
        MESSAGES_CONTAINER_ID,
        Selector::class(warbler_common::types::like::HEART_CLASS),
    )
}

/// Page entry point: bind like toggles against the page's own origin.
#[wasm_bindgen(js_name = bindLikeToggles)]
pub fn bind_like_toggles() -> Result<(), JsValue> {
    let origin = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .origin()?;
    let base = url::Url::parse(&origin).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = ToggleOptions::new().base(base).build();
    bind_messages(LikeToggleHandler::new(reqwest::Client::new(), options))
}

//! Prodesk UI
//!
//! Browser side of the Prodesk chatbot platform, built with Leptos (WASM):
//!
//! - the admin dashboard (see the `prodesk-dashboard` binary)
//! - the embeddable chat widget, exported to JavaScript as `init`
//!
//! ```html
//! <script type="module">
//!   import wasm, { init } from "./prodesk_ui.js";
//!   await wasm();
//!   const widget = init({ apiKey: "pk_live_...", theme: { primaryColor: "#ff5500" } });
//!   widget.update({ theme: { position: "bottom-left" } });
//!   widget.destroy();
//! </script>
//! ```

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use prodesk::widget::{Conversation, ConfigUpdate, InitConfig, SessionId};

pub mod api;
pub mod app;
pub mod components;
pub mod dom;
pub mod pages;
pub mod state;
pub mod widget;

const CONTAINER_PREFIX: &str = "prodesk-widget-";

/// Decode a plain JS object into a serde type
fn from_js<T: serde::de::DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("config must be a plain object"))?;

    serde_json::from_str(&json).map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))
}

/// Handle returned to the host page. Each handle owns its own container
/// and reactive scope.
#[wasm_bindgen]
pub struct WidgetHandle {
    conversation: RwSignal<Conversation>,
    container: web_sys::Element,
    disposer: Disposer,
}

#[wasm_bindgen]
impl WidgetHandle {
    /// Merge new settings into the live widget. History and session are kept.
    pub fn update(&self, config: JsValue) -> Result<(), JsValue> {
        let update: ConfigUpdate = from_js(&config)?;
        self.conversation.update(|c| update.apply_to(c));
        Ok(())
    }

    /// DOM id of this widget's root element
    #[wasm_bindgen(getter = containerId)]
    pub fn container_id(&self) -> String {
        self.container.id()
    }

    /// Remove the widget from the page and drop its signals and effects
    pub fn destroy(self) {
        self.container.remove();
        drop(self.disposer);
        web_sys::console::log_1(&JsValue::from_str("Prodesk widget destroyed"));
    }
}

/// Mount the chat widget onto the current page
#[wasm_bindgen]
pub fn init(config: JsValue) -> Result<WidgetHandle, JsValue> {
    console_error_panic_hook::set_once();

    let config: InitConfig = from_js(&config)?;
    if let Err(e) = config.validate() {
        web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        return Err(JsValue::from_str(&e.to_string()));
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let session = SessionId::generate();

    let container = document.create_element("div")?;
    container.set_id(&format!("{}{}", CONTAINER_PREFIX, session));
    body.append_child(&container)?;

    let mount = as_child_of_current_owner(
        |(parent, conversation): (web_sys::HtmlElement, Conversation)| {
            let conversation = create_rw_signal(conversation);
            mount_to(parent, move || {
                view! { <widget::ChatWidget conversation=conversation /> }
            });
            conversation
        },
    );
    let (conversation, disposer) = mount((
        container.clone().unchecked_into(),
        Conversation::new(config.api_key.clone(), config.resolved_theme(), session),
    ));

    web_sys::console::log_1(&JsValue::from_str("Prodesk widget initialized"));

    Ok(WidgetHandle {
        conversation,
        container,
        disposer,
    })
}

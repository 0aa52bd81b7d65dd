//! Browser helpers for the data-source settings page.
//!
//! - **Configuration**: reads the optional JSON override from the
//!   `<script id="settings-config">` element of the host page.
//! - **Routing**: extracts the provider id from the current location.
//! - **User Feedback**: temporary "toast" notifications for saves and failures.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use common::settings::config::SettingsConfig;

const CONFIG_ELEMENT_ID: &str = "settings-config";

/// Loads the page configuration, falling back to defaults when the host page
/// carries no override or an invalid one.
pub fn load_config() -> SettingsConfig {
    let json = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    let Some(json) = json else {
        return SettingsConfig::default();
    };

    SettingsConfig::from_json(&json).unwrap_or_else(|cause| {
        log::warn!("Ignoring invalid settings configuration: {cause}");
        SettingsConfig::default()
    })
}

/// Provider id of the current route, `None` on the creation route.
pub fn current_route_id(config: &SettingsConfig) -> Option<String> {
    let path = web_sys::window()?.location().pathname().ok()?;
    config.provider_id_from_path(&path)
}

/// Displays a temporary notification message at the bottom of the screen.
/// The toast removes itself after three seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

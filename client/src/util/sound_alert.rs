//! Doorbell sound-alert preference.
//!
//! Stored as `"true"`/`"false"` under a fixed key. Alerts default to on when
//! nothing is stored. Changes are broadcast as a window `CustomEvent` so every
//! mounted view that plays the chime can pick up the new value without a
//! reload.

#[cfg(test)]
#[path = "sound_alert_test.rs"]
mod sound_alert_test;

use super::storage::KeyValueStore;

pub const SOUND_ALERT_KEY: &str = "soundAlertsEnabled";
pub const SOUND_ALERT_EVENT: &str = "qring:sound-alerts-changed";

/// Read the stored preference. Unknown values fall back to enabled.
pub fn read_preference(store: &dyn KeyValueStore) -> bool {
    match store.get(SOUND_ALERT_KEY).as_deref() {
        Some("false") => false,
        Some(_) | None => true,
    }
}

pub fn write_preference(store: &dyn KeyValueStore, enabled: bool) {
    store.set(SOUND_ALERT_KEY, if enabled { "true" } else { "false" });
}

/// Flip the preference, persist it, and notify other views.
pub fn toggle(store: &dyn KeyValueStore, current: bool) -> bool {
    let next = !current;
    write_preference(store, next);
    broadcast(next);
    next
}

/// Dispatch [`SOUND_ALERT_EVENT`] on `window` with the new value as `detail`.
pub fn broadcast(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&wasm_bindgen::JsValue::from_bool(enabled));
        if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(SOUND_ALERT_EVENT, &init) {
            let _ = window.dispatch_event(&event);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Extract the boolean `detail` from a [`SOUND_ALERT_EVENT`].
#[cfg(feature = "hydrate")]
pub fn event_detail(event: &web_sys::Event) -> Option<bool> {
    use wasm_bindgen::JsCast;

    event.dyn_ref::<web_sys::CustomEvent>()?.detail().as_bool()
}

/// Call `on_change` with the new value whenever [`SOUND_ALERT_EVENT`] fires.
/// Remove the returned handle on cleanup.
#[cfg(feature = "hydrate")]
pub fn listen(on_change: impl Fn(bool) + 'static) -> leptos::leptos_dom::helpers::WindowListenerHandle {
    leptos::leptos_dom::helpers::window_event_listener_untyped(SOUND_ALERT_EVENT, move |ev| {
        if let Some(enabled) = event_detail(&ev) {
            on_change(enabled);
        }
    })
}

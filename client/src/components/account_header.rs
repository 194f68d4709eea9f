//! Dashboard header: signed-in identity, doorbell chime toggle, account links
//! and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::AppAuth;
use crate::auth::gate::LOGIN_PATH;
use crate::state::auth::AuthState;
use crate::util::auth::{replace_history, sync_auth_state};
use crate::util::sound_alert;

#[component]
pub fn AccountHeader(
    title: &'static str,
    /// Show the doorbell sound-alert toggle.
    #[prop(optional)]
    sound_toggle: bool,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let sound_enabled = RwSignal::new(sound_alert::read_preference(coordinator.session().storage()));

    #[cfg(feature = "hydrate")]
    {
        let listener = sound_alert::listen(move |enabled| sound_enabled.set(enabled));
        on_cleanup(move || listener.remove());
    }

    let session_toggle = coordinator.session().clone();
    let on_toggle_sound = move |_| {
        let next = sound_alert::toggle(session_toggle.storage(), sound_enabled.get_untracked());
        sound_enabled.set(next);
    };

    let busy = RwSignal::new(false);
    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        auth.update(|a| a.loading = true);

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                coordinator.logout().await;
                sync_auth_state(auth, coordinator.session(), false);
                busy.set(false);
                navigate(LOGIN_PATH, replace_history());
            });
        }
    };

    let display_name = move || auth.get().user.map(|u| u.display_name()).unwrap_or_default();

    view! {
        <header class="account-header">
            <span class="account-header__title">{title}</span>
            <span class="account-header__spacer"></span>
            {sound_toggle
                .then(|| {
                    view! {
                        <button
                            class="btn account-header__sound"
                            on:click=on_toggle_sound
                            title="Toggle doorbell sound alerts"
                        >
                            {move || if sound_enabled.get() { "Sound alerts: on" } else { "Sound alerts: off" }}
                        </button>
                    }
                })}
            <span class="account-header__user">{display_name}</span>
            <a class="btn account-header__password" href="/account/password">
                "Change password"
            </a>
            <button class="btn account-header__logout" on:click=on_logout disabled=move || busy.get()>
                "Logout"
            </button>
        </header>
    }
}

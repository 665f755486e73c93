use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

/// Application chrome: a top bar with the product name, the signed-in user
/// and a logout control, with the page content below.
#[component]
#[allow(non_snake_case)]
pub fn Shell(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <div class="shell">
            <header class="shell__header">
                <h1>
                    <span class="accent">"Incident"</span>
                    " Reporter"
                </h1>
                <div class="shell__user">
                    <span>
                        {move || {
                            auth_state
                                .get()
                                .user
                                .map(|u| u.username)
                                .unwrap_or_default()
                        }}
                    </span>
                    <button
                        class="button button--ghost"
                        title="Sign out"
                        on:click=move |_| do_logout(set_auth_state)
                    >
                        {icon("log-out")}
                    </button>
                </div>
            </header>
            <main class="shell__content">{children()}</main>
        </div>
    }
}

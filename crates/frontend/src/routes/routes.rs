use leptos::prelude::*;

use crate::system::auth::context::use_auth;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;

/// Auth gate: the app has one authenticated surface; everything else is the
/// login screen.
#[component]
#[allow(non_snake_case)]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().user.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <HomePage />
        </Show>
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::toast::ToastService;
use crate::system::auth::{api, context::use_auth, context::AuthState};

#[component]
#[allow(non_snake_case)]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();

        set_is_loading.set(true);

        spawn_local(async move {
            match api::login(email_val, password_val).await {
                Ok(user) => {
                    // Switches the auth gate over to the home page.
                    set_auth_state.set(AuthState { user: Some(user) });
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    toasts.error("There was an error signing in.");
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>
                    <span class="accent">"Incident"</span>
                    " Reporter"
                </h1>
                <p class="login-tagline">"Report incidents lightning fast!"</p>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="name@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || is_loading.get() || email.get().is_empty()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

use contracts::system::auth::SessionUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
}

/// Auth context provider component.
///
/// Restores the session from the provider on mount; until that resolves the
/// app renders as signed-out.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::session().await {
                Ok(user) => set_auth_state.set(AuthState { user }),
                Err(e) => log::warn!("session restore failed: {}", e),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state.
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign out: revoke the session with the provider, then clear local state.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    spawn_local(async move {
        if let Err(e) = api::logout().await {
            log::warn!("logout request failed: {}", e);
        }
        set_auth_state.set(AuthState::default());
    });
}

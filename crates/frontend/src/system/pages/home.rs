use leptos::prelude::*;

use crate::domain::incident::ui::list::IncidentsTable;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;

#[component]
#[allow(non_snake_case)]
pub fn HomePage() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Shell>
            <p class="welcome">
                <span class="accent">"Welcome back,"</span>
                " "
                {move || {
                    auth_state
                        .get()
                        .user
                        .map(|u| u.username)
                        .unwrap_or_default()
                }}
            </p>
            <IncidentsTable />
        </Shell>
    }
}

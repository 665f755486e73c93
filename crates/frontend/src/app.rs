use leptos::prelude::*;

use crate::domain::incident::store::IncidentStore;
use crate::routes::routes::AppRoutes;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;

#[component]
#[allow(non_snake_case)]
pub fn App() -> impl IntoView {
    // The one shared incident store; every view reads the same snapshot.
    provide_context(IncidentStore::new());

    // Centralized notification and modal services.
    provide_context(ToastService::new());
    provide_context(ModalStackService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
            <ModalHost />
            <ToastHost />
        </AuthProvider>
    }
}

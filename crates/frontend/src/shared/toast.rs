//! Lightweight toast notifications.
//!
//! Mutation outcomes are surfaced here instead of blocking dialogs: the UI
//! stays interactive after any failure.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    pub kind: ToastKind,
    pub title: String,
}

/// Centralized toast queue. Provided once in the app root.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastKind::Success, title.into());
    }

    pub fn error(&self, title: impl Into<String>) {
        self.push(ToastKind::Destructive, title.into());
    }

    fn push(&self, kind: ToastKind, title: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, title }));

        // Auto-dismiss; manual close races are fine, dismiss is idempotent.
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            svc.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

/// Renders the toast queue. Must be mounted exactly once, in the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast--success",
                        ToastKind::Destructive => "toast toast--destructive",
                    };
                    view! {
                        <div class=class role="status">
                            <span class="toast__title">{toast.title.clone()}</span>
                            <button class="toast__close" on:click=move |_| svc.dismiss(id)>
                                {crate::shared::icons::icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus centered modal surface. Dialog content renders its own
/// header, so the frame stays chrome-free.
#[component]
pub fn ModalFrame(
    /// Called when the frame wants to close (overlay click).
    on_close: Callback<()>,
    /// z-index for stacking.
    z_index: i32,
    /// Extra style for the modal surface.
    #[prop(optional, into)]
    modal_style: String,
    children: Children,
) -> impl IntoView {
    let pressed_on_overlay = RwSignal::new(false);

    let on_overlay = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only when press AND release both landed on the overlay, so a text
    // selection ending outside the modal does not dismiss it.
    let handle_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(on_overlay(&ev));
    };
    let handle_click = move |ev: ev::MouseEvent| {
        let should_close = pressed_on_overlay.get_untracked() && on_overlay(&ev);
        pressed_on_overlay.set(false);
        if should_close {
            // Defer one tick: removing the overlay during its own click
            // dispatch would invoke a dropped handler.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_mouse_down
            on:click=handle_click
        >
            <div
                class="modal"
                style=format!("position: relative; {}", modal_style)
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}

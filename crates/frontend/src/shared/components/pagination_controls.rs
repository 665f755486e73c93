use leptos::prelude::*;

/// Previous/Next pagination with a compact page indicator.
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed).
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages.
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Whether a previous page exists.
    #[prop(into)]
    has_prev: Signal<bool>,

    /// Whether a next page exists.
    #[prop(into)]
    has_next: Signal<bool>,

    /// Callback with the new page index.
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <span class="pagination-info">
                {move || format!("{} / {}", current_page.get() + 1, total_pages.get().max(1))}
            </span>
            <button
                class="button button--outline"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || !has_prev.get()
            >
                "Previous"
            </button>
            <button
                class="button button--outline"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=move || !has_next.get()
            >
                "Next"
            </button>
        </div>
    }
}

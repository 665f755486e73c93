//! List helpers shared by tabular views: sorting and a debounced search box.
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen_futures::spawn_local;

/// Types that can be compared by a named field.
pub trait Sortable {
    /// Compare two items on the given field. Unknown fields compare equal,
    /// which leaves the input order untouched under a stable sort.
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sort a list by the given field.
///
/// `sort_by` is stable, so items with equal keys keep their input order in
/// both directions (reversing the comparator does not reorder equal keys).
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Sort indicator for a column header.
pub fn get_sort_indicator(current_field: Option<&str>, field: &str, ascending: bool) -> &'static str {
    if current_field == Some(field) {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        ""
    }
}

/// Search input with debounce and a clear button.
///
/// The needle is forwarded through `on_change` 300 ms after the last
/// keystroke; clearing forwards immediately.
#[component]
pub fn SearchInput(
    /// Current filter value (used to seed the input).
    #[prop(into)]
    value: Signal<String>,
    /// Callback fired with the debounced needle.
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder text.
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "search incident...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Each keystroke bumps the generation; only the newest pending timeout
    // is allowed to fire the callback.
    let generation = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let my_generation = generation.get_value() + 1;
        generation.set_value(my_generation);
        spawn_local(async move {
            TimeoutFuture::new(300).await;
            if generation.get_value() == my_generation {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                placeholder={placeholder}
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || (!input_value.get().is_empty()).then(|| view! {
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            })}
        </div>
    }
}

pub mod view_model;

use contracts::domain::incident::{Capabilities, IncidentStatus};
use leptos::prelude::*;

use self::view_model::IncidentDialogViewModel;
use crate::domain::incident::store::IncidentStore;
use crate::shared::toast::ToastService;

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Incident dialog: create, view, or edit one report.
///
/// The caller decides what the actor may do (`capabilities`) and whether a
/// target incident exists; this component only renders the allowed controls
/// and drives the view model.
#[component]
#[allow(non_snake_case)]
pub fn IncidentDialog(
    vm: IncidentDialogViewModel,
    capabilities: Capabilities,
    on_close: Callback<()>,
) -> impl IntoView {
    let store = use_context::<IncidentStore>().expect("IncidentStore not found in context");
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let is_edit = vm.is_edit();
    let can_edit = capabilities.can_edit;
    let can_delete = capabilities.can_delete && is_edit;
    let status_enabled = is_edit && can_edit;

    let heading = if is_edit && can_edit {
        "Edit report"
    } else if can_edit {
        "Report a new incident"
    } else {
        "View report"
    };

    let last_updated = vm
        .target
        .as_ref()
        .map(|i| format!("Last updated on {} by {}", format_timestamp(i.updated_at), i.updated_by));

    let store_delete = store.clone();
    let vm_submit = vm.clone();
    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm_submit.submit(store.clone(), toasts, on_close);
    };

    let vm_delete = vm.clone();
    let handle_delete = move |_| {
        vm_delete.delete(store_delete.clone(), toasts, on_close);
    };

    let vm_view = vm.clone();

    view! {
        <div class="dialog">
            <div class="dialog__header">
                <h3>{heading}</h3>
            </div>

            <form class="dialog__form" on:submit=handle_submit>
                <input
                    type="text"
                    id="title"
                    placeholder="Title"
                    disabled=!can_edit
                    prop:value={
                        let vm = vm_view.clone();
                        move || vm.form.get().title
                    }
                    on:input={
                        let vm = vm_view.clone();
                        move |ev| vm.form.update(|f| f.title = event_target_value(&ev))
                    }
                />

                <textarea
                    id="description"
                    placeholder="Type your message here."
                    rows="5"
                    disabled=!can_edit
                    prop:value={
                        let vm = vm_view.clone();
                        move || vm.form.get().description
                    }
                    on:input={
                        let vm = vm_view.clone();
                        move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    }
                ></textarea>

                <label class="dialog__status">
                    "Status:"
                    <select
                        disabled=!status_enabled
                        prop:value={
                            let vm = vm_view.clone();
                            move || vm.form.get().status.as_str().to_string()
                        }
                        on:change={
                            let vm = vm_view.clone();
                            move |ev| {
                                if let Some(status) = IncidentStatus::from_wire(&event_target_value(&ev)) {
                                    vm.form.update(|f| f.status = status);
                                }
                            }
                        }
                    >
                        {IncidentStatus::ALL
                            .iter()
                            .map(|status| view! {
                                <option value={status.as_str()}>{status.label()}</option>
                            })
                            .collect_view()}
                    </select>
                </label>

                {can_edit.then(|| {
                    let vm = vm_view.clone();
                    view! {
                        <button
                            type="submit"
                            class="button button--primary"
                            disabled=move || vm.is_busy()
                        >
                            {if is_edit { "Update incident" } else { "Submit incident" }}
                        </button>
                    }
                })}

                {can_delete.then(|| {
                    let vm = vm_view.clone();
                    view! {
                        <button
                            type="button"
                            class="button button--destructive"
                            disabled={
                                let vm = vm.clone();
                                move || vm.is_busy()
                            }
                            on:click=handle_delete
                        >
                            "Delete incident"
                        </button>
                    }
                })}

                {last_updated.map(|text| view! { <span class="dialog__footer">{text}</span> })}
            </form>
        </div>
    }
}

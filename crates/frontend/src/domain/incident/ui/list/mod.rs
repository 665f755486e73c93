pub mod state;
pub mod view_model;

use contracts::domain::incident::{capabilities, Capabilities, Incident, IncidentStatus};
use leptos::prelude::*;
use std::sync::Arc;

use self::state::{create_state, sync_to_url};
use self::view_model::{
    project, FilterField, TableBody, PAGE_SIZE, SORT_CREATED_AT, SORT_CREATED_BY, SORT_STATUS,
};
use crate::domain::incident::store::{use_incidents, IncidentStore};
use crate::domain::incident::ui::dialog::view_model::IncidentDialogViewModel;
use crate::domain::incident::ui::dialog::IncidentDialog;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, SearchInput};
use crate::shared::modal_stack::ModalStackService;
use crate::system::auth::context::use_auth;

fn status_color(status: IncidentStatus) -> &'static str {
    match status {
        IncidentStatus::Open => "#E12222",
        IncidentStatus::InProgress => "#FFC107",
        IncidentStatus::Resolved | IncidentStatus::Closed => "#27951D",
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn IncidentsTable() -> impl IntoView {
    let store = use_context::<IncidentStore>().expect("IncidentStore not found in context");
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let (auth_state, _) = use_auth();
    let state = create_state();
    let (incidents, loading) = use_incidents();

    // Initial fetch. Further refreshes come from mutations and the button.
    store.refresh_in_background();

    // Keep the query string in step with the view.
    Effect::new(move |_| sync_to_url(&state.get()));

    let vm = Memo::new(move |_| project(&incidents.get(), loading.get(), &state.get()));

    let open_dialog = move |incident: Option<Incident>| {
        let Some(user) = auth_state.get_untracked().user else {
            return;
        };
        // Evaluated once here and passed down; the dialog itself does not
        // re-derive roles.
        let caps = match &incident {
            Some(incident) => capabilities(&user, incident),
            None => Capabilities::FULL,
        };
        let dialog_vm = IncidentDialogViewModel::new(incident);

        let guard = {
            let vm = dialog_vm.clone();
            Arc::new(move || !vm.is_busy()) as Arc<dyn Fn() -> bool + Send + Sync>
        };
        modal_stack.push_with_guard(
            Some("width: min(520px, 92vw);".to_string()),
            guard,
            move |handle| {
                let vm = dialog_vm.clone();
                let on_close = Callback::new({
                    let handle = handle.clone();
                    move |_| handle.close()
                });
                view! {
                    <IncidentDialog vm=vm capabilities=caps on_close=on_close />
                }
                .into_any()
            },
        );
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field.as_deref() == Some(field) {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = Some(field.to_string());
                    s.sort_ascending = true;
                }
            });
        }
    };

    let sort_header = move |field: &'static str, label: &'static str| {
        view! {
            <th class="table__header-cell table__header-cell--sortable" on:click=toggle_sort(field)>
                <span class="table__sort-button">
                    {label}
                    {icon("arrow-up-down")}
                    <span>
                        {move || {
                            let s = state.get();
                            get_sort_indicator(s.sort_field.as_deref(), field, s.sort_ascending)
                        }}
                    </span>
                </span>
            </th>
        }
    };

    let store_for_refresh = store.clone();

    view! {
        <div class="content">
            <div class="header">
                <h2>"Incidents"</h2>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_dialog(None)>
                        {icon("plus")}
                        "Report a new incident"
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=move |_| store_for_refresh.refresh_in_background()
                    >
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            <div class="toolbar">
                <SearchInput
                    value=Signal::derive(move || state.get().filter)
                    on_change=Callback::new(move |needle: String| {
                        state.update(|s| {
                            s.filter = needle;
                            s.page = 0;
                        });
                    })
                />
                <select
                    class="filter-field"
                    prop:value=move || match state.get().filter_field {
                        FilterField::Title => "title".to_string(),
                        FilterField::Id => "id".to_string(),
                    }
                    on:change=move |ev| {
                        let field = match event_target_value(&ev).as_str() {
                            "id" => FilterField::Id,
                            _ => FilterField::Title,
                        };
                        state.update(|s| {
                            s.filter_field = field;
                            s.page = 0;
                        });
                    }
                >
                    <option value="title">"Title"</option>
                    <option value="id">"Incident ID"</option>
                </select>
            </div>

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Incident ID"</th>
                            <th class="table__header-cell">"Title"</th>
                            {sort_header(SORT_CREATED_BY, "Created By")}
                            {sort_header(SORT_CREATED_AT, "Created At")}
                            {sort_header(SORT_STATUS, "Status")}
                        </tr>
                    </thead>
                    <tbody>
                        {move || match vm.get().body {
                            TableBody::Loading => (0..PAGE_SIZE)
                                .map(|_| view! {
                                    <tr class="table__row table__row--placeholder">
                                        <td class="table__cell" colspan="5">
                                            <div class="loading-bar"></div>
                                        </td>
                                    </tr>
                                }.into_any())
                                .collect_view()
                                .into_any(),
                            TableBody::Empty => view! {
                                <tr class="table__row">
                                    <td class="table__cell table__cell--empty" colspan="5">
                                        "No results."
                                    </td>
                                </tr>
                            }
                            .into_any(),
                            TableBody::Rows(rows) => rows
                                .into_iter()
                                .map(|incident| {
                                    let open = incident.clone();
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">
                                                <button
                                                    class="incident-id"
                                                    on:click=move |_| open_dialog(Some(open.clone()))
                                                >
                                                    {incident.id.clone()}
                                                </button>
                                            </td>
                                            <td class="table__cell">{incident.title.clone()}</td>
                                            <td class="table__cell">{incident.created_by.clone()}</td>
                                            <td class="table__cell">{format_timestamp(incident.created_at)}</td>
                                            <td class="table__cell">
                                                <span style=format!("color: {};", status_color(incident.status))>
                                                    {incident.status.as_str()}
                                                </span>
                                            </td>
                                        </tr>
                                    }
                                    .into_any()
                                })
                                .collect_view()
                                .into_any(),
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || vm.get().page)
                total_pages=Signal::derive(move || vm.get().page_count)
                has_prev=Signal::derive(move || vm.get().has_prev)
                has_next=Signal::derive(move || vm.get().has_next)
                on_page_change=Callback::new(move |page| state.update(|s| s.page = page))
            />
        </div>
    }
}

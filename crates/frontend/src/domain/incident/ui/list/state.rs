use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::view_model::FilterField;

/// UI state of the incident table: one filter needle, one active sort key,
/// one page index.
#[derive(Clone, Debug, PartialEq)]
pub struct IncidentListState {
    pub filter: String,
    pub filter_field: FilterField,
    pub sort_field: Option<String>,
    pub sort_ascending: bool,
    pub page: usize,
}

impl Default for IncidentListState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            filter_field: FilterField::Title,
            sort_field: None,
            sort_ascending: true,
            page: 0,
        }
    }
}

/// Query-string image of the list state, so a reloaded or shared URL lands
/// on the same view.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<FilterField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
}

pub fn create_state() -> RwSignal<IncidentListState> {
    RwSignal::new(restore_from_url())
}

fn restore_from_url() -> IncidentListState {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let query: ListQuery = serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

    let mut state = IncidentListState::default();
    if let Some(q) = query.q {
        state.filter = q;
    }
    if let Some(field) = query.field {
        state.filter_field = field;
    }
    state.sort_field = query.sort;
    state.sort_ascending = query.dir.as_deref() != Some("desc");
    state.page = query.page.unwrap_or(0);
    state
}

/// Mirror the state into the URL with `history.replaceState` (no new history
/// entries while the user types or pages around).
pub fn sync_to_url(state: &IncidentListState) {
    let query = ListQuery {
        q: (!state.filter.is_empty()).then(|| state.filter.clone()),
        field: (state.filter_field != FilterField::Title).then_some(state.filter_field),
        sort: state.sort_field.clone(),
        dir: state
            .sort_field
            .is_some()
            .then(|| if state.sort_ascending { "asc" } else { "desc" }.to_string()),
        page: (state.page > 0).then_some(state.page),
    };

    let query_string = serde_qs::to_string(&query).unwrap_or_default();
    let new_url = if query_string.is_empty() {
        "?".to_string()
    } else {
        format!("?{}", query_string)
    };

    let Some(window) = web_sys::window() else {
        return;
    };
    let current = window.location().search().unwrap_or_default();
    if current == new_url || (current.is_empty() && query_string.is_empty()) {
        return;
    }
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
    }
}

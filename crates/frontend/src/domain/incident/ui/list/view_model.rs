//! Pure projection of a store snapshot into table rows.
//!
//! Everything here is a function of `(snapshot, loading flag, list state)` —
//! no signal reads, no I/O — so the whole row model is unit-testable on the
//! host.

use contracts::domain::incident::Incident;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::state::IncidentListState;
use crate::shared::list_utils::{sort_list, Sortable};

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Field the free-text filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Title,
    Id,
}

/// Sort keys the table exposes.
pub const SORT_CREATED_BY: &str = "created_by";
pub const SORT_CREATED_AT: &str = "created_at";
pub const SORT_STATUS: &str = "status";

impl Sortable for Incident {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            SORT_CREATED_BY => self
                .created_by
                .to_lowercase()
                .cmp(&other.created_by.to_lowercase()),
            SORT_CREATED_AT => self.created_at.cmp(&other.created_at),
            // Status sorts by its wire string, like a plain string column.
            SORT_STATUS => self.status.as_str().cmp(other.status.as_str()),
            _ => Ordering::Equal,
        }
    }
}

/// What the table body should render.
///
/// `Loading` (refresh in flight) and `Empty` (settled, zero matches) are
/// distinct on purpose: placeholder rows versus "No results.".
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows(Vec<Incident>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    pub body: TableBody,
    /// Clamped page index actually shown.
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the filter, across all pages.
    pub matching: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Derive the visible rows.
///
/// Filter: case-insensitive substring match of the needle against the
/// designated field; an empty needle matches everything. Sort: single
/// optional key, stable in both directions (equal keys keep snapshot
/// order). Pagination: fixed page size, out-of-range page indexes clamp to
/// the last page instead of failing.
pub fn project(snapshot: &[Incident], loading: bool, state: &IncidentListState) -> TableViewModel {
    let needle = state.filter.to_lowercase();
    let mut rows: Vec<Incident> = snapshot
        .iter()
        .filter(|incident| {
            if needle.is_empty() {
                return true;
            }
            let haystack = match state.filter_field {
                FilterField::Title => &incident.title,
                FilterField::Id => &incident.id,
            };
            haystack.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if let Some(field) = &state.sort_field {
        sort_list(&mut rows, field, state.sort_ascending);
    }

    let matching = rows.len();
    let page_count = (matching + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = if page_count == 0 {
        0
    } else {
        state.page.min(page_count - 1)
    };

    let page_rows: Vec<Incident> = rows.into_iter().skip(page * PAGE_SIZE).take(PAGE_SIZE).collect();

    let body = if page_rows.is_empty() {
        if loading {
            TableBody::Loading
        } else {
            TableBody::Empty
        }
    } else {
        TableBody::Rows(page_rows)
    };

    TableViewModel {
        body,
        page,
        page_count,
        matching,
        has_prev: page > 0,
        has_next: page + 1 < page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::incident::IncidentStatus;

    fn incident(id: &str, title: &str, by: &str, at: &str, status: IncidentStatus) -> Incident {
        Incident {
            id: id.into(),
            title: title.into(),
            description: "Something is broken".into(),
            status,
            created_by: by.into(),
            updated_by: by.into(),
            created_at: at.parse().unwrap(),
            updated_at: at.parse().unwrap(),
        }
    }

    fn sample() -> Vec<Incident> {
        vec![
            incident("a", "Outage", "alice", "2024-03-01T09:00:00Z", IncidentStatus::Open),
            incident("b", "Latency", "bob", "2024-03-02T09:00:00Z", IncidentStatus::Closed),
        ]
    }

    fn ids(vm: &TableViewModel) -> Vec<String> {
        match &vm.body {
            TableBody::Rows(rows) => rows.iter().map(|i| i.id.clone()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring_on_title() {
        let state = IncidentListState {
            filter: "out".into(),
            ..Default::default()
        };
        let vm = project(&sample(), false, &state);
        assert_eq!(ids(&vm), vec!["a"]);
        assert_eq!(vm.matching, 1);
    }

    #[test]
    fn filter_can_target_the_id_field() {
        let state = IncidentListState {
            filter: "B".into(),
            filter_field: FilterField::Id,
            ..Default::default()
        };
        let vm = project(&sample(), false, &state);
        assert_eq!(ids(&vm), vec!["b"]);
    }

    #[test]
    fn zero_matches_reports_empty_not_loading() {
        let state = IncidentListState {
            filter: "nothing-matches-this".into(),
            ..Default::default()
        };
        let vm = project(&sample(), false, &state);
        assert_eq!(vm.body, TableBody::Empty);
    }

    #[test]
    fn loading_wins_over_empty_while_a_refresh_is_in_flight() {
        let state = IncidentListState::default();
        let vm = project(&[], true, &state);
        assert_eq!(vm.body, TableBody::Loading);

        // Once rows exist they are shown even mid-refresh.
        let vm = project(&sample(), true, &state);
        assert!(matches!(vm.body, TableBody::Rows(_)));
    }

    #[test]
    fn created_at_descending_reverses_ascending() {
        let mut state = IncidentListState {
            sort_field: Some(SORT_CREATED_AT.into()),
            sort_ascending: true,
            ..Default::default()
        };
        let ascending = ids(&project(&sample(), false, &state));

        state.sort_ascending = false;
        let descending = ids(&project(&sample(), false, &state));

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn equal_sort_keys_keep_snapshot_order() {
        let snapshot = vec![
            incident("x", "First", "carol", "2024-03-01T09:00:00Z", IncidentStatus::Open),
            incident("y", "Second", "carol", "2024-03-01T09:00:00Z", IncidentStatus::Open),
            incident("z", "Third", "carol", "2024-03-01T09:00:00Z", IncidentStatus::Open),
        ];
        for ascending in [true, false] {
            let state = IncidentListState {
                sort_field: Some(SORT_CREATED_AT.into()),
                sort_ascending: ascending,
                ..Default::default()
            };
            let vm = project(&snapshot, false, &state);
            assert_eq!(ids(&vm), vec!["x", "y", "z"]);
        }
    }

    #[test]
    fn status_sorts_by_wire_string() {
        let snapshot = vec![
            incident("a", "First", "alice", "2024-03-01T09:00:00Z", IncidentStatus::Open),
            incident("b", "Second", "bob", "2024-03-01T09:00:00Z", IncidentStatus::Closed),
            incident("c", "Third", "carol", "2024-03-01T09:00:00Z", IncidentStatus::InProgress),
        ];
        let state = IncidentListState {
            sort_field: Some(SORT_STATUS.into()),
            ..Default::default()
        };
        let vm = project(&snapshot, false, &state);
        // CLOSED < IN_PROGRESS < OPEN
        assert_eq!(ids(&vm), vec!["b", "c", "a"]);
    }

    #[test]
    fn unsorted_projection_keeps_snapshot_order() {
        let vm = project(&sample(), false, &IncidentListState::default());
        assert_eq!(ids(&vm), vec!["a", "b"]);
    }

    #[test]
    fn out_of_range_page_clamps_instead_of_failing() {
        let snapshot: Vec<Incident> = (0..25)
            .map(|n| {
                incident(
                    &format!("inc-{n:02}"),
                    &format!("Incident {n}"),
                    "alice",
                    "2024-03-01T09:00:00Z",
                    IncidentStatus::Open,
                )
            })
            .collect();

        let state = IncidentListState {
            page: 99,
            ..Default::default()
        };
        let vm = project(&snapshot, false, &state);
        assert_eq!(vm.page, 2);
        assert_eq!(vm.page_count, 3);
        assert!(vm.has_prev);
        assert!(!vm.has_next);
        assert_eq!(ids(&vm).len(), 5);
    }

    #[test]
    fn pagination_flags_on_a_full_first_page() {
        let snapshot: Vec<Incident> = (0..11)
            .map(|n| {
                incident(
                    &format!("inc-{n:02}"),
                    "Recurring alert",
                    "alice",
                    "2024-03-01T09:00:00Z",
                    IncidentStatus::Open,
                )
            })
            .collect();

        let vm = project(&snapshot, false, &IncidentListState::default());
        assert_eq!(vm.page, 0);
        assert!(!vm.has_prev);
        assert!(vm.has_next);
        assert_eq!(ids(&vm).len(), PAGE_SIZE);
    }
}

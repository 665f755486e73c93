//! Shared incident store: the single source of truth for the incident
//! collection.
//!
//! One instance is constructed in the app root and provided through context,
//! so every simultaneously-rendered view reads the same snapshot and no view
//! holds a private copy. The snapshot is replaced wholesale on refresh —
//! readers always observe either the fully-old or the fully-new sequence.
//!
//! Concurrent refreshes are deliberately not coalesced: each one issues its
//! own list call and the last response to arrive wins. A refresh started by
//! a view that has since unmounted still completes and applies here; the
//! store outlives any single view.

use contracts::domain::incident::Incident;
use leptos::prelude::*;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use wasm_bindgen_futures::spawn_local;

use super::api;

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Token returned by [`IncidentStore::subscribe`]; pass it back to
/// [`IncidentStore::unsubscribe`] on teardown.
#[derive(Debug)]
pub struct ObserverId(u64);

struct StoreInner {
    snapshot: RwLock<Arc<Vec<Incident>>>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer: AtomicU64,
    in_flight: AtomicUsize,
}

#[derive(Clone)]
pub struct IncidentStore {
    inner: Arc<StoreInner>,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                snapshot: RwLock::new(Arc::new(Vec::new())),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(1),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Current snapshot. Observers compare by `Arc` identity: every
    /// successful refresh yields a new reference even if the content is
    /// unchanged.
    pub fn snapshot(&self) -> Arc<Vec<Incident>> {
        self.inner.snapshot.read().expect("snapshot lock poisoned").clone()
    }

    /// Whether at least one refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Register an observer invoked synchronously on every state change
    /// (snapshot swap or loading transition).
    pub fn subscribe(&self, observer: impl Fn() + Send + Sync + 'static) -> ObserverId {
        let id = self.inner.next_observer.fetch_add(1, Ordering::SeqCst);
        self.inner
            .observers
            .lock()
            .expect("observer lock poisoned")
            .push((id, Arc::new(observer)));
        ObserverId(id)
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.inner
            .observers
            .lock()
            .expect("observer lock poisoned")
            .retain(|(observer_id, _)| *observer_id != id.0);
    }

    /// Fetch the collection and swap it in. On failure the previous snapshot
    /// stays: stale-but-valid data beats an emptied table.
    pub async fn refresh(&self) {
        self.begin_refresh();
        let fetched = api::list_incidents().await;
        self.apply_refresh(fetched);
    }

    /// Fire-and-forget variant for mount hooks and refresh buttons.
    pub fn refresh_in_background(&self) {
        let store = self.clone();
        spawn_local(async move {
            store.refresh().await;
        });
    }

    fn begin_refresh(&self) {
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        self.notify();
    }

    /// Apply the outcome of a list call. The swap happens under the write
    /// lock in one assignment, so no reader ever sees a partial sequence.
    fn apply_refresh(&self, fetched: Option<Vec<Incident>>) {
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        if let Some(incidents) = fetched {
            let mut snapshot = self.inner.snapshot.write().expect("snapshot lock poisoned");
            *snapshot = Arc::new(incidents);
        }
        self.notify();
    }

    fn notify(&self) {
        // Invoke outside the registry lock: an observer may subscribe or
        // unsubscribe reentrantly.
        let observers: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .expect("observer lock poisoned")
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer();
        }
    }
}

/// Bridge the store into Leptos signals for one component.
///
/// Subscribes on mount, unsubscribes on cleanup; the returned signals track
/// the snapshot reference and the loading flag.
pub fn use_incidents() -> (Signal<Arc<Vec<Incident>>>, Signal<bool>) {
    let store = use_context::<IncidentStore>()
        .expect("IncidentStore not provided in context (provide it in app root)");

    let (snapshot, set_snapshot) = signal(store.snapshot());
    let (loading, set_loading) = signal(store.is_loading());

    let observed = store.clone();
    let id = store.subscribe(move || {
        set_snapshot.set(observed.snapshot());
        set_loading.set(observed.is_loading());
    });

    on_cleanup(move || store.unsubscribe(id));

    (snapshot.into(), loading.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::incident::IncidentStatus;

    fn incident(id: &str, title: &str) -> Incident {
        Incident {
            id: id.into(),
            title: title.into(),
            description: "Something is broken".into(),
            status: IncidentStatus::Open,
            created_by: "alice".into(),
            updated_by: "alice".into(),
            created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
            updated_at: "2024-03-01T09:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let store = IncidentStore::new();
        store.apply_refresh(Some(vec![incident("a", "Outage")]));
        let before = store.snapshot();

        store.begin_refresh();
        store.apply_refresh(None);

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn successful_refresh_swaps_reference_even_for_equal_content() {
        let store = IncidentStore::new();
        store.apply_refresh(Some(vec![incident("a", "Outage")]));
        let before = store.snapshot();

        store.apply_refresh(Some(vec![incident("a", "Outage")]));
        let after = store.snapshot();

        assert_eq!(*before, *after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn observers_fire_on_swap_and_stop_after_unsubscribe() {
        let store = IncidentStore::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counted = hits.clone();
        let id = store.subscribe(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        store.apply_refresh(Some(vec![incident("a", "Outage")]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        store.unsubscribe(id);
        store.apply_refresh(Some(vec![incident("b", "Latency")]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observer_sees_the_complete_new_sequence() {
        let store = IncidentStore::new();
        store.apply_refresh(Some(vec![incident("a", "Outage")]));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let observed = store.clone();
        let sink = seen.clone();
        store.subscribe(move || {
            let ids: Vec<String> = observed.snapshot().iter().map(|i| i.id.clone()).collect();
            sink.lock().unwrap().push(ids);
        });

        store.apply_refresh(Some(vec![incident("b", "Latency"), incident("c", "Spike")]));

        // A notified reader observes the fully-new list, never a mix.
        assert_eq!(seen.lock().unwrap().as_slice(), &[vec!["b".to_string(), "c".to_string()]]);
    }

    #[test]
    fn loading_tracks_in_flight_refreshes() {
        let store = IncidentStore::new();
        assert!(!store.is_loading());

        store.begin_refresh();
        store.begin_refresh();
        assert!(store.is_loading());

        store.apply_refresh(None);
        assert!(store.is_loading());
        store.apply_refresh(Some(Vec::new()));
        assert!(!store.is_loading());
    }
}

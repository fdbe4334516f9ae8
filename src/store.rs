/// The document-store boundary: one write call and one standing snapshot
/// subscription over the `reviews` collection. Components only ever see full
/// snapshots; how the adapter gets them (HTTP here, in-memory in tests) is
/// its own concern.
use crate::models::review::Review;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use gloo_timers::future::sleep;
use leptos::logging::{error, log};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;

/// Full current contents of the collection, replaced wholesale on every push.
pub type Snapshot = Vec<Review>;

pub type OnSnapshot = Rc<dyn Fn(Snapshot)>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Network(String),
    #[error("store rejected the write: {0}")]
    Rejected(String),
}

pub trait ReviewStore {
    /// Creates one document in the `reviews` collection and resolves to its
    /// id. Never retried here; callers decide what a failure means.
    fn create_review(&self, review: Review) -> LocalBoxFuture<'static, Result<String, StoreError>>;

    /// Opens a standing subscription. `on_snapshot` fires once immediately
    /// with the current contents and again after every change, until the
    /// returned handle is dropped or unsubscribed.
    fn subscribe(&self, on_snapshot: OnSnapshot) -> Subscription;
}

/// Handle to a live subscription; releases the connection on unsubscribe or
/// drop so an inactive feed never leaks a connection.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: String,
}

const REVIEWS_ENDPOINT: &str = "/api/reviews";
const POLL_INTERVAL_MS: u64 = 2_000;

/// Browser-side adapter over the server's `reviews` endpoints. The snapshot
/// subscription fetches once up front and then polls, pushing a new snapshot
/// only when the contents actually changed; a failed poll is logged and the
/// next tick tries again, so recovery needs no handling upstream.
#[derive(Clone, Default)]
pub struct HttpStore;

impl HttpStore {
    pub fn new() -> Self {
        HttpStore
    }

    async fn fetch_snapshot() -> Result<Snapshot, StoreError> {
        let response = Request::get(REVIEWS_ENDPOINT)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(StoreError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }
        response
            .json::<Snapshot>()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))
    }
}

impl ReviewStore for HttpStore {
    fn create_review(&self, review: Review) -> LocalBoxFuture<'static, Result<String, StoreError>> {
        Box::pin(async move {
            let response = Request::post(REVIEWS_ENDPOINT)
                .json(&review)
                .map_err(|e| StoreError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| StoreError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(StoreError::Rejected(format!(
                    "status {}",
                    response.status()
                )));
            }
            let created = response
                .json::<CreatedResponse>()
                .await
                .map_err(|e| StoreError::Network(e.to_string()))?;
            Ok(created.id)
        })
    }

    fn subscribe(&self, on_snapshot: OnSnapshot) -> Subscription {
        let alive = Rc::new(Cell::new(true));
        let flag = alive.clone();
        spawn_local(async move {
            let mut last: Option<Snapshot> = None;
            while flag.get() {
                match Self::fetch_snapshot().await {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            last = Some(snapshot.clone());
                            on_snapshot(snapshot);
                        }
                    }
                    Err(err) => error!("[STORE] snapshot poll failed: {}", err),
                }
                sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
            log!("[STORE] reviews subscription released");
        });
        Subscription::new(move || alive.set(false))
    }
}

#[derive(Default)]
struct MemoryInner {
    reviews: Vec<Review>,
    subscribers: HashMap<usize, OnSnapshot>,
    next_subscriber: usize,
    creates: usize,
    fail_writes: bool,
}

/// In-memory store with subscriber fan-out, standing in for the remote
/// collection in tests. Mirrors the contract exactly: immediate snapshot on
/// subscribe, full snapshot to every subscriber after each create.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Makes the next create calls fail, for write-error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of create calls attempted, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.inner.borrow().creates
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.inner.borrow().reviews.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify_all(&self) {
        // collect first so callbacks can re-enter the store
        let (snapshot, subscribers): (Snapshot, Vec<OnSnapshot>) = {
            let inner = self.inner.borrow();
            (
                inner.reviews.clone(),
                inner.subscribers.values().cloned().collect(),
            )
        };
        for subscriber in subscribers {
            subscriber(snapshot.clone());
        }
    }
}

impl ReviewStore for MemoryStore {
    fn create_review(&self, review: Review) -> LocalBoxFuture<'static, Result<String, StoreError>> {
        let store = self.clone();
        Box::pin(async move {
            {
                let mut inner = store.inner.borrow_mut();
                inner.creates += 1;
                if inner.fail_writes {
                    return Err(StoreError::Rejected("write refused".into()));
                }
                inner.reviews.push(review);
            }
            store.notify_all();
            Ok(uuid::Uuid::new_v4().to_string())
        })
    }

    fn subscribe(&self, on_snapshot: OnSnapshot) -> Subscription {
        let key = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_subscriber;
            inner.next_subscriber += 1;
            inner.subscribers.insert(key, on_snapshot.clone());
            key
        };
        on_snapshot(self.inner.borrow().reviews.clone());
        let inner = self.inner.clone();
        Subscription::new(move || {
            inner.borrow_mut().subscribers.remove(&key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::Jurisdiction;
    use futures::executor::block_on;

    fn review(workplace: &str) -> Review {
        Review {
            state: Jurisdiction::VIC,
            location: "Fitzroy".into(),
            workplace_name: workplace.into(),
            job_title: "Barista".into(),
            last_year_worked: 2021,
            comment: "Busy weekends.".into(),
        }
    }

    #[test]
    fn subscribe_delivers_the_current_snapshot_immediately() {
        let store = MemoryStore::new();
        block_on(store.create_review(review("First Cafe"))).unwrap();

        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = seen.clone();
        let _sub = store.subscribe(Rc::new(move |snapshot| {
            sink.borrow_mut().push(snapshot);
        }));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].workplace_name, "First Cafe");
    }

    #[test]
    fn every_create_pushes_a_full_replacement_snapshot() {
        let store = MemoryStore::new();
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = seen.clone();
        let _sub = store.subscribe(Rc::new(move |snapshot| {
            sink.borrow_mut().push(snapshot);
        }));

        block_on(store.create_review(review("First Cafe"))).unwrap();
        block_on(store.create_review(review("Second Cafe"))).unwrap();

        let seen = seen.borrow();
        // initial empty snapshot plus one per create, each complete
        assert_eq!(seen.len(), 3);
        assert!(seen[0].is_empty());
        assert_eq!(seen[1].len(), 1);
        assert_eq!(seen[2].len(), 2);
        assert_eq!(seen[2][0].workplace_name, "First Cafe");
        assert_eq!(seen[2][1].workplace_name, "Second Cafe");
    }

    #[test]
    fn round_trip_preserves_all_six_fields() {
        let store = MemoryStore::new();
        let submitted = Review {
            state: Jurisdiction::NSW,
            location: "Sydney CBD".into(),
            workplace_name: "ABC Co".into(),
            job_title: "Engineer".into(),
            last_year_worked: 2022,
            comment: "Good team.".into(),
        };
        block_on(store.create_review(submitted.clone())).unwrap();

        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = seen.clone();
        let _sub = store.subscribe(Rc::new(move |snapshot| {
            sink.borrow_mut().push(snapshot);
        }));

        assert_eq!(seen.borrow()[0], vec![submitted]);
    }

    #[test]
    fn unsubscribe_stops_further_deliveries() {
        let store = MemoryStore::new();
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = seen.clone();
        let sub = store.subscribe(Rc::new(move |snapshot| {
            sink.borrow_mut().push(snapshot);
        }));
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        block_on(store.create_review(review("First Cafe"))).unwrap();
        assert_eq!(seen.borrow().len(), 1); // the initial snapshot only
    }

    #[test]
    fn dropping_the_handle_also_releases_the_subscription() {
        let store = MemoryStore::new();
        {
            let _sub = store.subscribe(Rc::new(|_| {}));
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn failed_writes_store_nothing_and_are_counted() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let result = block_on(store.create_review(review("First Cafe")));
        assert_eq!(result, Err(StoreError::Rejected("write refused".into())));
        assert!(store.reviews().is_empty());
        assert_eq!(store.create_calls(), 1);

        store.set_fail_writes(false);
        block_on(store.create_review(review("First Cafe"))).unwrap();
        assert_eq!(store.reviews().len(), 1);
        assert_eq!(store.create_calls(), 2);
    }
}

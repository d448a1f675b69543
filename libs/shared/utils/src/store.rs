//! Observable state stores.
//!
//! The shared pattern behind auth session, theme preference and the
//! notification list: a current value, pure mutators applied through
//! `update`, and subscribers notified synchronously after each mutation.
//! Mutators never panic for valid input; domain failures travel in the
//! returned value.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use shared_storage::ClientStore;

pub type SubscriberId = u64;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub struct Store<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<(SubscriberId, Callback<T>)>>,
    next_id: Mutex<SubscriberId>,
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            subscribers: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn get(&self) -> T {
        self.value.lock().expect("store lock poisoned").clone()
    }

    /// Apply a mutator and notify subscribers synchronously with the new value.
    /// Callbacks run without any store lock held, so a subscriber may call back
    /// into the store without deadlocking.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut value = self.value.lock().expect("store lock poisoned");
            let result = mutate(&mut value);
            (result, value.clone())
        };
        self.notify(&snapshot);
        result
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        let mut next_id = self.next_id.lock().expect("store lock poisoned");
        let id = *next_id;
        *next_id += 1;
        self.subscribers
            .lock()
            .expect("store lock poisoned")
            .push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers
            .lock()
            .expect("store lock poisoned")
            .retain(|(sub_id, _)| *sub_id != id);
    }

    fn notify(&self, snapshot: &T) {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .expect("store lock poisoned")
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

/// A `Store` whose value survives restarts through a named `ClientStore` blob.
/// Loads the persisted value at open and writes after every mutation.
pub struct PersistedStore<T> {
    store: Store<T>,
    client: ClientStore,
    name: String,
}

impl<T> PersistedStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn open(client: ClientStore, name: &str, default: T) -> Self {
        let initial = match client.get::<T>(name) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                warn!("Failed to load persisted store {}: {}", name, err);
                default
            }
        };
        Self {
            store: Store::new(initial),
            client,
            name: name.to_string(),
        }
    }

    pub fn get(&self) -> T {
        self.store.get()
    }

    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let result = self.store.update(mutate);
        if let Err(err) = self.client.put(&self.name, &self.store.get()) {
            // Persistence is best-effort; the in-memory value stays authoritative.
            warn!("Failed to persist store {}: {}", self.name, err);
        }
        result
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.store.unsubscribe(id)
    }
}

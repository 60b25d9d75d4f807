use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{AppState, ReadinessState};

use super::{events::DomainEvent, reducer::reduce};

/// One applied mutation, as seen by subscribers.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub event: DomainEvent,
    pub before: ReadinessState,
    pub after: ReadinessState,
}

impl StoreChange {
    pub fn is_transition(&self) -> bool {
        self.before != self.after
    }
}

#[derive(Clone, Default)]
pub struct AppStore {
    inner: Arc<Mutex<AppState>>,
    subscribers: Arc<Mutex<Vec<mpsc::Sender<StoreChange>>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
            subscribers: Arc::default(),
        }
    }

    pub fn state(&self) -> AppState {
        lock(&self.inner).clone()
    }

    pub fn readiness(&self) -> ReadinessState {
        lock(&self.inner).readiness
    }

    /// Applies `ev` as a single step and notifies subscribers in order.
    pub fn apply(&self, ev: DomainEvent) {
        let mut guard = lock(&self.inner);
        let before = guard.readiness;
        let next = reduce(guard.clone(), ev.clone());
        let after = next.readiness;
        *guard = next;

        let change = StoreChange {
            event: ev,
            before,
            after,
        };
        lock(&self.subscribers).retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn subscribe(&self) -> mpsc::Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        lock(&self.subscribers).push(tx);
        rx
    }
}

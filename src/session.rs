use moka::future::Cache;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::picker::CoordinatePairState;

pub type SharedState = Arc<Mutex<CoordinatePairState>>;

/// Editing sessions keyed by id. Sessions expire after sitting idle and the
/// least recently used ones are evicted past `capacity`.
///
/// Each session sits behind its own async mutex, so requests against one
/// session are applied one at a time.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SharedState>,
}

impl SessionStore {
    pub fn new(capacity: u64, idle: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(idle)
                .build(),
        }
    }

    fn new_id() -> String {
        format!("{:016x}", rand::random::<u64>())
    }

    #[instrument(skip_all)]
    pub async fn create(&self) -> (String, SharedState) {
        let mut id = Self::new_id();
        while self.sessions.contains_key(&id) {
            id = Self::new_id();
        }
        let state = Arc::new(Mutex::new(CoordinatePairState::new()));
        self.sessions.insert(id.clone(), state.clone()).await;
        debug!("Created session {}", id);
        (id, state)
    }

    pub async fn get(&self, id: &str) -> Option<SharedState> {
        self.sessions.get(id).await
    }

    /// Ends a session. Returns false if it did not exist or already expired.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).await.is_some();
        if removed {
            debug!("Removed session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Selecting;

    fn store() -> SessionStore {
        SessionStore::new(16, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        let (id, state) = store.create().await;
        assert_eq!(id.len(), 16);

        state.lock().await.set_point(1.0, 2.0).unwrap();

        let fetched = store.get(&id).await.unwrap();
        let fetched = fetched.lock().await;
        assert_eq!(fetched.selecting(), Selecting::Drop);
        assert_eq!(fetched.pickup_point().unwrap().lat(), 1.0);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = store();
        let (first, _) = store.create().await;
        let (second, _) = store.create().await;
        assert_ne!(first, second);

        store.get(&first).await.unwrap().lock().await.set_point(1.0, 2.0).unwrap();

        let other = store.get(&second).await.unwrap();
        assert_eq!(*other.lock().await, CoordinatePairState::new());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store();
        let (id, _) = store.create().await;

        assert!(store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(!store.remove(&id).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        assert!(store().get("0000000000000000").await.is_none());
    }
}

//! Cache of authenticated uids.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Identifies one set of ERP credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub url: String,
    pub database: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy)]
struct CachedSession {
    uid: i64,
    obtained_at: Instant,
}

/// Time-limited uid cache shared by every request of a client.
///
/// A zero TTL disables caching entirely.
#[derive(Debug)]
pub struct SessionCache {
    ttl: Duration,
    entries: Mutex<HashMap<SessionKey, CachedSession>>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Return a live uid, evicting the entry if it has expired.
    pub async fn get(&self, key: &SessionKey) -> Option<i64> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(session) if session.obtained_at.elapsed() < self.ttl => Some(session.uid),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: SessionKey, uid: i64) {
        if !self.is_enabled() {
            return;
        }

        self.entries.lock().await.insert(
            key,
            CachedSession {
                uid,
                obtained_at: Instant::now(),
            },
        );
    }

    pub async fn invalidate(&self, key: &SessionKey) {
        self.entries.lock().await.remove(key);
    }
}

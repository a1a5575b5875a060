use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::net::{CacheKey, Response};

/// Limits applied to a single named cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expiration {
    pub max_entries: Option<usize>,
    pub max_age: Option<chrono::Duration>,
}

#[derive(Debug, Clone)]
struct Entry {
    response: Response,
    stored_at: DateTime<Utc>,
    sequence: u64,
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<CacheKey, Entry>,
    next_sequence: u64,
}

/// One named cache: an atomic key-value store of responses.
#[derive(Debug)]
pub struct Cache {
    name: String,
    expiration: Expiration,
    entries: RwLock<Entries>,
}

impl Cache {
    fn new(name: String, expiration: Expiration) -> Self {
        Self {
            name,
            expiration,
            entries: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Stores a copy of the response, replacing any previous entry for the key.
    pub async fn put(&self, key: CacheKey, response: Response) {
        let mut entries = self.entries.write().await;
        Self::insert(&mut entries, key, response);
        self.evict(&mut entries);
    }

    /// Stores every pair or none: the write happens under one lock.
    pub async fn put_all(&self, items: Vec<(CacheKey, Response)>) {
        let mut entries = self.entries.write().await;
        for (key, response) in items {
            Self::insert(&mut entries, key, response);
        }
        self.evict(&mut entries);
    }

    pub async fn get(&self, key: &CacheKey) -> Option<Response> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            let entry = entries.map.get(key)?;
            if !self.is_expired(entry, now) {
                return Some(entry.response.clone());
            }
        }
        debug!("Entry {key} in {} expired", self.name);
        self.entries.write().await.map.remove(key);
        None
    }

    pub async fn delete(&self, key: &CacheKey) -> bool {
        self.entries.write().await.map.remove(key).is_some()
    }

    /// Keys in insertion order.
    pub async fn keys(&self) -> Vec<CacheKey> {
        let entries = self.entries.read().await;
        let mut keys: Vec<_> = entries
            .map
            .iter()
            .map(|(key, entry)| (entry.sequence, key.clone()))
            .collect();
        keys.sort_unstable_by_key(|(sequence, _)| *sequence);
        keys.into_iter().map(|(_, key)| key).collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn insert(entries: &mut Entries, key: CacheKey, response: Response) {
        let sequence = entries.next_sequence;
        entries.next_sequence += 1;
        entries.map.insert(
            key,
            Entry {
                response,
                stored_at: Utc::now(),
                sequence,
            },
        );
    }

    fn evict(&self, entries: &mut Entries) {
        let Some(max_entries) = self.expiration.max_entries else {
            return;
        };
        while entries.map.len() > max_entries {
            let oldest = entries
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.sequence)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    debug!("Evicting {key} from {}", self.name);
                    entries.map.remove(&key);
                }
                None => break,
            }
        }
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        self.expiration
            .max_age
            .is_some_and(|max_age| now - entry.stored_at >= max_age)
    }
}

/// Every named cache belonging to one origin, shared across worker versions.
#[derive(Debug, Default)]
pub struct CacheStorage {
    caches: RwLock<Vec<Arc<Cache>>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn open(&self, name: &str) -> Arc<Cache> {
        self.open_with(name, Expiration::default()).await
    }

    /// Opens the named cache, creating it with the given limits when absent.
    /// Limits of an existing cache are kept.
    pub async fn open_with(&self, name: &str, expiration: Expiration) -> Arc<Cache> {
        if let Some(cache) = self.get(name).await {
            return cache;
        }
        let mut caches = self.caches.write().await;
        if let Some(cache) = caches.iter().find(|cache| cache.name == name) {
            return cache.clone();
        }
        let cache = Arc::new(Cache::new(name.to_string(), expiration));
        caches.push(cache.clone());
        cache
    }

    pub async fn get(&self, name: &str) -> Option<Arc<Cache>> {
        self.caches
            .read()
            .await
            .iter()
            .find(|cache| cache.name == name)
            .cloned()
    }

    pub async fn has(&self, name: &str) -> bool {
        self.get(name).await.is_some()
    }

    pub async fn delete(&self, name: &str) -> bool {
        let mut caches = self.caches.write().await;
        let before = caches.len();
        caches.retain(|cache| cache.name != name);
        caches.len() != before
    }

    /// Cache names in creation order.
    pub async fn keys(&self) -> Vec<String> {
        self.caches
            .read()
            .await
            .iter()
            .map(|cache| cache.name.clone())
            .collect()
    }

    /// First hit across every cache, searched in creation order.
    pub async fn match_any(&self, key: &CacheKey) -> Option<Response> {
        let caches: Vec<Arc<Cache>> = self.caches.read().await.clone();
        for cache in caches {
            if let Some(response) = cache.get(key).await {
                return Some(response);
            }
        }
        None
    }
}

#[cfg(test)]
fn response(body: &str) -> Response {
    Response::ok(
        reqwest::Url::parse("https://campus.test/app").unwrap(),
        body,
    )
}

#[tokio::test]
async fn put_replaces_existing_entry() {
    let storage = CacheStorage::new();
    let cache = storage.open("dynamic").await;
    let key = crate::net::Request::parse("https://campus.test/app").unwrap().cache_key();
    cache.put(key.clone(), response("old")).await;
    cache.put(key.clone(), response("new")).await;
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get(&key).await.unwrap().text(), "new");
}

#[tokio::test]
async fn max_entries_evicts_oldest() {
    let storage = CacheStorage::new();
    let expiration = Expiration {
        max_entries: Some(2),
        max_age: None,
    };
    let cache = storage.open_with("dynamic", expiration).await;
    let keys: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|path| {
            crate::net::Request::parse(&format!("https://campus.test/app/{path}"))
                .unwrap()
                .cache_key()
        })
        .collect();
    for key in keys.iter() {
        cache.put(key.clone(), response("body")).await;
    }
    assert_eq!(cache.keys().await, vec![keys[1].clone(), keys[2].clone()]);
}

#[tokio::test]
async fn max_age_hides_stale_entries() {
    let storage = CacheStorage::new();
    let expiration = Expiration {
        max_entries: None,
        max_age: Some(chrono::Duration::zero()),
    };
    let cache = storage.open_with("dynamic", expiration).await;
    let key = crate::net::Request::parse("https://campus.test/app").unwrap().cache_key();
    cache.put(key.clone(), response("body")).await;
    assert!(cache.get(&key).await.is_none());
    assert!(cache.is_empty().await);
}

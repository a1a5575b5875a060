mod manifest;
mod policy;
mod registration;
mod storage;

pub use manifest::*;
pub use policy::*;
pub use registration::*;
pub use storage::*;

use async_trait::async_trait;
use std::{sync::Arc, time::Instant};
use thiserror::Error;
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinSet,
};
use tracing::{debug, info, warn};

use crate::{
    config::CacheConfig,
    net::{self, Fetcher, Request, Response},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid cache pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Invalid precache path {0}")]
    InvalidPrecachePath(String),
    #[error("Failed to precache {url}: {reason}")]
    Install { url: String, reason: String },
    #[error("Worker must be installed before it can activate")]
    NotInstalled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkerState {
    #[default]
    Parsed,
    Installed,
    Activated,
    /// Install failed or a newer version took over.
    Redundant,
}

/// The offline cache layer for one cache generation. Sits in front of the
/// network and serves each request according to its [`Strategy`].
pub struct OfflineCache<F> {
    config: CacheConfig,
    policy: Policy,
    storage: Arc<CacheStorage>,
    network: Arc<F>,
    state: RwLock<WorkerState>,
    revalidations: Mutex<JoinSet<()>>,
}

impl<F> OfflineCache<F>
where
    F: Fetcher + 'static,
{
    pub fn new(
        config: CacheConfig,
        storage: Arc<CacheStorage>,
        network: Arc<F>,
    ) -> Result<Self, self::Error> {
        let policy = Policy::new(&config)?;
        Ok(Self {
            config,
            policy,
            storage,
            network,
            state: Default::default(),
            revalidations: Default::default(),
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn storage(&self) -> &Arc<CacheStorage> {
        &self.storage
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    /// Pre-populates the static cache. Every precache entry must come back ok,
    /// otherwise nothing is written and the worker becomes redundant.
    pub async fn install(&self) -> Result<(), self::Error> {
        info!("Installing offline cache {}", self.config.version);
        let now = Instant::now();
        match self.precache().await {
            Ok(items) => {
                let cache = self.storage.open(&self.config.static_cache_name()).await;
                cache.put_all(items).await;
                *self.state.write().await = WorkerState::Installed;
                debug!("Installing took {:?}", now.elapsed());
                Ok(())
            }
            Err(err) => {
                warn!("Install of {} failed: {err}", self.config.version);
                *self.state.write().await = WorkerState::Redundant;
                Err(err)
            }
        }
    }

    async fn precache(&self) -> Result<Vec<(net::CacheKey, Response)>, self::Error> {
        let mut items = Vec::with_capacity(self.config.precache.len());
        for path in self.config.precache.iter() {
            let request = self.resolve(path)?;
            let response =
                self.network
                    .fetch(&request)
                    .await
                    .map_err(|err| Error::Install {
                        url: request.url.to_string(),
                        reason: err.to_string(),
                    })?;
            if !response.is_ok() {
                return Err(Error::Install {
                    url: request.url.to_string(),
                    reason: format!("status {}", response.status),
                });
            }
            items.push((request.cache_key(), response));
        }
        Ok(items)
    }

    /// Deletes every cache that is not this generation's static or dynamic
    /// cache. Returns the deleted names.
    pub async fn activate(&self) -> Result<Vec<String>, self::Error> {
        if self.state().await != WorkerState::Installed {
            return Err(Error::NotInstalled);
        }
        let keep = [
            self.config.static_cache_name(),
            self.config.dynamic_cache_name(),
        ];
        let mut deleted = Vec::new();
        for name in self.storage.keys().await {
            if !keep.contains(&name) {
                info!("Deleting old cache {name}");
                self.storage.delete(&name).await;
                deleted.push(name);
            }
        }
        *self.state.write().await = WorkerState::Activated;
        Ok(deleted)
    }

    pub(crate) async fn retire(&self) {
        *self.state.write().await = WorkerState::Redundant;
    }

    /// Serves one request. Until activated every request goes to the network.
    pub async fn handle(&self, request: &Request) -> Result<Response, net::Error> {
        if self.state().await != WorkerState::Activated {
            return self.network.fetch(request).await;
        }
        match self.policy.classify(request) {
            Some(Strategy::NetworkFirst) => self.network_first(request).await,
            Some(Strategy::CacheFirst) => self.cache_first(request).await,
            Some(Strategy::StaleWhileRevalidate) => self.stale_while_revalidate(request).await,
            None => self.network.fetch(request).await,
        }
    }

    pub async fn network_first(&self, request: &Request) -> Result<Response, net::Error> {
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    self.store(request, &response).await;
                }
                Ok(response)
            }
            Err(err) => {
                debug!("Network failed, trying cache: {}", request.url);
                if let Some(cached) = self.storage.match_any(&request.cache_key()).await {
                    return Ok(cached);
                }
                if request.is_navigation() {
                    let shell = self
                        .resolve(&self.config.shell_path)
                        .map_err(|_| err.clone())?;
                    if let Some(cached) = self.storage.match_any(&shell.cache_key()).await {
                        return Ok(cached);
                    }
                }
                Err(err)
            }
        }
    }

    pub async fn cache_first(&self, request: &Request) -> Result<Response, net::Error> {
        if let Some(cached) = self.storage.match_any(&request.cache_key()).await {
            return Ok(cached);
        }
        let response = self.network.fetch(request).await.map_err(|err| {
            debug!("Cache and network failed for {}", request.url);
            err
        })?;
        if response.is_ok() {
            self.store(request, &response).await;
        }
        Ok(response)
    }

    /// Returns the cached copy without waiting on the network when one
    /// exists; the refresh runs in the background and its failure is dropped.
    pub async fn stale_while_revalidate(
        &self,
        request: &Request,
    ) -> Result<Response, net::Error> {
        let cache = {
            let state = self.state.read().await;
            if *state != WorkerState::Activated {
                return self.network.fetch(request).await;
            }
            self.dynamic_cache().await
        };
        let cached = cache.get(&request.cache_key()).await;

        let network = self.network.clone();
        let owned = request.clone();
        let revalidate = async move {
            let response = network.fetch(&owned).await?;
            if response.is_ok() {
                cache.put(owned.cache_key(), response.clone()).await;
            }
            Ok::<_, net::Error>(response)
        };

        match cached {
            Some(cached) => {
                let url = request.url.clone();
                let mut revalidations = self.revalidations.lock().await;
                while revalidations.try_join_next().is_some() {}
                revalidations.spawn(async move {
                    if let Err(err) = revalidate.await {
                        debug!("Background refresh of {url} failed: {err}");
                    }
                });
                Ok(cached)
            }
            None => revalidate.await,
        }
    }

    /// Waits for every background refresh started so far.
    pub async fn settle(&self) {
        let mut pending = std::mem::take(&mut *self.revalidations.lock().await);
        while pending.join_next().await.is_some() {}
    }

    /// Writes to the dynamic cache while this generation is active. The state
    /// lock is held across the write so a retired generation never recreates
    /// a cache its successor deleted.
    async fn store(&self, request: &Request, response: &Response) {
        let state = self.state.read().await;
        if *state != WorkerState::Activated {
            debug!("Not caching {} from retired cache {}", request.url, self.config.version);
            return;
        }
        self.dynamic_cache()
            .await
            .put(request.cache_key(), response.clone())
            .await;
    }

    async fn dynamic_cache(&self) -> Arc<Cache> {
        let expiration = Expiration {
            max_entries: self.config.max_entries,
            max_age: self.config.max_age,
        };
        self.storage
            .open_with(&self.config.dynamic_cache_name(), expiration)
            .await
    }

    fn resolve(&self, path: &str) -> Result<Request, self::Error> {
        let url = self
            .config
            .origin
            .join(path)
            .map_err(|_| Error::InvalidPrecachePath(path.to_string()))?;
        Ok(Request::get(url))
    }
}

#[async_trait]
impl<F> Fetcher for OfflineCache<F>
where
    F: Fetcher + 'static,
{
    async fn fetch(&self, request: &Request) -> Result<Response, net::Error> {
        self.handle(request).await
    }
}

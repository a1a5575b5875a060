use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    net::{self, Fetcher, Request, Response},
    offline::{self, OfflineCache},
};

/// Tracks the active cache generation for an origin. A new generation only
/// takes over once it installed cleanly; until then the previous one serves.
pub struct Registration<F> {
    network: Arc<F>,
    active: RwLock<Option<Arc<OfflineCache<F>>>>,
}

impl<F> Registration<F>
where
    F: Fetcher + 'static,
{
    pub fn new(network: Arc<F>) -> Self {
        Self {
            network,
            active: RwLock::new(None),
        }
    }

    pub async fn active(&self) -> Option<Arc<OfflineCache<F>>> {
        self.active.read().await.clone()
    }

    /// Installs `worker`, claims every client by making it the active
    /// generation, then activates it once the previous one is retired.
    /// On install failure the current one stays.
    pub async fn update(
        &self,
        worker: OfflineCache<F>,
    ) -> Result<Arc<OfflineCache<F>>, offline::Error> {
        worker.install().await?;
        let worker = Arc::new(worker);
        let previous = self.active.write().await.replace(worker.clone());
        if let Some(previous) = previous {
            previous.settle().await;
            previous.retire().await;
        }
        worker.activate().await?;
        info!("Offline cache {} is active", worker.config().version);
        Ok(worker)
    }
}

#[async_trait]
impl<F> Fetcher for Registration<F>
where
    F: Fetcher + 'static,
{
    async fn fetch(&self, request: &Request) -> Result<Response, net::Error> {
        match self.active().await {
            Some(worker) => worker.handle(request).await,
            None => self.network.fetch(request).await,
        }
    }
}

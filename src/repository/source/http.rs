use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    net::{Fetcher, Request},
    repository::{
        self,
        source::{BuildingRecord, ContactRecord, DataProvider, LocationRecord, OfficeRecord},
    },
};

/// Fetches the buildings listing from a backend as a JSON array of location
/// records. The directory lists the backend does not serve come from
/// `fallback`.
pub struct HttpProvider<F, P> {
    fetcher: Arc<F>,
    listing_url: Url,
    fallback: P,
}

impl<F, P> HttpProvider<F, P>
where
    F: Fetcher,
    P: DataProvider,
{
    pub fn new(fetcher: Arc<F>, listing_url: Url, fallback: P) -> Self {
        Self {
            fetcher,
            listing_url,
            fallback,
        }
    }
}

#[async_trait]
impl<F, P> DataProvider for HttpProvider<F, P>
where
    F: Fetcher,
    P: DataProvider,
{
    async fn list_locations(&self) -> Result<Vec<LocationRecord>, repository::Error> {
        let request = Request::get(self.listing_url.clone());
        let response = self.fetcher.fetch(&request).await?;
        if !response.is_ok() {
            warn!("Buildings listing answered {}", response.status);
            return Err(repository::Error::Status {
                url: self.listing_url.to_string(),
                status: response.status,
            });
        }
        let records: Vec<LocationRecord> = serde_json::from_slice(&response.body)?;
        debug!("Fetched {} locations from {}", records.len(), self.listing_url);
        Ok(records)
    }

    async fn list_buildings(&self) -> Result<Vec<BuildingRecord>, repository::Error> {
        self.fallback.list_buildings().await
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, repository::Error> {
        self.fallback.list_contacts().await
    }

    async fn list_offices(&self) -> Result<Vec<OfficeRecord>, repository::Error> {
        self.fallback.list_offices().await
    }
}

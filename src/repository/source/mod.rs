mod bundle;
mod fixtures;
mod http;
mod records;

pub use bundle::*;
pub use fixtures::*;
pub use http::*;
pub use records::*;

use async_trait::async_trait;

use crate::repository;

/// Where the directory data comes from. The rest of the app only sees this
/// trait, so swapping mock data for a live backend needs no other change.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>, repository::Error>;
    async fn list_buildings(&self) -> Result<Vec<BuildingRecord>, repository::Error>;
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, repository::Error>;
    async fn list_offices(&self) -> Result<Vec<OfficeRecord>, repository::Error>;
}

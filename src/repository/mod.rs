mod models;
pub mod source;

pub use models::*;

use std::{collections::HashMap, io, sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    net,
    repository::source::DataProvider,
    shared::{self, Coordinate, Searchable, contains_ignore_case},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Network(#[from] net::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },
    #[error("Location {0} has an invalid coordinate")]
    InvalidCoordinate(String),
}

type IdToIndex = HashMap<Arc<str>, u32>;

/// In-memory campus directory. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub locations: Box<[Location]>,
    pub buildings: Box<[Building]>,
    pub contacts: Box<[Contact]>,
    pub offices: Box<[Office]>,

    location_lookup: IdToIndex,
    building_lookup: IdToIndex,
    contact_lookup: IdToIndex,
    office_lookup: IdToIndex,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Pulls every list from the provider and indexes it.
    pub async fn load<P>(mut self, provider: &P) -> Result<Self, self::Error>
    where
        P: DataProvider + ?Sized,
    {
        let now = Instant::now();
        self.load_locations(provider).await?;
        self.load_buildings(provider).await?;
        self.load_contacts(provider).await?;
        self.load_offices(provider).await?;
        info!(
            "Loaded {} locations, {} buildings, {} contacts and {} offices in {:?}",
            self.locations.len(),
            self.buildings.len(),
            self.contacts.len(),
            self.offices.len(),
            now.elapsed()
        );
        Ok(self)
    }

    async fn load_locations<P>(&mut self, provider: &P) -> Result<(), self::Error>
    where
        P: DataProvider + ?Sized,
    {
        debug!("Loading locations...");
        let records = provider.list_locations().await?;
        let locations: Vec<Location> = records.into_iter().map(Location::from).collect();
        if let Some(location) = locations.iter().find(|l| !l.coordinate.is_finite()) {
            return Err(Error::InvalidCoordinate(location.id.to_string()));
        }
        let (locations, lookup) = index("location", locations, |l, i| l.index = i)?;
        self.locations = locations;
        self.location_lookup = lookup;
        Ok(())
    }

    async fn load_buildings<P>(&mut self, provider: &P) -> Result<(), self::Error>
    where
        P: DataProvider + ?Sized,
    {
        debug!("Loading buildings...");
        let records = provider.list_buildings().await?;
        let buildings: Vec<Building> = records.into_iter().map(Building::from).collect();
        let (buildings, lookup) = index("building", buildings, |b, i| b.index = i)?;
        self.buildings = buildings;
        self.building_lookup = lookup;
        Ok(())
    }

    async fn load_contacts<P>(&mut self, provider: &P) -> Result<(), self::Error>
    where
        P: DataProvider + ?Sized,
    {
        debug!("Loading contacts...");
        let records = provider.list_contacts().await?;
        let contacts: Vec<Contact> = records.into_iter().map(Contact::from).collect();
        let (contacts, lookup) = index("contact", contacts, |c, i| c.index = i)?;
        self.contacts = contacts;
        self.contact_lookup = lookup;
        Ok(())
    }

    async fn load_offices<P>(&mut self, provider: &P) -> Result<(), self::Error>
    where
        P: DataProvider + ?Sized,
    {
        debug!("Loading offices...");
        let records = provider.list_offices().await?;
        let offices: Vec<Office> = records.into_iter().map(Office::from).collect();
        let (offices, lookup) = index("office", offices, |o, i| o.index = i)?;
        self.offices = offices;
        self.office_lookup = lookup;
        Ok(())
    }

    pub fn location_by_id(&self, id: &str) -> Option<&Location> {
        let index = self.location_lookup.get(id)?;
        self.locations.get(*index as usize)
    }

    pub fn building_by_id(&self, id: &str) -> Option<&Building> {
        let index = self.building_lookup.get(id)?;
        self.buildings.get(*index as usize)
    }

    pub fn contact_by_id(&self, id: &str) -> Option<&Contact> {
        let index = self.contact_lookup.get(id)?;
        self.contacts.get(*index as usize)
    }

    pub fn office_by_id(&self, id: &str) -> Option<&Office> {
        let index = self.office_lookup.get(id)?;
        self.offices.get(*index as usize)
    }

    pub fn locations_by_kind(&self, kind: LocationKind) -> Vec<&Location> {
        self.locations.iter().filter(|l| l.kind == kind).collect()
    }

    /// Ranked fuzzy search over location names and addresses.
    pub fn search_locations(&self, query: &str) -> Vec<&Location> {
        shared::search(query, &self.locations)
    }

    pub fn nearest_location(&self, coordinate: &Coordinate) -> Option<&Location> {
        self.locations.iter().min_by(|a, b| {
            let da = a.coordinate.haversine_distance(coordinate);
            let db = b.coordinate.haversine_distance(coordinate);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn filter_buildings(&self, query: &str) -> Vec<&Building> {
        self.buildings
            .iter()
            .filter(|b| {
                contains_ignore_case(&b.name, query) || contains_ignore_case(&b.description, query)
            })
            .collect()
    }

    /// Name and title match case-insensitively, phone numbers verbatim.
    pub fn filter_contacts(&self, query: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| {
                contains_ignore_case(&c.name, query)
                    || contains_ignore_case(&c.title, query)
                    || c.phone.contains(query)
            })
            .collect()
    }

    pub fn filter_offices(&self, query: &str) -> Vec<&Office> {
        self.offices
            .iter()
            .filter(|o| {
                contains_ignore_case(&o.office_number, query)
                    || contains_ignore_case(&o.lecturer, query)
                    || contains_ignore_case(&o.department, query)
            })
            .collect()
    }
}

fn index<T, S>(
    entity: &'static str,
    mut items: Vec<T>,
    set_index: S,
) -> Result<(Box<[T]>, IdToIndex), self::Error>
where
    T: Searchable,
    S: Fn(&mut T, u32),
{
    let mut lookup: IdToIndex = HashMap::with_capacity(items.len());
    for (i, item) in items.iter_mut().enumerate() {
        set_index(item, i as u32);
        if lookup.insert(item.id().into(), i as u32).is_some() {
            return Err(Error::DuplicateId {
                entity,
                id: item.id().to_string(),
            });
        }
    }
    Ok((items.into(), lookup))
}

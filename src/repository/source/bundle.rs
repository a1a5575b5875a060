use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::debug;
use zip::ZipArchive;

use crate::repository::{
    self,
    source::{BuildingRecord, ContactRecord, DataProvider, LocationRecord, OfficeRecord},
};

pub struct BundleConfig {
    pub locations_file_name: String,
    pub buildings_file_name: String,
    pub contacts_file_name: String,
    pub offices_file_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            locations_file_name: "locations.csv".into(),
            buildings_file_name: "buildings.csv".into(),
            contacts_file_name: "contacts.csv".into(),
            offices_file_name: "offices.csv".into(),
        }
    }
}

/// A zip archive of CSV files describing the campus directory.
/// A file missing from the archive reads as an empty list.
pub struct Bundle {
    path: PathBuf,
    config: BundleConfig,
}

impl Bundle {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: Default::default(),
        }
    }

    pub fn with_config(mut self, config: BundleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, repository::Error> {
        let now = Instant::now();
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(file)?;
        let Some(index) = archive.index_for_name(file_name) else {
            debug!("{file_name} not present in {}", self.path.display());
            return Ok(Vec::new());
        };
        let entry = archive.by_index(index)?;
        let records = parse_csv(entry)?;
        debug!(
            "Reading {} rows from {file_name} took {:?}",
            records.len(),
            now.elapsed()
        );
        Ok(records)
    }
}

/// Every row must parse; one bad row fails the whole file.
pub fn parse_csv<R, T>(reader: R) -> Result<Vec<T>, repository::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut buf = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(buf)
}

#[async_trait]
impl DataProvider for Bundle {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>, repository::Error> {
        self.read(&self.config.locations_file_name)
    }

    async fn list_buildings(&self) -> Result<Vec<BuildingRecord>, repository::Error> {
        self.read(&self.config.buildings_file_name)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, repository::Error> {
        self.read(&self.config.contacts_file_name)
    }

    async fn list_offices(&self) -> Result<Vec<OfficeRecord>, repository::Error> {
        self.read(&self.config.offices_file_name)
    }
}

#[test]
fn parse_locations_csv() {
    let csv = "id,name,address,lat,lng,type\n\
               lib,Ferdinand Postma Library,Potchefstroom,-26.69,27.095,library\n";
    let records: Vec<LocationRecord> = parse_csv(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, repository::LocationKind::Library);
}

#[test]
fn unknown_location_type_is_rejected() {
    let csv = "id,name,address,lat,lng,type\nx,Somewhere,Nowhere,0,0,castle\n";
    let records: Result<Vec<LocationRecord>, _> = parse_csv(csv.as_bytes());
    assert!(records.is_err());
}

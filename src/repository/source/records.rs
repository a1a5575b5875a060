use serde::{Deserialize, Serialize};

use crate::{
    repository::{Building, Contact, Location, LocationKind, Office},
    shared::Coordinate,
};

/// Location as it arrives from the buildings listing or a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: LocationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub phone: String,
    #[serde(default, alias = "isEmergency")]
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeRecord {
    pub id: String,
    #[serde(alias = "officeNumber")]
    pub office_number: String,
    pub lecturer: String,
    pub department: String,
}

impl From<LocationRecord> for Location {
    fn from(value: LocationRecord) -> Self {
        Self {
            index: u32::MAX,
            id: value.id.into(),
            name: value.name.into(),
            address: value.address.into(),
            coordinate: Coordinate::new(value.lat, value.lng),
            kind: value.kind,
        }
    }
}

impl From<BuildingRecord> for Building {
    fn from(value: BuildingRecord) -> Self {
        Self {
            index: u32::MAX,
            id: value.id.into(),
            name: value.name.into(),
            description: value.description.into(),
            image: value.image.into(),
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(value: ContactRecord) -> Self {
        Self {
            index: u32::MAX,
            id: value.id.into(),
            name: value.name.into(),
            title: value.title.into(),
            phone: value.phone.into(),
            emergency: value.emergency,
        }
    }
}

impl From<OfficeRecord> for Office {
    fn from(value: OfficeRecord) -> Self {
        Self {
            index: u32::MAX,
            id: value.id.into(),
            office_number: value.office_number.into(),
            lecturer: value.lecturer.into(),
            department: value.department.into(),
        }
    }
}

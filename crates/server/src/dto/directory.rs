use campuscompass::{
    app::ContactDirectory,
    prelude::*,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LocationDto {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub coordinate: Coordinate,
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.to_string(),
            address: location.address.to_string(),
            kind: location.kind,
            coordinate: location.coordinate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
}

impl From<&Building> for BuildingDto {
    fn from(building: &Building) -> Self {
        Self {
            id: building.id.to_string(),
            name: building.name.to_string(),
            description: building.description.to_string(),
            image: building.image.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDto {
    pub id: String,
    pub name: String,
    pub title: String,
    pub phone: String,
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.to_string(),
            title: contact.title.to_string(),
            phone: contact.phone.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDirectoryDto {
    pub emergency: Vec<ContactDto>,
    pub contacts: Vec<ContactDto>,
}

impl From<ContactDirectory<'_>> for ContactDirectoryDto {
    fn from(directory: ContactDirectory<'_>) -> Self {
        Self {
            emergency: directory.emergency.into_iter().map(ContactDto::from).collect(),
            contacts: directory.regular.into_iter().map(ContactDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OfficeDto {
    pub id: String,
    pub office_number: String,
    pub lecturer: String,
    pub department: String,
}

impl From<&Office> for OfficeDto {
    fn from(office: &Office) -> Self {
        Self {
            id: office.id.to_string(),
            office_number: office.office_number.to_string(),
            lecturer: office.lecturer.to_string(),
            department: office.department.to_string(),
        }
    }
}

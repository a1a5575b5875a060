use async_trait::async_trait;

use crate::repository::{
    self, LocationKind,
    source::{BuildingRecord, ContactRecord, DataProvider, LocationRecord, OfficeRecord},
};

const CAMPUS_ADDRESS: &str = "North West University, Potchefstroom";

/// Building types used by the campus survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingType {
    Academic,
    Residence,
    Administration,
    Dining,
    Sports,
    Library,
    Parking,
}

impl BuildingType {
    pub const fn location_kind(&self) -> LocationKind {
        match self {
            Self::Academic | Self::Administration | Self::Parking => LocationKind::Landmark,
            Self::Residence => LocationKind::Residential,
            Self::Dining => LocationKind::Restaurant,
            Self::Sports => LocationKind::Recreational,
            Self::Library => LocationKind::Library,
        }
    }
}

const CAMPUS_BUILDINGS: [(&str, &str, f64, f64, BuildingType); 12] = [
    ("building-a1", "Faculty of Engineering", -26.6850, 27.0920, BuildingType::Academic),
    ("building-a2", "Faculty of Natural and Agricultural Sciences", -26.6880, 27.0950, BuildingType::Academic),
    ("building-lib1", "Ferdinand Postma Library", -26.6900, 27.0950, BuildingType::Library),
    ("building-admin1", "Administration Building", -26.6890, 27.0980, BuildingType::Administration),
    ("building-sport1", "Sports Complex", -26.6800, 27.0970, BuildingType::Sports),
    ("res-1", "Vergeet-My-Nie", -26.6920, 27.0900, BuildingType::Residence),
    ("res-2", "Heimat", -26.6940, 27.0930, BuildingType::Residence),
    ("building-a3", "Faculty of Education", -26.6860, 27.0980, BuildingType::Academic),
    ("building-a4", "Faculty of Economic and Management Sciences", -26.6870, 27.1000, BuildingType::Academic),
    ("building-dining1", "Main Dining Hall", -26.6910, 27.0940, BuildingType::Dining),
    ("security-1", "Protection Services", -26.6878, 27.0918, BuildingType::Administration),
    ("health-1", "Campus Health Care Centre", -26.6895, 27.0925, BuildingType::Administration),
];

/// Built-in mock directory used when no bundle or backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fixtures;

impl Fixtures {
    pub fn locations() -> Vec<LocationRecord> {
        CAMPUS_BUILDINGS
            .iter()
            .map(|(id, name, lat, lng, building_type)| LocationRecord {
                id: id.to_string(),
                name: name.to_string(),
                address: CAMPUS_ADDRESS.to_string(),
                lat: *lat,
                lng: *lng,
                kind: match *id {
                    "security-1" => LocationKind::Security,
                    "health-1" => LocationKind::Health,
                    _ => building_type.location_kind(),
                },
            })
            .collect()
    }

    pub fn buildings() -> Vec<BuildingRecord> {
        [
            ("1", "Building 1", "Main Academic Building"),
            ("2", "Building 2", "Science Laboratory Complex"),
            ("3", "Building 3", "Student Center"),
            ("4", "Building 4", "Library and Research Center"),
            ("5", "Building 5", "Engineering Hall"),
            ("6", "Building 6", "Arts and Humanities"),
            ("7", "Building 7", "Sports Complex"),
            ("8", "Building 8", "Dormitory A"),
        ]
        .into_iter()
        .map(|(id, name, description)| BuildingRecord {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            image: format!("/images/buildings/{id}.jpg"),
        })
        .collect()
    }

    pub fn contacts() -> Vec<ContactRecord> {
        [
            ("0", "Protection Services", "Emergency Services", "(555) 911-4357", true),
            ("1", "Dr. Sarah Johnson", "Dean of Academic Affairs", "(555) 123-4567", false),
            ("2", "Michael Chen", "Student Services Director", "(555) 234-5678", false),
            ("3", "Prof. Emily Davis", "Computer Science Department", "(555) 345-6789", false),
            ("4", "Robert Wilson", "Facilities Management", "(555) 456-7890", false),
            ("5", "Dr. Amanda Rodriguez", "Health Center", "(555) 567-8901", false),
            ("6", "James Thompson", "IT Support", "(555) 678-9012", false),
            ("7", "Lisa Anderson", "Admissions Office", "(555) 789-0123", false),
            ("8", "David Brown", "Financial Aid", "(555) 890-1234", false),
            ("9", "Maria Garcia", "International Student Services", "(555) 901-2345", false),
            ("10", "John Taylor", "Library Services", "(555) 012-3456", false),
            ("11", "Jennifer White", "Career Counseling", "(555) 123-4568", false),
        ]
        .into_iter()
        .map(|(id, name, title, phone, emergency)| ContactRecord {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            phone: phone.into(),
            emergency,
        })
        .collect()
    }

    pub fn offices() -> Vec<OfficeRecord> {
        [
            ("1", "G12-101", "Prof. Emily Davis", "Computer Science"),
            ("2", "G12-214", "Dr. Pieter Venter", "Information Systems"),
            ("3", "E6-105", "Dr. Thandi Mokoena", "Chemical Engineering"),
            ("4", "F13-002", "Prof. Johan Botha", "Mathematics"),
            ("5", "C1-310", "Dr. Lerato Khumalo", "Economics"),
        ]
        .into_iter()
        .map(|(id, office_number, lecturer, department)| OfficeRecord {
            id: id.into(),
            office_number: office_number.into(),
            lecturer: lecturer.into(),
            department: department.into(),
        })
        .collect()
    }
}

#[async_trait]
impl DataProvider for Fixtures {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>, repository::Error> {
        Ok(Self::locations())
    }

    async fn list_buildings(&self) -> Result<Vec<BuildingRecord>, repository::Error> {
        Ok(Self::buildings())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, repository::Error> {
        Ok(Self::contacts())
    }

    async fn list_offices(&self) -> Result<Vec<OfficeRecord>, repository::Error> {
        Ok(Self::offices())
    }
}

#[test]
fn building_types_map_onto_location_kinds() {
    assert_eq!(BuildingType::Residence.location_kind(), LocationKind::Residential);
    assert_eq!(BuildingType::Dining.location_kind(), LocationKind::Restaurant);
    assert_eq!(BuildingType::Sports.location_kind(), LocationKind::Recreational);
    assert_eq!(BuildingType::Parking.location_kind(), LocationKind::Landmark);
}

#[test]
fn exactly_one_emergency_contact() {
    let emergency = Fixtures::contacts()
        .into_iter()
        .filter(|contact| contact.emergency)
        .count();
    assert_eq!(emergency, 1);
}

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr, sync::Arc};

use crate::shared::{Coordinate, Searchable};

/// Closed set of place categories. Only used to pick marker styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Restaurant,
    Store,
    Landmark,
    GasStation,
    Recreational,
    Residential,
    Health,
    Security,
    Library,
}

impl LocationKind {
    pub const ALL: [LocationKind; 9] = [
        Self::Restaurant,
        Self::Store,
        Self::Landmark,
        Self::GasStation,
        Self::Recreational,
        Self::Residential,
        Self::Health,
        Self::Security,
        Self::Library,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Store => "store",
            Self::Landmark => "landmark",
            Self::GasStation => "gas_station",
            Self::Recreational => "recreational",
            Self::Residential => "residential",
            Self::Health => "health",
            Self::Security => "security",
            Self::Library => "library",
        }
    }
}

impl Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown location type {s}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub address: Arc<str>,
    pub coordinate: Coordinate,
    pub kind: LocationKind,
}

impl Searchable for Location {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn keywords(&self) -> &str {
        &self.address
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub description: Arc<str>,
    pub image: Arc<str>,
}

impl Searchable for Building {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn keywords(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub title: Arc<str>,
    pub phone: Arc<str>,
    /// Shown highlighted above the rest of the directory.
    pub emergency: bool,
}

impl Searchable for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn keywords(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub index: u32,
    pub id: Arc<str>,
    pub office_number: Arc<str>,
    pub lecturer: Arc<str>,
    pub department: Arc<str>,
}

impl Searchable for Office {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.lecturer
    }

    fn keywords(&self) -> &str {
        &self.department
    }
}

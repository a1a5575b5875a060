use crate::{
    map::Marker,
    repository::{Location, LocationKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub glyph: &'static str,
}

impl From<LocationKind> for MarkerStyle {
    fn from(kind: LocationKind) -> Self {
        let (color, glyph) = match kind {
            LocationKind::Restaurant => ("#ef4444", "utensils"),
            LocationKind::Store => ("#3b82f6", "shopping-bag"),
            LocationKind::Landmark => ("#22c55e", "landmark"),
            LocationKind::GasStation => ("#eab308", "fuel"),
            LocationKind::Recreational => ("#8b5cf6", "dumbbell"),
            LocationKind::Residential => ("#f97316", "house"),
            LocationKind::Health => ("#ec4899", "heart-pulse"),
            LocationKind::Security => ("#dc2626", "shield"),
            LocationKind::Library => ("#14b8a6", "book-open"),
        };
        Self { color, glyph }
    }
}

impl From<&Location> for Marker {
    fn from(location: &Location) -> Self {
        Self {
            location_id: location.id.clone(),
            coordinate: location.coordinate,
            style: location.kind.into(),
        }
    }
}

#[test]
fn every_kind_has_a_distinct_color() {
    let mut colors: Vec<_> = LocationKind::ALL
        .iter()
        .map(|kind| MarkerStyle::from(*kind).color)
        .collect();
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), LocationKind::ALL.len());
}

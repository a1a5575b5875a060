use serde::{Deserialize, Serialize};

use crate::shared::{Coordinate, Distance, Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

/// Glyph shown next to a step in the directions panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverGlyph {
    TurnLeft,
    TurnRight,
    Straight,
    Arrive,
}

impl Maneuver {
    pub fn glyph(&self) -> ManeuverGlyph {
        match (self.kind.as_str(), self.modifier.as_deref()) {
            ("turn", Some(modifier)) if modifier.contains("left") => ManeuverGlyph::TurnLeft,
            ("turn", Some(modifier)) if modifier.contains("right") => ManeuverGlyph::TurnRight,
            ("arrive", _) => ManeuverGlyph::Arrive,
            _ => ManeuverGlyph::Straight,
        }
    }
}

/// `"500m"` below a kilometer, `"1.2km"` from there on.
pub fn format_distance(meters: f64) -> String {
    Distance::from_meters(meters).to_string()
}

/// `"5 min"` below an hour, `"1h 30min"` from there on.
pub fn format_duration(seconds: f64) -> String {
    Duration::from_seconds(seconds).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: Distance,
    pub duration: Duration,
    pub maneuver: Maneuver,
}

impl RouteStep {
    /// `"120m • 2 min"`, leaving out parts that are zero.
    pub fn summary(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.distance.as_meters() > 0.0 {
            parts.push(self.distance.to_string());
        }
        if self.duration.as_seconds() > 0.0 {
            parts.push(self.duration.to_string());
        }
        parts.join(" • ")
    }
}

/// A walking route as returned by the directions service. Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub distance: Distance,
    pub duration: Duration,
    pub steps: Vec<RouteStep>,
    /// Line geometry in travel order.
    pub geometry: Vec<Coordinate>,
}

impl Route {
    pub fn summary(&self) -> String {
        format!("Total: {} • {}", self.distance, self.duration)
    }

    pub fn destination(&self) -> Option<&Coordinate> {
        self.geometry.last()
    }
}

#[test]
fn turn_modifiers_pick_glyphs() {
    let maneuver = |kind: &str, modifier: Option<&str>| Maneuver {
        kind: kind.into(),
        modifier: modifier.map(String::from),
    };
    assert_eq!(maneuver("turn", Some("left")).glyph(), ManeuverGlyph::TurnLeft);
    assert_eq!(maneuver("turn", Some("sharp right")).glyph(), ManeuverGlyph::TurnRight);
    assert_eq!(maneuver("turn", None).glyph(), ManeuverGlyph::Straight);
    assert_eq!(maneuver("arrive", None).glyph(), ManeuverGlyph::Arrive);
    assert_eq!(maneuver("depart", Some("left")).glyph(), ManeuverGlyph::Straight);
}

#[test]
fn step_summary_skips_zero_parts() {
    let step = RouteStep {
        instruction: "You have arrived".into(),
        distance: Distance::from_meters(0.0),
        duration: Duration::from_seconds(0.0),
        maneuver: Maneuver {
            kind: "arrive".into(),
            modifier: None,
        },
    };
    assert_eq!(step.summary(), "");
    let step = RouteStep {
        distance: Distance::from_meters(120.0),
        duration: Duration::from_seconds(90.0),
        ..step
    };
    assert_eq!(step.summary(), "120m • 2 min");
}

#[test]
fn formats_for_display() {
    assert_eq!(format_distance(500.0), "500m");
    assert_eq!(format_distance(1200.0), "1.2km");
    assert_eq!(format_duration(300.0), "5 min");
    assert_eq!(format_duration(5400.0), "1h 30min");
}

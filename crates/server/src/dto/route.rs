use campuscompass::directions::{ManeuverGlyph, Route, RouteStep};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StepDto {
    pub instruction: String,
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
    pub glyph: ManeuverGlyph,
}

impl From<&RouteStep> for StepDto {
    fn from(step: &RouteStep) -> Self {
        Self {
            instruction: step.instruction.clone(),
            distance: step.distance.as_meters(),
            duration: step.duration.as_seconds(),
            summary: step.summary(),
            glyph: step.maneuver.glyph(),
        }
    }
}

/// Distances in meters, durations in seconds, geometry as `[lng, lat]` pairs.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDto {
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
    pub steps: Vec<StepDto>,
    pub geometry: Vec<[f64; 2]>,
}

impl From<&Route> for RouteDto {
    fn from(route: &Route) -> Self {
        Self {
            distance: route.distance.as_meters(),
            duration: route.duration.as_seconds(),
            summary: route.summary(),
            steps: route.steps.iter().map(StepDto::from).collect(),
            geometry: route.geometry.iter().map(|c| c.to_lng_lat()).collect(),
        }
    }
}

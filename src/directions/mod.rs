mod models;
pub use models::*;

use reqwest::Url;
use serde::Deserialize;
use std::{sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    config::DirectionsConfig,
    net::{self, Fetcher, Request},
    shared::{Coordinate, Distance, Duration},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Network(#[from] net::Error),
    #[error("Directions service answered with status {0}")]
    Status(u16),
    #[error("Malformed directions response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("No route found")]
    NoRouteFound,
    #[error("Route has no legs")]
    MissingLeg,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    routes: Vec<WireRoute>,
}

#[derive(Debug, Deserialize)]
struct WireRoute {
    distance: f64,
    duration: f64,
    geometry: WireGeometry,
    #[serde(default)]
    legs: Vec<WireLeg>,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct WireLeg {
    #[serde(default)]
    steps: Vec<WireStep>,
}

#[derive(Debug, Deserialize)]
struct WireStep {
    maneuver: WireManeuver,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct WireManeuver {
    #[serde(default)]
    instruction: String,
    #[serde(rename = "type")]
    kind: String,
    modifier: Option<String>,
}

impl From<WireStep> for RouteStep {
    fn from(value: WireStep) -> Self {
        Self {
            instruction: value.maneuver.instruction,
            distance: Distance::from_meters(value.distance),
            duration: Duration::from_seconds(value.duration),
            maneuver: Maneuver {
                kind: value.maneuver.kind,
                modifier: value.maneuver.modifier,
            },
        }
    }
}

/// Walking directions from the external directions service. One GET per call,
/// no retry.
pub struct DirectionsClient<F> {
    fetcher: Arc<F>,
    config: DirectionsConfig,
}

impl<F: Fetcher> DirectionsClient<F> {
    pub fn new(fetcher: Arc<F>, config: DirectionsConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn url(&self, from: &Coordinate, to: &Coordinate) -> Result<Url, net::Error> {
        let raw = format!(
            "{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            from.longitude,
            from.latitude,
            to.longitude,
            to.latitude,
        );
        let mut url =
            Url::parse(&raw).map_err(|err| net::Error::InvalidUrl(format!("{raw}: {err}")))?;
        url.query_pairs_mut()
            .append_pair("alternatives", "false")
            .append_pair("geometries", "geojson")
            .append_pair("language", &self.config.language)
            .append_pair("overview", "full")
            .append_pair("steps", "true")
            .append_pair("access_token", &self.config.access_token);
        Ok(url)
    }

    pub async fn walking_route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<Route, self::Error> {
        let now = Instant::now();
        let request = Request::get(self.url(from, to)?);
        let response = self.fetcher.fetch(&request).await.map_err(|err| {
            error!("Error fetching route: {err}");
            err
        })?;
        if !response.is_ok() {
            error!("Directions service answered {}", response.status);
            return Err(Error::Status(response.status));
        }
        let route = parse_route(&response.body)?;
        debug!(
            "Route of {} with {} steps took {:?}",
            route.distance,
            route.steps.len(),
            now.elapsed()
        );
        Ok(route)
    }
}

/// First route of a directions response. Steps come from its first leg.
pub fn parse_route(body: &[u8]) -> Result<Route, self::Error> {
    let response: WireResponse = serde_json::from_slice(body)?;
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(Error::NoRouteFound)?;
    let leg = route.legs.into_iter().next().ok_or(Error::MissingLeg)?;
    Ok(Route {
        distance: Distance::from_meters(route.distance),
        duration: Duration::from_seconds(route.duration),
        steps: leg.steps.into_iter().map(RouteStep::from).collect(),
        geometry: route
            .geometry
            .coordinates
            .into_iter()
            .map(Coordinate::from_lng_lat)
            .collect(),
    })
}

#[test]
fn empty_routes_is_no_route_found() {
    let result = parse_route(br#"{"routes": [], "code": "NoRoute"}"#);
    assert!(matches!(result, Err(Error::NoRouteFound)));
}

#[test]
fn geometry_is_read_as_lng_lat() {
    let body = br#"{"routes":[{"distance":10,"duration":8,
        "geometry":{"type":"LineString","coordinates":[[27.09,-26.68],[27.1,-26.69]]},
        "legs":[{"steps":[]}]}]}"#;
    let route = parse_route(body).unwrap();
    assert_eq!(route.geometry[0], Coordinate::new(-26.68, 27.09));
    assert_eq!(route.destination(), Some(&Coordinate::new(-26.69, 27.1)));
}

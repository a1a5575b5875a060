use std::{collections::HashMap, sync::Arc};

use crate::{dto::RouteDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campuscompass::{repository::Repository, shared::Coordinate};
use tracing::error;

pub async fn directions(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let to = params.get("to").ok_or(StatusCode::BAD_REQUEST)?;
    let to = waypoint_from_str(&state.repository, to)?;
    let from = match params.get("from") {
        Some(from) => coordinate_from_str(from)?,
        None => state.config.campus.origin,
    };
    let route = state
        .directions
        .walking_route(&from, &to)
        .await
        .map_err(|err| {
            error!("Directions from {from} to {to} failed: {err}");
            StatusCode::BAD_GATEWAY
        })?;
    Ok(Json(RouteDto::from(&route)).into_response())
}

/// A location id, or a `lat,lng` pair.
fn waypoint_from_str(repository: &Repository, str: &str) -> Result<Coordinate, StatusCode> {
    if str.contains(',') {
        coordinate_from_str(str)
    } else {
        Ok(repository
            .location_by_id(str)
            .ok_or(StatusCode::BAD_REQUEST)?
            .coordinate)
    }
}

fn coordinate_from_str(str: &str) -> Result<Coordinate, StatusCode> {
    let (latitude, longitude) = str.split_once(',').ok_or(StatusCode::BAD_REQUEST)?;
    let latitude: f64 = latitude
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let coordinate = Coordinate::new(latitude, longitude);
    if coordinate.is_finite() {
        Ok(coordinate)
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

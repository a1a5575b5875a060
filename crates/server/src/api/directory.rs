use std::{collections::HashMap, sync::Arc};

use crate::{
    dto::{BuildingDto, ContactDirectoryDto, LocationDto, OfficeDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campuscompass::{app::ContactDirectory, repository::LocationKind};

pub async fn locations(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let result: Vec<LocationDto> = match params.get("type") {
        Some(kind) => {
            let kind: LocationKind = kind.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            state
                .repository
                .locations_by_kind(kind)
                .into_iter()
                .map(LocationDto::from)
                .collect()
        }
        None => state.repository.locations.iter().map(LocationDto::from).collect(),
    };
    Ok(Json(result).into_response())
}

pub async fn location(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let location = state
        .repository
        .location_by_id(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(LocationDto::from(location)).into_response())
}

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").ok_or(StatusCode::BAD_REQUEST)?;
    let count: usize = match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => 5,
    };
    let result: Vec<_> = state
        .repository
        .search_locations(query)
        .into_iter()
        .take(count)
        .map(LocationDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn buildings(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let result: Vec<_> = state
        .repository
        .filter_buildings(query)
        .into_iter()
        .map(BuildingDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn contacts(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let directory: ContactDirectory = state.repository.filter_contacts(query).into_iter().collect();
    Ok(Json(ContactDirectoryDto::from(directory)).into_response())
}

pub async fn offices(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let result: Vec<_> = state
        .repository
        .filter_offices(query)
        .into_iter()
        .map(OfficeDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn manifest(State(state): State<Arc<AppState>>) -> Response {
    Json(state.manifest.clone()).into_response()
}

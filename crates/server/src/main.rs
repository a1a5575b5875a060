mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::get;
use campuscompass::{
    config::Config,
    directions::DirectionsClient,
    net::HttpFetcher,
    offline::{CacheStorage, Manifest, OfflineCache, Registration},
    repository::{
        Repository,
        source::{Bundle, DataProvider, Fixtures},
    },
};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    if config.directions.access_token.is_empty() {
        warn!("MAPBOX_TOKEN is not set, directions will fail");
    }

    info!("Loading data...");
    let now = Instant::now();
    let provider: Box<dyn DataProvider> = match std::env::args().nth(1) {
        Some(path) => {
            info!("Using bundle {path}");
            Box::new(Bundle::new(path))
        }
        None => {
            info!("No bundle given, using built-in campus data");
            Box::new(Fixtures)
        }
    };
    let repository = match Repository::new().load(provider.as_ref()).await {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load campus data: {err}");
            std::process::exit(1);
        }
    };
    info!("Loading data took {:?}", now.elapsed());

    let network = Arc::new(HttpFetcher::new());
    let registration = Arc::new(Registration::new(network.clone()));
    let cache_config = config.outgoing_cache();
    info!(
        "Caching outgoing calls, at most {:?} entries for {:?}s",
        cache_config.max_entries,
        cache_config.max_age.map(|age| age.num_seconds())
    );
    match OfflineCache::new(cache_config, Arc::new(CacheStorage::new()), network) {
        Ok(worker) => {
            if let Err(err) = registration.update(worker).await {
                warn!("Offline cache not installed, going straight to the network: {err}");
            }
        }
        Err(err) => warn!("Offline cache misconfigured, going straight to the network: {err}"),
    }
    let directions = DirectionsClient::new(registration, config.directions.clone());

    let port = config.port;
    let state = Arc::new(AppState {
        repository,
        directions,
        manifest: Manifest::default(),
        config,
    });

    let app = axum::Router::new()
        .route("/locations", get(api::locations))
        .route("/locations/{id}", get(api::location))
        .route("/buildings", get(api::buildings))
        .route("/contacts", get(api::contacts))
        .route("/offices", get(api::offices))
        .route("/search", get(api::search))
        .route("/directions", get(api::directions))
        .route("/manifest.json", get(api::manifest))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

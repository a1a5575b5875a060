mod common;

use campuscompass::{
    config::{CacheConfig, Config, OUTGOING_MAX_ENTRIES},
    net::{Destination, Fetcher, Request, Response},
    offline::{CacheStorage, OfflineCache, Registration, Strategy, WorkerState},
};
use common::MockFetcher;
use reqwest::Url;
use std::sync::Arc;

const ORIGIN: &str = "https://campus.test";
const API: &str = "https://api.mapbox.com/directions/v5/mapbox/walking/route";

fn config(version: &str) -> CacheConfig {
    CacheConfig::default()
        .with_origin(Url::parse(ORIGIN).unwrap())
        .with_version(version)
}

fn url(path: &str) -> String {
    format!("{ORIGIN}{path}")
}

fn scripted_shell(network: &MockFetcher) {
    network.respond(&url("/app"), 200, "<html>shell</html>");
    network.respond(&url("/manifest.json"), 200, "{}");
}

async fn activated(
    network: &Arc<MockFetcher>,
    storage: &Arc<CacheStorage>,
) -> OfflineCache<MockFetcher> {
    scripted_shell(network);
    let worker = OfflineCache::new(config("v1"), storage.clone(), network.clone()).unwrap();
    worker.install().await.unwrap();
    worker.activate().await.unwrap();
    worker
}

#[tokio::test]
async fn install_precaches_shell() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;

    assert_eq!(worker.state().await, WorkerState::Activated);
    let cache = storage.get("campuscompass-static-v1").await.unwrap();
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn network_first_stores_ok_response() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    network.respond(API, 200, "fresh");

    let request = Request::parse(API).unwrap();
    assert_eq!(worker.policy().classify(&request), Some(Strategy::NetworkFirst));
    let response = worker.handle(&request).await.unwrap();
    assert_eq!(response.text(), "fresh");

    let dynamic = storage.get("campuscompass-dynamic-v1").await.unwrap();
    let cached = dynamic.get(&request.cache_key()).await.unwrap();
    assert_eq!(cached.text(), "fresh");
}

#[tokio::test]
async fn network_first_falls_back_to_cache() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let request = Request::parse(API).unwrap();

    network.respond(API, 200, "first");
    worker.handle(&request).await.unwrap();
    network.fail(API);

    let response = worker.handle(&request).await.unwrap();
    assert_eq!(response.text(), "first");
}

#[tokio::test]
async fn network_first_does_not_cache_errors() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let request = Request::parse(API).unwrap();

    network.respond(API, 503, "busy");
    let response = worker.handle(&request).await.unwrap();
    assert_eq!(response.status, 503);
    assert!(storage.match_any(&request.cache_key()).await.is_none());
}

#[tokio::test]
async fn network_first_without_cache_propagates_error() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    network.fail(API);

    let request = Request::parse(API).unwrap();
    assert!(worker.handle(&request).await.is_err());
}

#[tokio::test]
async fn navigation_falls_back_to_shell() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;

    let request = Request::parse(&url("/app/buildings"))
        .unwrap()
        .with_destination(Destination::Document);
    let response = worker.network_first(&request).await.unwrap();
    assert_eq!(response.text(), "<html>shell</html>");
}

#[tokio::test]
async fn cache_first_skips_network_once_cached() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let asset = url("/assets/index.js");
    network.respond(&asset, 200, "console.log(1)");

    let request = Request::parse(&asset).unwrap();
    assert_eq!(worker.policy().classify(&request), Some(Strategy::CacheFirst));
    worker.handle(&request).await.unwrap();
    let calls = network.calls();

    network.fail(&asset);
    let response = worker.handle(&request).await.unwrap();
    assert_eq!(response.text(), "console.log(1)");
    assert_eq!(network.calls(), calls);
}

#[tokio::test]
async fn stale_while_revalidate_serves_cached_then_refreshes() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let page = url("/app/contacts");
    let request = Request::parse(&page).unwrap();
    assert_eq!(
        worker.policy().classify(&request),
        Some(Strategy::StaleWhileRevalidate)
    );

    network.respond(&page, 200, "v1");
    assert_eq!(worker.handle(&request).await.unwrap().text(), "v1");

    network.respond(&page, 200, "v2");
    assert_eq!(worker.handle(&request).await.unwrap().text(), "v1");
    worker.settle().await;
    assert_eq!(worker.handle(&request).await.unwrap().text(), "v2");
}

#[tokio::test]
async fn stale_while_revalidate_swallows_background_failure() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let page = url("/app/contacts");
    let request = Request::parse(&page).unwrap();

    network.respond(&page, 200, "v1");
    worker.handle(&request).await.unwrap();
    network.fail(&page);
    assert_eq!(worker.handle(&request).await.unwrap().text(), "v1");
    worker.settle().await;
    assert_eq!(worker.handle(&request).await.unwrap().text(), "v1");
}

#[tokio::test]
async fn out_of_scope_requests_bypass_caches() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let tile = "https://tiles.example.org/14/1/2.png";
    network.respond(tile, 200, "png");

    let request = Request::parse(tile).unwrap();
    assert_eq!(worker.policy().classify(&request), None);
    worker.handle(&request).await.unwrap();
    network.fail(tile);
    assert!(worker.handle(&request).await.is_err());
    assert!(storage.match_any(&request.cache_key()).await.is_none());
}

#[tokio::test]
async fn non_get_requests_pass_through() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let worker = activated(&network, &storage).await;
    let request = Request::parse(API)
        .unwrap()
        .with_method(reqwest::Method::POST);
    assert_eq!(worker.policy().classify(&request), None);
}

#[tokio::test]
async fn activate_deletes_old_generations() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let registration = Registration::new(network.clone());
    scripted_shell(&network);

    let v1 = OfflineCache::new(config("v1"), storage.clone(), network.clone()).unwrap();
    registration.update(v1).await.unwrap();
    storage.open("campuscompass-dynamic-v1").await;

    let request = Request::parse(API).unwrap();
    let current = storage.open("campuscompass-dynamic-v2").await;
    current
        .put(request.cache_key(), Response::ok(request.url.clone(), "kept"))
        .await;

    let v2 = OfflineCache::new(config("v2"), storage.clone(), network.clone()).unwrap();
    registration.update(v2).await.unwrap();

    assert_eq!(
        storage.keys().await,
        vec![
            "campuscompass-dynamic-v2".to_string(),
            "campuscompass-static-v2".to_string()
        ]
    );
    let dynamic = storage.get("campuscompass-dynamic-v2").await.unwrap();
    assert_eq!(dynamic.get(&request.cache_key()).await.unwrap().text(), "kept");
    let active = registration.active().await.unwrap();
    assert_eq!(active.config().version, "v2");
}

#[tokio::test]
async fn retired_generation_does_not_recreate_its_cache() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let registration = Registration::new(network.clone());
    scripted_shell(&network);

    let v1 = OfflineCache::new(config("v1"), storage.clone(), network.clone()).unwrap();
    let v1 = registration.update(v1).await.unwrap();
    let v2 = OfflineCache::new(config("v2"), storage.clone(), network.clone()).unwrap();
    registration.update(v2).await.unwrap();
    assert_eq!(v1.state().await, WorkerState::Redundant);

    network.respond(API, 200, "late");
    let request = Request::parse(API).unwrap();
    assert_eq!(v1.network_first(&request).await.unwrap().text(), "late");
    assert_eq!(v1.cache_first(&request).await.unwrap().text(), "late");
    assert_eq!(v1.stale_while_revalidate(&request).await.unwrap().text(), "late");
    v1.settle().await;

    assert!(!storage.has("campuscompass-dynamic-v1").await);
    assert_eq!(
        storage.keys().await,
        vec!["campuscompass-static-v2".to_string()]
    );
}

#[tokio::test]
async fn failed_install_keeps_previous_worker() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let registration = Registration::new(network.clone());
    scripted_shell(&network);

    let v1 = OfflineCache::new(config("v1"), storage.clone(), network.clone()).unwrap();
    registration.update(v1).await.unwrap();

    network.fail(&url("/manifest.json"));
    let v2 = OfflineCache::new(config("v2"), storage.clone(), network.clone()).unwrap();
    assert!(registration.update(v2).await.is_err());

    let active = registration.active().await.unwrap();
    assert_eq!(active.config().version, "v1");
    assert_eq!(active.state().await, WorkerState::Activated);
    assert!(!storage.has("campuscompass-static-v2").await);
}

#[tokio::test]
async fn registration_without_worker_uses_network() {
    let network = Arc::new(MockFetcher::new());
    network.respond(API, 200, "direct");
    let registration = Registration::new(network.clone());
    let response = registration
        .fetch(&Request::parse(API).unwrap())
        .await
        .unwrap();
    assert_eq!(response.text(), "direct");
}

#[tokio::test]
async fn dynamic_cache_respects_max_entries() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    scripted_shell(&network);
    let worker = OfflineCache::new(
        config("v1").with_max_entries(1),
        storage.clone(),
        network.clone(),
    )
    .unwrap();
    worker.install().await.unwrap();
    worker.activate().await.unwrap();

    let first = format!("{API}?a");
    let second = format!("{API}?b");
    network.respond(&first, 200, "a");
    network.respond(&second, 200, "b");
    worker.handle(&Request::parse(&first).unwrap()).await.unwrap();
    worker.handle(&Request::parse(&second).unwrap()).await.unwrap();

    let dynamic = storage.get("campuscompass-dynamic-v1").await.unwrap();
    assert_eq!(dynamic.len().await, 1);
    assert_eq!(
        dynamic.keys().await,
        vec![Request::parse(&second).unwrap().cache_key()]
    );
}

#[tokio::test]
async fn outgoing_cache_stays_bounded() {
    let network = Arc::new(MockFetcher::new());
    let storage = Arc::new(CacheStorage::new());
    let registration = Registration::new(network.clone());
    let mut server = Config::default();
    server.cache = server.cache.with_origin(Url::parse(ORIGIN).unwrap());

    let worker = OfflineCache::new(server.outgoing_cache(), storage.clone(), network.clone())
        .unwrap();
    registration.update(worker).await.unwrap();

    let calls = OUTGOING_MAX_ENTRIES + 20;
    for i in 0..calls {
        let url = format!("{API}?from={i}");
        network.respond(&url, 200, "route");
        registration
            .fetch(&Request::parse(&url).unwrap())
            .await
            .unwrap();
    }

    assert_eq!(network.calls(), calls);
    let dynamic = storage.get("campuscompass-dynamic-v1").await.unwrap();
    assert_eq!(dynamic.len().await, OUTGOING_MAX_ENTRIES);
    let oldest = Request::parse(&format!("{API}?from=0")).unwrap();
    assert!(dynamic.get(&oldest.cache_key()).await.is_none());
}

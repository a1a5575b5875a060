mod common;

use campuscompass::{
    config::DirectionsConfig,
    directions::{self, DirectionsClient, ManeuverGlyph},
    shared::Coordinate,
};
use common::MockFetcher;
use std::sync::Arc;

const ROUTE: &str = r#"{
    "code": "Ok",
    "routes": [{
        "distance": 500,
        "duration": 300,
        "geometry": {"type": "LineString", "coordinates": [[27.0915, -26.6885], [27.0920, -26.6880], [27.0950, -26.6900]]},
        "legs": [{
            "steps": [
                {"maneuver": {"instruction": "Head north", "type": "depart"}, "distance": 320, "duration": 190},
                {"maneuver": {"instruction": "You have arrived", "type": "arrive"}, "distance": 180, "duration": 110}
            ]
        }]
    }]
}"#;

fn endpoints() -> (Coordinate, Coordinate) {
    (
        Coordinate::new(-26.6885, 27.0915),
        Coordinate::new(-26.6900, 27.0950),
    )
}

fn client(network: &Arc<MockFetcher>) -> DirectionsClient<MockFetcher> {
    let config = DirectionsConfig {
        access_token: "token".into(),
        ..Default::default()
    };
    DirectionsClient::new(network.clone(), config)
}

fn script(network: &MockFetcher, client: &DirectionsClient<MockFetcher>, status: u16, body: &str) {
    let (from, to) = endpoints();
    let url = client.url(&from, &to).unwrap();
    network.respond(url.as_str(), status, body);
}

#[test]
fn url_orders_pairs_lng_lat() {
    let network = Arc::new(MockFetcher::new());
    let (from, to) = endpoints();
    let url = client(&network).url(&from, &to).unwrap();
    assert!(url.as_str().starts_with(
        "https://api.mapbox.com/directions/v5/mapbox/walking/27.0915,-26.6885;27.095,-26.69?"
    ));
    assert!(url.as_str().contains("steps=true"));
    assert!(url.as_str().contains("geometries=geojson"));
    assert!(url.as_str().ends_with("access_token=token"));
}

#[test]
fn url_encodes_query_values() {
    let network = Arc::new(MockFetcher::new());
    let config = DirectionsConfig {
        access_token: "pk.a b&c=d".into(),
        language: "en&x".into(),
        ..Default::default()
    };
    let client = DirectionsClient::new(network, config);
    let (from, to) = endpoints();
    let url = client.url(&from, &to).unwrap();

    assert!(!url.as_str().contains("b&c"));
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("access_token".to_string(), "pk.a b&c=d".to_string())));
    assert!(pairs.contains(&("language".to_string(), "en&x".to_string())));
    assert_eq!(pairs.len(), 6);
}

#[tokio::test]
async fn walking_route_parses_route() {
    let network = Arc::new(MockFetcher::new());
    let client = client(&network);
    script(&network, &client, 200, ROUTE);

    let (from, to) = endpoints();
    let route = client.walking_route(&from, &to).await.unwrap();
    assert_eq!(route.distance.as_meters(), 500.0);
    assert_eq!(route.duration.as_seconds(), 300.0);
    assert_eq!(route.steps.len(), 2);
    assert_eq!(route.geometry.len(), 3);
    assert_eq!(route.steps[0].instruction, "Head north");
    assert_eq!(route.steps[1].maneuver.glyph(), ManeuverGlyph::Arrive);
    assert_eq!(route.summary(), "Total: 500m • 5 min");
}

#[tokio::test]
async fn bad_status_is_an_error() {
    let network = Arc::new(MockFetcher::new());
    let client = client(&network);
    script(&network, &client, 401, r#"{"message":"Not Authorized"}"#);

    let (from, to) = endpoints();
    let result = client.walking_route(&from, &to).await;
    assert!(matches!(result, Err(directions::Error::Status(401))));
}

#[tokio::test]
async fn network_failure_is_an_error() {
    let network = Arc::new(MockFetcher::new());
    let client = client(&network);

    let (from, to) = endpoints();
    let result = client.walking_route(&from, &to).await;
    assert!(matches!(result, Err(directions::Error::Network(_))));
}

#[tokio::test]
async fn empty_routes_is_no_route_found() {
    let network = Arc::new(MockFetcher::new());
    let client = client(&network);
    script(&network, &client, 200, r#"{"code":"NoRoute","routes":[]}"#);

    let (from, to) = endpoints();
    let result = client.walking_route(&from, &to).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        directions::Error::NoRouteFound.to_string()
    );
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let network = Arc::new(MockFetcher::new());
    let client = client(&network);
    script(&network, &client, 200, "<html>");

    let (from, to) = endpoints();
    let result = client.walking_route(&from, &to).await;
    assert!(matches!(result, Err(directions::Error::Malformed(_))));
}

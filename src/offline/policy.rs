use regex::Regex;
use reqwest::{Method, Url};

use crate::{config::CacheConfig, net::Request, offline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Fresh data when reachable, cached copy when offline.
    NetworkFirst,
    /// Cached copy when present, network otherwise.
    CacheFirst,
    /// Cached copy now, refreshed in the background for next time.
    StaleWhileRevalidate,
}

/// Decides which strategy, if any, serves a request.
#[derive(Debug, Clone)]
pub struct Policy {
    origin: Url,
    app_prefix: String,
    network_first: Vec<Regex>,
    static_assets: Vec<Regex>,
}

impl Policy {
    pub fn new(config: &CacheConfig) -> Result<Self, offline::Error> {
        Ok(Self {
            origin: config.origin.clone(),
            app_prefix: config.app_prefix.clone(),
            network_first: compile(&config.network_first_patterns)?,
            static_assets: compile(&config.static_patterns)?,
        })
    }

    /// Same origin, app prefixed, or an always-fresh API host.
    pub fn in_scope(&self, request: &Request) -> bool {
        request.url.origin() == self.origin.origin()
            || self.is_app_path(&request.url)
            || self.is_network_first(&request.url)
    }

    /// `None` means the request passes straight through to the network.
    pub fn classify(&self, request: &Request) -> Option<Strategy> {
        if request.method != Method::GET || !self.in_scope(request) {
            return None;
        }
        if self.is_network_first(&request.url) {
            return Some(Strategy::NetworkFirst);
        }
        if self
            .static_assets
            .iter()
            .any(|pattern| pattern.is_match(request.url.path()))
        {
            return Some(Strategy::CacheFirst);
        }
        if self.is_app_path(&request.url) {
            return Some(Strategy::StaleWhileRevalidate);
        }
        None
    }

    fn is_network_first(&self, url: &Url) -> bool {
        self.network_first
            .iter()
            .any(|pattern| pattern.is_match(url.as_str()))
    }

    fn is_app_path(&self, url: &Url) -> bool {
        url.path().starts_with(&self.app_prefix)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, offline::Error> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(offline::Error::from))
        .collect()
}

#[cfg(test)]
fn policy() -> Policy {
    let config = CacheConfig::default().with_origin(Url::parse("https://campus.test").unwrap());
    Policy::new(&config).unwrap()
}

#[test]
fn api_hosts_are_network_first() {
    let policy = policy();
    let request = Request::parse(
        "https://api.mapbox.com/directions/v5/mapbox/walking/27.09,-26.68;27.1,-26.69",
    )
    .unwrap();
    assert_eq!(policy.classify(&request), Some(Strategy::NetworkFirst));
    let request = Request::parse("https://api.example.org/buildings").unwrap();
    assert_eq!(policy.classify(&request), Some(Strategy::NetworkFirst));
}

#[test]
fn assets_are_cache_first() {
    let policy = policy();
    for url in [
        "https://campus.test/assets/index.js",
        "https://campus.test/app/icons/icon-192.png",
        "https://campus.test/fonts/inter.woff2",
    ] {
        let request = Request::parse(url).unwrap();
        assert_eq!(policy.classify(&request), Some(Strategy::CacheFirst), "{url}");
    }
}

#[test]
fn app_routes_are_stale_while_revalidate() {
    let policy = policy();
    let request = Request::parse("https://campus.test/app/buildings").unwrap();
    assert_eq!(policy.classify(&request), Some(Strategy::StaleWhileRevalidate));
}

#[test]
fn foreign_and_non_get_requests_pass_through() {
    let policy = policy();
    let foreign = Request::parse("https://tiles.example.com/14/1/2.png").unwrap();
    assert!(!policy.in_scope(&foreign));
    assert_eq!(policy.classify(&foreign), None);

    let post = Request::parse("https://campus.test/app/feedback")
        .unwrap()
        .with_method(Method::POST);
    assert_eq!(policy.classify(&post), None);

    let landing = Request::parse("https://campus.test/landing").unwrap();
    assert_eq!(policy.classify(&landing), None);
}

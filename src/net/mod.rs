mod client;
pub use client::*;

use async_trait::async_trait;
use reqwest::{Method, Url};
use std::{fmt::Display, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Network request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}

/// What the request is for. Only navigations get the app shell fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Destination {
    Document,
    Script,
    Style,
    Image,
    Font,
    #[default]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            destination: Destination::Empty,
        }
    }

    pub fn parse(url: &str) -> Result<Self, self::Error> {
        let url = Url::parse(url).map_err(|err| Error::InvalidUrl(format!("{url}: {err}")))?;
        Ok(Self::get(url))
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn is_navigation(&self) -> bool {
        self.destination == Destination::Document
    }

    /// Exact method and url, the key every cache entry is stored under.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey(format!("{} {}", self.method, self.url))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully buffered response. Cloning yields an independent copy, so the
/// cached entry and the one handed back never share a consumed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(url: Url, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url,
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn ok(url: Url, body: impl Into<Vec<u8>>) -> Self {
        Self::new(url, 200, body)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can turn a request into a response: the network, or a layer
/// in front of it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, self::Error>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, request: &Request) -> Result<Response, self::Error> {
        (**self).fetch(request).await
    }
}

#[test]
fn cache_key_includes_method_and_url() {
    let request = Request::parse("https://campus.test/app/map?x=1").unwrap();
    assert_eq!(request.cache_key().to_string(), "GET https://campus.test/app/map?x=1");
    let head = request.with_method(Method::HEAD);
    assert_eq!(head.cache_key().to_string(), "HEAD https://campus.test/app/map?x=1");
}

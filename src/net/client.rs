use async_trait::async_trait;
use reqwest::header::ACCEPT_ENCODING;
use std::time::Instant;
use tracing::{debug, warn};

use crate::net::{self, Fetcher, Request, Response};

/// The real network, backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, net::Error> {
        let now = Instant::now();
        let network_error = |err: reqwest::Error| {
            warn!("Request to {} failed: {err}", request.url);
            net::Error::Network {
                url: request.url.to_string(),
                reason: err.to_string(),
            }
        };

        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .header(ACCEPT_ENCODING, "gzip, deflate")
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let url = response.url().clone();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(network_error)?.to_vec();
        debug!(
            "{} {} -> {status} took {:?}",
            request.method,
            request.url,
            now.elapsed()
        );
        Ok(Response {
            url,
            status,
            headers,
            body,
        })
    }
}

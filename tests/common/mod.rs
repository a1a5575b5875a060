#![allow(dead_code)]

use async_trait::async_trait;
use campuscompass::net::{self, Fetcher, Request, Response};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Scripted network. Unscripted urls fail like an unreachable host.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<(u16, String), String>>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok((status, body.to_string())));
    }

    pub fn fail(&self, url: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err("connection refused".to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, net::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned();
        match scripted {
            Some(Ok((status, body))) => Ok(Response::new(request.url.clone(), status, body)),
            Some(Err(reason)) => Err(net::Error::Network {
                url: request.url.to_string(),
                reason,
            }),
            None => Err(net::Error::Network {
                url: request.url.to_string(),
                reason: "unscripted".to_string(),
            }),
        }
    }
}

// src/testing.rs - In-memory transport for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::platform::{HttpMethod, NetworkProvider, NetworkRequest, NetworkResponse};

#[derive(Debug, Clone)]
enum Canned {
    Response { status: u16, body: String },
    TransportError,
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(HttpMethod, String), VecDeque<Canned>>,
    requests: Vec<NetworkRequest>,
}

/// Routes are keyed by method and the path relative to either configured origin.
/// Queued responses are consumed in order; the last one repeats.
#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    state: Arc<Mutex<MockState>>,
    config: Arc<ClientConfig>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.clone(), Arc::new(self.clone()))
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: impl Into<String>) {
        self.push(
            method,
            path,
            Canned::Response {
                status,
                body: body.into(),
            },
        );
    }

    pub fn respond_json(&self, method: HttpMethod, path: &str, body: serde_json::Value) {
        self.respond(method, path, 200, body.to_string());
    }

    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(method, path, Canned::TransportError);
    }

    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && self.relative_path(&r.url) == path)
            .count()
    }

    /// Last request sent to `path`
    pub fn last_request(&self, method: HttpMethod, path: &str) -> Option<NetworkRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && self.relative_path(&r.url) == path)
    }

    fn push(&self, method: HttpMethod, path: &str, canned: Canned) {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(canned);
    }

    fn relative_path(&self, url: &str) -> String {
        url.strip_prefix(self.config.base_url())
            .or_else(|| url.strip_prefix(self.config.image_server_url()))
            .unwrap_or(url)
            .to_string()
    }
}

#[async_trait]
impl NetworkProvider for MockNetwork {
    async fn request(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        let key = (request.method, self.relative_path(&request.url));
        let url = request.url.clone();

        let canned = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state.routes.get_mut(&key).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match canned {
            Some(Canned::Response { status, body }) => Ok(NetworkResponse {
                status_code: status,
                headers: HashMap::new(),
                body: body.into_bytes(),
            }),
            Some(Canned::TransportError) => Err(Error::network(url, "connection refused")),
            None => Err(Error::network(url, format!("no canned response for {} {}", key.0, key.1))),
        }
    }
}

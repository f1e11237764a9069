//! Scripted in-memory transport for unit tests.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use url::Url;

use crate::browser::Session;
use crate::driver::AttachedLauncher;
use crate::error::Result;
use crate::identifiers::{Provenance, SessionId};
use crate::protocol::{Method, RawResponse, Request};

use super::Transport;

struct Route {
    method: Method,
    path: String,
    /// Served in order; the last one repeats.
    responses: VecDeque<RawResponse>,
}

/// Records every request and answers from scripted routes.
///
/// Unrouted requests get `{"value": null}`.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<Vec<Route>>,
    log: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a raw response for `method path`.
    pub(crate) fn respond(&self, method: Method, path: &str, response: RawResponse) {
        let mut routes = self.routes.lock();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.responses.push_back(response),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                responses: VecDeque::from([response]),
            }),
        }
    }

    /// Queues a successful `{"value": value}` reply.
    pub(crate) fn ok(&self, method: Method, path: &str, value: Value) {
        let body = json!({ "value": value }).to_string();
        self.respond(method, path, RawResponse::new(200, body));
    }

    /// Queues a WebDriver error reply.
    pub(crate) fn fail(&self, method: Method, path: &str, status: u16, code: &str) {
        let body = json!({
            "value": {"error": code, "message": format!("{code} (scripted)"), "stacktrace": ""}
        })
        .to_string();
        self.respond(method, path, RawResponse::new(status, body));
    }

    /// Every request sent so far.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.log.lock().clone()
    }

    /// Every request sent so far as `"METHOD path"`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Number of requests sent to `method path`.
    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Result<RawResponse> {
        self.log.lock().push(request.clone());

        let mut routes = self.routes.lock();
        let response = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path)
            .and_then(|route| {
                if route.responses.len() > 1 {
                    route.responses.pop_front()
                } else {
                    route.responses.front().cloned()
                }
            });

        Ok(response.unwrap_or_else(|| RawResponse::new(200, r#"{"value":null}"#)))
    }
}

/// A session with id `s1` talking to `transport`.
pub(crate) fn session(transport: Arc<MockTransport>) -> Session {
    let launcher = AttachedLauncher::new(Url::parse("http://127.0.0.1:4444").unwrap());
    Session::new(
        SessionId::new("s1"),
        Provenance::unavailable(),
        transport,
        Arc::new(launcher),
    )
}

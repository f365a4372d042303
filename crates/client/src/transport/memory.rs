//! In-memory transport with scripted replies.
//!
//! Replies are registered per `(method, endpoint)`. Each route serves its
//! replies in order and keeps repeating the last one, so a test can script
//! a sequence (`401` then `200`) or a single standing answer. Every request
//! is recorded for later assertions. Requests with no matching route get a
//! `404` JSON error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use super::{ApiRequest, RawResponse, Transport};
use crate::error::ApiError;

/// A scripted outcome for one request.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(RawResponse),
    Timeout,
    NetworkError(String),
}

impl MockReply {
    /// JSON response with the given status.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::Response(RawResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string().into_bytes(),
        })
    }

    /// Plain-text (or HTML) response with the given status.
    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self::Response(RawResponse {
            status,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.as_bytes().to_vec(),
        })
    }

    /// Body-less response, e.g. `204 No Content`.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self::Response(RawResponse {
            status,
            content_type: None,
            body: Vec::new(),
        })
    }
}

#[derive(Debug)]
struct Route {
    method: Method,
    endpoint: String,
    replies: VecDeque<MockReply>,
    last: Option<MockReply>,
}

impl Route {
    fn next_reply(&mut self) -> Option<MockReply> {
        match self.replies.pop_front() {
            Some(reply) => {
                self.last = Some(reply.clone());
                Some(reply)
            }
            None => self.last.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
}

/// [`Transport`] that answers from scripted replies.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `reply` for `method` requests whose path (and query) ends
    /// with `endpoint`.
    pub fn on(&self, method: Method, endpoint: &str, reply: MockReply) -> &Self {
        let mut state = self.lock();
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.endpoint == endpoint)
        {
            route.replies.push_back(reply);
        } else {
            state.routes.push(Route {
                method,
                endpoint: endpoint.to_string(),
                replies: VecDeque::from([reply]),
                last: None,
            });
        }
        self
    }

    /// Queue a JSON reply.
    pub fn on_json(&self, method: Method, endpoint: &str, status: u16, body: &Value) -> &Self {
        self.on(method, endpoint, MockReply::json(status, body))
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.lock().requests.last().cloned()
    }

    /// Number of requests that matched `method` and `endpoint`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, endpoint: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == *method && path_and_query(&r.url).ends_with(endpoint))
            .count()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let target = path_and_query(&request.url).to_string();
        let reply = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state
                .routes
                .iter_mut()
                .filter(|r| r.method == request.method && target.ends_with(&r.endpoint))
                .max_by_key(|r| r.endpoint.len())
                .and_then(Route::next_reply)
        };

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Timeout) => Err(ApiError::Timeout),
            Some(MockReply::NetworkError(message)) => Err(ApiError::Network(message)),
            None => Ok(not_found()),
        }
    }
}

fn not_found() -> RawResponse {
    RawResponse {
        status: 404,
        content_type: Some("application/json".to_string()),
        body: json!({"success": false, "error": "Not found"})
            .to_string()
            .into_bytes(),
    }
}

/// Strip scheme and host from an absolute URL.
fn path_and_query(url: &str) -> &str {
    url.split_once("://")
        .and_then(|(_, rest)| rest.find('/').and_then(|i| rest.get(i..)))
        .unwrap_or(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use reqwest::header::HeaderMap;

    use super::*;
    use crate::transport::RequestBody;

    fn request(method: Method, url: &str) -> ApiRequest {
        ApiRequest {
            method,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_replies_in_order_then_repeat_last() {
        let transport = MemoryTransport::new();
        transport
            .on(Method::GET, "/auth/me", MockReply::empty(401))
            .on(Method::GET, "/auth/me", MockReply::empty(200));

        let url = "http://localhost:5002/api/v1/auth/me";
        let statuses = [
            transport.send(request(Method::GET, url)).await.unwrap().status,
            transport.send(request(Method::GET, url)).await.unwrap().status,
            transport.send(request(Method::GET, url)).await.unwrap().status,
        ];
        assert_eq!(statuses, [401, 200, 200]);
        assert_eq!(transport.requests_to(&Method::GET, "/auth/me"), 3);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_404() {
        let transport = MemoryTransport::new();
        transport.on(Method::POST, "/gigs", MockReply::empty(201));

        let response = transport
            .send(request(Method::GET, "http://api.test/gigs"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(response.is_json());
    }

    #[tokio::test]
    async fn test_longest_endpoint_wins() {
        let transport = MemoryTransport::new();
        transport
            .on(Method::GET, "/1", MockReply::empty(500))
            .on(Method::GET, "/gigs/1", MockReply::empty(200));

        let response = transport
            .send(request(Method::GET, "http://api.test/v1/gigs/1"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let transport = MemoryTransport::new();
        transport
            .on(Method::GET, "/slow", MockReply::Timeout)
            .on(Method::GET, "/down", MockReply::NetworkError("refused".into()));

        assert!(matches!(
            transport.send(request(Method::GET, "http://api.test/slow")).await,
            Err(ApiError::Timeout)
        ));
        assert!(matches!(
            transport.send(request(Method::GET, "http://api.test/down")).await,
            Err(ApiError::Network(_))
        ));
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(
            path_and_query("http://localhost:5002/api/v1/gigs?airport=LHR"),
            "/api/v1/gigs?airport=LHR"
        );
        assert_eq!(path_and_query("/relative"), "/relative");
    }
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tower::Service;

type Route = (String, String);

#[derive(Default)]
struct MockState {
    /// Queued responses per route; the last one is kept and repeated
    responses: HashMap<Route, VecDeque<(u16, String)>>,
    /// Every request seen, as (method, path, query)
    requests: Vec<(String, String, Option<String>)>,
}

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Clones share state, so a test can keep one handle for assertions after
/// turning another into a client.
#[derive(Clone, Default)]
pub struct MockService {
    state: Arc<Mutex<MockState>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, vec![(status, body.to_string())])
    }

    /// Answer successive GET requests with `responses` in order; the last repeats
    pub fn on_get_sequence(self, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.on("GET", path, responses)
    }

    /// Add a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, vec![(status, body.to_string())])
    }

    /// Add a response for DELETE requests matching the path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, vec![(status, body.to_string())])
    }

    fn on(self, method: &str, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.lock()
            .responses
            .insert((method.to_string(), path.to_string()), responses.into());
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Number of requests received for an exact method and path
    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|(m, p, _)| m == method && p == path)
            .count()
    }

    /// Query strings of the requests received for an exact method and path
    pub fn queries(&self, method: &str, path: &str) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .filter(|(m, p, _)| m == method && p == path)
            .map(|(_, _, q)| q.clone().unwrap_or_default())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    fn find_response(&self, method: &str, path: &str, query: Option<&str>) -> Option<(u16, String)> {
        let mut state = self.lock();
        state
            .requests
            .push((method.to_string(), path.to_string(), query.map(str::to_string)));

        let exact = (method.to_string(), path.to_string());
        let route = if state.responses.contains_key(&exact) {
            exact
        } else {
            // Longest whole-segment prefix, so /api/v1/namespaces answers /api/v1/namespaces/foo
            state
                .responses
                .keys()
                .filter(|(m, p)| m == method && is_segment_prefix(p, path))
                .max_by_key(|(_, p)| p.len())
                .cloned()?
        };

        let queue = state.responses.get_mut(&route)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix.trim_end_matches('/')) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let response = self.find_response(&method, req.uri().path(), req.uri().query());

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| {
                // Default 404 for unmatched requests
                (404, not_found_json("resource", "unknown"))
            });
            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))?;
            Ok(response)
        })
    }
}

/// API path of a single StatefulSet
pub fn stateful_set_path(namespace: &str, name: &str) -> String {
    format!("{}/{}", stateful_sets_path(namespace), name)
}

/// API path of the StatefulSet collection in a namespace
pub fn stateful_sets_path(namespace: &str) -> String {
    format!("/apis/apps/v1/namespaces/{}/statefulsets", namespace)
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

fn stateful_set_value(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    ready_replicas: i32,
) -> serde_json::Value {
    let mut spec = serde_json::json!({
        "serviceName": name,
        "selector": { "matchLabels": { "app": name } },
        "template": {
            "metadata": { "labels": { "app": name } },
            "spec": { "containers": [{ "name": name, "image": "nginx:1.15.7" }] }
        }
    });
    if let Some(replicas) = replicas {
        spec["replicas"] = replicas.into();
    }

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": { "app": name }
        },
        "spec": spec,
        "status": {
            "replicas": replicas.unwrap_or(1),
            "readyReplicas": ready_replicas
        }
    })
}

/// Create a mock StatefulSet JSON response; `replicas: None` leaves spec.replicas unset
pub fn stateful_set_json(
    namespace: &str,
    name: &str,
    replicas: Option<i32>,
    ready_replicas: i32,
) -> String {
    stateful_set_value(namespace, name, replicas, ready_replicas).to_string()
}

/// Create a mock StatefulSetList JSON response holding fully ready sets with the given names
pub fn stateful_set_list_json(namespace: &str, names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| stateful_set_value(namespace, name, Some(1), 1))
        .collect();

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSetList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

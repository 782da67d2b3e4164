//! Integration tests for Meal Planner.
//!
//! Every test runs against the real router backed by the in-memory store,
//! so no database is needed:
//!
//! ```bash
//! cargo test -p meal-planner-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `meal_plan_api` - Meal plan endpoint
//! - `recipes_api` - Recipe listing, detail and deletion
//! - `shopping_list_api` - Shopping list display, creation and deletion
//! - `views` - Client views against a server on a real TCP listener

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use tower::ServiceExt;

use meal_planner_client::HttpApi;
use meal_planner_server::config::ServerConfig;
use meal_planner_server::db::MemoryStore;
use meal_planner_server::state::AppState;

/// A router wired to a fresh in-memory store.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

/// A response with its body decoded.
///
/// Bodies that are not JSON (e.g. the plain `ok` of `/health`) are kept as
/// [`Value::String`].
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the app over an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the test configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        let config = ServerConfig::from_lookup(|key| {
            (key == "MEAL_PLANNER_STORAGE").then(|| "memory".to_string())
        })
        .expect("memory configuration is valid");
        let store = Arc::new(MemoryStore::new());
        let router = meal_planner_server::app(AppState::new(config, store.clone()));

        Self { store, router }
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body is readable");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a request with a raw JSON body.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is invalid.
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .expect("request is valid");
        self.send(request).await
    }

    /// Send a request with a JSON body.
    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.send_raw(method, uri, &body.to_string()).await
    }

    /// Send a request without a body.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is invalid.
    pub async fn send_empty(&self, method: Method, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request is valid");
        self.send(request).await
    }

    /// Serve the app on an ephemeral local port and return its base URL.
    ///
    /// The server runs until the test's runtime shuts down.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener has an address");
        let router = self.router.clone();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                panic!("test server failed: {e}");
            }
        });

        format!("http://{addr}")
    }

    /// Serve the app and return a client pointed at it.
    ///
    /// The client ignores proxy settings from the environment.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started or the client cannot be built.
    pub async fn spawn_client(&self) -> HttpApi {
        let base_url = self.spawn().await;
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("HTTP client builds");
        HttpApi::with_client(&base_url, client).expect("base URL is valid")
    }
}

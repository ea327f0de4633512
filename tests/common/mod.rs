#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! These tests use the REAL routes and state against a live PostgreSQL and
//! Redis. A single [`TestApp`] instance is shared across all tests via
//! [`shared_app`].
//!
//! ## Runtime Safety
//!
//! The shared `TestApp` is initialized on a long-lived, multi-threaded Tokio
//! runtime that outlives any individual test runtime. Pool and Redis
//! connections opened on one `#[tokio::test]` runtime become invalid when
//! that runtime shuts down, so every test body runs on the shared runtime
//! via [`run_test`].

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use agrinews::config::Config;
use agrinews::state::AppState;
use agrinews::{routes, session};

/// Shared Tokio runtime that outlives all individual test runtimes.
pub static SHARED_RT: std::sync::LazyLock<tokio::runtime::Runtime> =
    std::sync::LazyLock::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build shared test runtime")
    });

/// Global shared test app, initialized once on the shared runtime.
static SHARED_APP: std::sync::OnceLock<TestApp> = std::sync::OnceLock::new();

/// Get a reference to the shared [`TestApp`].
pub async fn shared_app() -> &'static TestApp {
    SHARED_APP.get_or_init(|| {
        // Initialize on the shared runtime's handle inside a separate OS
        // thread to avoid nested block_on.
        let handle = SHARED_RT.handle().clone();
        std::thread::spawn(move || handle.block_on(TestApp::new()))
            .join()
            .expect("TestApp init thread panicked")
    })
}

/// Run an async test body on [`SHARED_RT`].
pub fn run_test<F: std::future::Future<Output = ()> + Send>(f: F) {
    SHARED_RT.block_on(f);
}

/// Test application wrapper using the real router and state.
pub struct TestApp {
    router: Router,
    pub db: PgPool,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with full initialization.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let config = Config::from_env().expect("Failed to load config");

        let state = AppState::new(&config)
            .await
            .expect("Failed to initialize AppState");

        let db = state.db().clone();

        let session_layer = session::create_session_layer(
            &config.redis_url,
            tower_sessions::cookie::SameSite::Strict,
        )
        .await
        .expect("Failed to create session layer");

        // Must match the router assembled in main.rs.
        let router = Router::new()
            .merge(routes::auth::router())
            .merge(routes::profile::router())
            .merge(routes::blog::router())
            .merge(routes::research::router())
            .merge(routes::admin::router())
            .merge(routes::news::router())
            .merge(routes::newsletter::router())
            .merge(routes::file::router())
            .merge(routes::health::router())
            .layer(session_layer)
            .with_state(state.clone());

        Self { router, db, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request with cookies from a previous response.
    pub async fn request_with_cookies(
        &self,
        mut request: Request<Body>,
        cookies: &str,
    ) -> Response {
        if !cookies.is_empty() {
            request.headers_mut().insert(
                header::COOKIE,
                cookies.parse().expect("Invalid cookie header"),
            );
        }
        self.request(request).await
    }

    /// Register a fresh account and return its email and session cookies.
    ///
    /// Each call uses a unique email so parallel tests never collide.
    pub async fn register(&self, password: &str) -> (String, String) {
        let email = format!("user-{}@example.com", Uuid::now_v7().simple());

        let response = self
            .request(json_request(
                "POST",
                "/api/auth/register",
                &serde_json::json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "registration failed");

        let cookies = extract_cookies(&response);
        (email, cookies)
    }

    /// Register a fresh account and promote it to admin.
    pub async fn register_admin(&self, password: &str) -> (String, String) {
        let (email, cookies) = self.register(password).await;

        sqlx::query("UPDATE profiles SET role = 'admin' WHERE email = $1")
            .bind(&email)
            .execute(&self.db)
            .await
            .expect("Failed to promote test admin");

        // The profile is re-fetched per request, so the existing session
        // picks up the new role immediately.
        (email, cookies)
    }
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Extract session cookies from a response's Set-Cookie headers.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

//! Integration tests for the StepStyle storefront.
//!
//! Tests drive the real router in process with `tower::ServiceExt::oneshot`
//! - no network, no running server. The [`TestApp`] helper carries the
//! session cookie across requests so a test behaves like one visitor's
//! browsing session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stepstyle-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use stepstyle_storefront::catalog::Catalog;
use stepstyle_storefront::config::StorefrontConfig;
use stepstyle_storefront::state::AppState;
use stepstyle_storefront::{middleware, routes};

/// A response captured from the in-process router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is valid JSON")
    }
}

/// One visitor's browsing session against the storefront.
pub struct TestApp {
    router: Router,
    cookie: Option<HeaderValue>,
}

impl TestApp {
    /// Build the storefront exactly as `main` does, with the demo catalog.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::default();
        let state = AppState::new(config.clone(), Catalog::demo());

        let router = Router::new()
            .merge(routes::routes())
            .layer(middleware::create_session_layer(&config))
            .with_state(state);

        Self {
            router,
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.clone());
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a POST with a form-urlencoded body like an HTMX form post.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.clone());
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();

        // Keep the session cookie so the next request is the same visitor.
        if let Some(set_cookie) = headers.get(SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or(raw);
            self.cookie = Some(HeaderValue::from_str(pair).unwrap());
        }

        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the first `line_id` out of a rendered popup fragment.
#[must_use]
pub fn first_line_id(popup_html: &str) -> Option<i32> {
    let rest = popup_html.split("\"line_id\": ").nth(1)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

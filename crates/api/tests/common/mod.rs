//! Test harness driving the router against an in-memory database.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tally_api::{AppState, create_router, middleware::FixedWindowRateLimiter};
use tally_db::migration::{Migrator, MigratorTrait};
use tally_shared::types::{Currency, UserId};
use tally_shared::{JwtConfig, JwtService};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_rate_limit(1_000).await
    }

    pub async fn with_rate_limit(max_requests: u32) -> Self {
        let db = tally_db::connect_with_pool("sqlite::memory:", 1, 1)
            .await
            .expect("Failed to connect to database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let jwt = Arc::new(JwtService::new(JwtConfig {
            secret: "api-test-secret".to_string(),
            access_token_expires_secs: 900,
        }));

        let state = AppState {
            db: Arc::new(db),
            jwt_service: Arc::clone(&jwt),
            rate_limiter: Arc::new(FixedWindowRateLimiter::new(
                max_requests,
                Duration::from_secs(60),
            )),
        };

        Self {
            router: create_router(state),
            jwt,
        }
    }

    pub fn token(&self, user_id: UserId, currency: Currency) -> String {
        self.jwt
            .generate_access_token(user_id, currency)
            .expect("Failed to mint token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value, axum::http::HeaderMap) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json, headers)
    }
}

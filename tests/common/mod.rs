#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use menu_service::app::{build_router, build_state};
use menu_service::config::Config;
use menu_service::services::auth::TokenCodec;

/// 48 bytes once decoded.
pub const SECRET_B64: &str = "NDA0RTYzNTI2NjU1NkE1ODZFMzI3MjM1NzUzODc4MkY0MTNGNDQyODQ3MkI0QjYy";

pub fn config_with(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), SECRET_B64.to_string()),
        ("DIRECTORY_USERS".to_string(), "admin=ADMIN;alice=USER".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(move |key| vars.get(key).cloned()).unwrap()
}

pub fn app_with(config: &Config) -> Router {
    let state = build_state(config).unwrap();
    build_router(state, config)
}

pub fn app() -> Router {
    app_with(&config_with(&[]))
}

pub fn codec() -> TokenCodec {
    TokenCodec::new(&config_with(&[]).jwt_secret, 0)
}

pub fn token(subject: &str, roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    codec().issue(subject, &roles, 300).unwrap()
}

pub fn admin_token() -> String {
    token("admin", &["ADMIN"])
}

pub fn user_token() -> String {
    token("alice", &["USER"])
}

pub fn request(method: &str, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = send(app, req).await;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

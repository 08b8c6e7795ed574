//! Route handlers, one module per resource.

use std::sync::Arc;

use axum::Json;
use db::DbPool;
use serde_json::{json, Value};

use crate::auth::TokenKeys;

pub mod companies;
pub mod jobs;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, secret_key: &str) -> Self {
        Self {
            pool,
            tokens: Arc::new(TokenKeys::from_secret(secret_key)),
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST   /companies            (admin)
//!   GET    /companies
//!   GET    /companies/{handle}
//!   PATCH  /companies/{handle}   (admin)
//!   DELETE /companies/{handle}   (admin)
//!   POST   /jobs                 (admin)
//!   GET    /jobs
//!   GET    /jobs/{id}
//!   PATCH  /jobs/{id}            (admin)
//!   DELETE /jobs/{id}            (admin)
//!   GET    /health

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod query;
pub mod validate;

pub use error::ApiError;
pub use handlers::AppState;

use handlers::{companies, jobs};

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::get).patch(companies::update).delete(companies::delete),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route("/jobs/:id", get(jobs::get).patch(jobs::update).delete(jobs::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use super::AppState;
use db::models::{JobUpdate, NewJob};
use db::repository::jobs as job_repo;

use crate::{auth::AdminUser, error::ApiError, query::{self, QueryParams}, validate::{ValidJson, ValidPath}};

/// `POST /jobs` → 201 `{job}`
pub async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewJob>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let job = job_repo::create_job(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs?title=&minSalary=&hasEquity=` → `{jobs: [...]}`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = query::job_filter(&params)?;
    let jobs = job_repo::find_all_jobs(&state.pool, filter.as_ref()).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// `GET /jobs/:id` → `{job}`
pub async fn get(
    ValidPath(id): ValidPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let job = job_repo::get_job(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

/// `PATCH /jobs/:id` → `{job}`
///
/// Only `title`, `salary` and `equity` may change.
pub async fn update(
    _admin: AdminUser,
    ValidPath(id): ValidPath<i32>,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<JobUpdate>,
) -> Result<Json<Value>, ApiError> {
    let job = job_repo::update_job(&state.pool, id, &payload).await?;
    Ok(Json(json!({ "job": job })))
}

/// `DELETE /jobs/:id` → `{deleted: "Job <id>"}`
pub async fn delete(
    _admin: AdminUser,
    ValidPath(id): ValidPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    job_repo::remove_job(&state.pool, id).await?;
    Ok(Json(json!({ "deleted": format!("Job {id}") })))
}

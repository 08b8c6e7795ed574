use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use super::AppState;
use db::models::{CompanyUpdate, NewCompany};
use db::repository::companies as company_repo;

use crate::{auth::AdminUser, error::ApiError, query::{self, QueryParams}, validate::{ValidJson, ValidPath}};

/// `POST /companies` → 201 `{company}`
pub async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewCompany>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let company = company_repo::create_company(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `GET /companies?name=&minEmployees=&maxEmployees=` → `{companies: [...]}`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = query::company_filter(&params)?;
    let companies = company_repo::find_all_companies(&state.pool, filter.as_ref()).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/:handle` → `{company: {..., jobs: [...]}}`
pub async fn get(
    ValidPath(handle): ValidPath<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let company = company_repo::get_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `PATCH /companies/:handle` → `{company}`
pub async fn update(
    _admin: AdminUser,
    ValidPath(handle): ValidPath<String>,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CompanyUpdate>,
) -> Result<Json<Value>, ApiError> {
    let company = company_repo::update_company(&state.pool, &handle, &payload).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/:handle` → `{deleted: handle}`
pub async fn delete(
    _admin: AdminUser,
    ValidPath(handle): ValidPath<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    company_repo::remove_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}

//! Request validation.
//!
//! [`ValidJson`] replaces axum's `Json` for request bodies: malformed JSON,
//! unknown fields and failed field checks all become a 400 with every
//! problem listed, before a handler runs. [`ValidPath`] does the same for
//! path segments such as a non-numeric job id.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use db::models::{CompanyUpdate, JobUpdate, NewCompany, NewJob};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Longest handle the `companies` table accepts.
const MAX_HANDLE_LEN: usize = 25;

/// Field-level checks on a deserialized request body.
pub trait Validate {
    /// Every failed check, empty when the body is acceptable.
    fn problems(&self) -> Vec<String>;
}

/// A JSON body that deserialized and passed [`Validate`].
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let problems = value.problems();
        if !problems.is_empty() {
            return Err(ApiError::BadRequest(problems.join("; ")));
        }
        Ok(Self(value))
    }
}

/// A path parameter that parsed as `T`; anything else is a 400 in the
/// usual error envelope.
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

fn non_empty(out: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(format!("{field} must not be empty"));
    }
}

fn non_negative(out: &mut Vec<String>, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        out.push(format!("{field} must be at least 0"));
    }
}

fn url(out: &mut Vec<String>, field: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !(v.starts_with("http://") || v.starts_with("https://")) {
            out.push(format!("{field} must be an http(s) URL"));
        }
    }
}

fn fraction(out: &mut Vec<String>, field: &str, value: Option<Decimal>) {
    if value.is_some_and(|v| v < Decimal::ZERO || v > Decimal::ONE) {
        out.push(format!("{field} must be between 0 and 1"));
    }
}

fn handle(out: &mut Vec<String>, value: &str) {
    non_empty(out, "handle", value);
    if value.chars().count() > MAX_HANDLE_LEN {
        out.push(format!("handle must be at most {MAX_HANDLE_LEN} characters"));
    }
    if value != value.to_lowercase() || value.chars().any(char::is_whitespace) {
        out.push("handle must be lowercase with no spaces".into());
    }
}

impl Validate for NewCompany {
    fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        handle(&mut out, &self.handle);
        non_empty(&mut out, "name", &self.name);
        non_negative(&mut out, "numEmployees", self.num_employees);
        url(&mut out, "logoUrl", self.logo_url.as_deref());
        out
    }
}

impl Validate for CompanyUpdate {
    fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            non_empty(&mut out, "name", name);
        }
        non_negative(&mut out, "numEmployees", self.num_employees);
        url(&mut out, "logoUrl", self.logo_url.as_deref());
        out
    }
}

impl Validate for NewJob {
    fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        non_empty(&mut out, "title", &self.title);
        non_negative(&mut out, "salary", self.salary);
        fraction(&mut out, "equity", self.equity);
        non_empty(&mut out, "companyHandle", &self.company_handle);
        out
    }
}

impl Validate for JobUpdate {
    fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(title) = &self.title {
            non_empty(&mut out, "title", title);
        }
        non_negative(&mut out, "salary", self.salary);
        fraction(&mut out, "equity", self.equity);
        out
    }
}

//! Query-string parsing for the listing routes.
//!
//! The filter compilers in `db` skip names they don't know, so any term
//! outside a resource's recognized set has to be rejected here.

use std::collections::HashMap;

use db::models::{CompanyFilter, JobFilter};
use db::repository::{companies, jobs};
use db::sql::FilterSpec;

use crate::error::ApiError;

pub type QueryParams = HashMap<String, String>;

fn reject_unrecognized(params: &QueryParams, spec: &FilterSpec) -> Result<(), ApiError> {
    let unknown = params.keys().any(|k| !spec.term_names().any(|name| name == k.as_str()));
    if unknown {
        return Err(ApiError::BadRequest("Invalid query string parameters".into()));
    }
    Ok(())
}

/// Parse a non-negative integer term.
fn count(params: &QueryParams, name: &str) -> Result<Option<i32>, ApiError> {
    params
        .get(name)
        .map(|raw| match raw.trim().parse::<i32>() {
            Ok(n) if n >= 0 => Ok(n),
            _ => Err(ApiError::BadRequest(format!("{name} must be a non-negative integer"))),
        })
        .transpose()
}

/// `None` when no terms were given at all.
pub fn company_filter(params: &QueryParams) -> Result<Option<CompanyFilter>, ApiError> {
    if params.is_empty() {
        return Ok(None);
    }
    reject_unrecognized(params, &companies::FILTER)?;

    Ok(Some(CompanyFilter {
        name: params.get("name").cloned(),
        min_employees: count(params, "minEmployees")?,
        max_employees: count(params, "maxEmployees")?,
    }))
}

/// `None` when no terms were given at all. `hasEquity` must be the literal
/// `true` or `false`.
pub fn job_filter(params: &QueryParams) -> Result<Option<JobFilter>, ApiError> {
    if params.is_empty() {
        return Ok(None);
    }
    reject_unrecognized(params, &jobs::FILTER)?;

    let has_equity = match params.get("hasEquity").map(String::as_str) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return Err(ApiError::BadRequest("hasEquity must be true or false".into())),
    };

    Ok(Some(JobFilter {
        title: params.get("title").cloned(),
        min_salary: count(params, "minSalary")?,
        has_equity,
    }))
}

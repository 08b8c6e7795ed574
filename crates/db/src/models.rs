//! Row structs that map 1-to-1 onto database tables, plus the request
//! shapes the repositories accept.
//!
//! Field names serialize in camelCase, which is what the HTTP layer emits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::sql::{FieldMap, SqlValue, TermMap};

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A persisted company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with every job that references it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CompanyDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub company: CompanyRow,
    /// Ordered by job id; empty when the company has no jobs.
    #[sqlx(json)]
    pub jobs: Vec<JobRow>,
}

/// Payload for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Sparse set of company fields to change. `handle` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    /// The present fields, keyed by their API names.
    pub fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(v) = &self.name {
            fields.insert("name".into(), v.as_str().into());
        }
        if let Some(v) = &self.description {
            fields.insert("description".into(), v.as_str().into());
        }
        if let Some(v) = self.num_employees {
            fields.insert("numEmployees".into(), v.into());
        }
        if let Some(v) = &self.logo_url {
            fields.insert("logoUrl".into(), v.as_str().into());
        }
        fields
    }
}

/// Search terms accepted by the company listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn to_terms(&self) -> TermMap {
        let mut terms = TermMap::new();
        if let Some(v) = &self.name {
            terms.insert("name".into(), v.as_str().into());
        }
        if let Some(v) = self.min_employees {
            terms.insert("minEmployees".into(), v.into());
        }
        if let Some(v) = self.max_employees {
            terms.insert("maxEmployees".into(), v.into());
        }
        terms
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Serialized as a decimal string, e.g. `"0.1"`.
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    #[serde(alias = "company_handle")]
    pub company_handle: String,
}

/// Sparse set of job fields to change. `id` and `companyHandle` are fixed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    pub fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(v) = &self.title {
            fields.insert("title".into(), v.as_str().into());
        }
        if let Some(v) = self.salary {
            fields.insert("salary".into(), v.into());
        }
        if let Some(v) = self.equity {
            fields.insert("equity".into(), SqlValue::Decimal(v));
        }
        fields
    }
}

/// Search terms accepted by the job listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn to_terms(&self) -> TermMap {
        let mut terms = TermMap::new();
        if let Some(v) = &self.title {
            terms.insert("title".into(), v.as_str().into());
        }
        if let Some(v) = self.min_salary {
            terms.insert("minSalary".into(), v.into());
        }
        if let Some(v) = self.has_equity {
            terms.insert("hasEquity".into(), v.into());
        }
        terms
    }
}

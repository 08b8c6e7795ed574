//! Job CRUD operations.
//!
//! Jobs have no natural key, so creation never checks for duplicates. The
//! owning company is fixed at creation time; updates only touch `title`,
//! `salary` and `equity`.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{
    DbError,
    models::{JobFilter, JobRow, JobUpdate, NewJob},
    sql::{compile_filter, compile_update, filter::no_validation, value::bind_all, Comparison, FilterSpec, FilterTerm, SqlValue},
};

const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Recognized search terms for [`find_all_jobs`].
pub const FILTER: FilterSpec = FilterSpec {
    terms: &[
        FilterTerm { name: "title", column: "title", comparison: Comparison::ContainsInsensitive },
        FilterTerm { name: "minSalary", column: "salary", comparison: Comparison::AtLeast },
        FilterTerm { name: "hasEquity", column: "equity", comparison: Comparison::PositiveWhen },
    ],
    validate: no_validation,
};

/// Insert a new job and return it with its assigned id.
///
/// Returns `DbError::InvalidInput` when `company_handle` names no company.
#[instrument(skip(pool, job), fields(company = %job.company_handle))]
pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, DbError> {
    let sql = format!(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, JobRow>(&sql)
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await
        .map_err(|e| match DbError::from(e) {
            e if e.is_foreign_key_violation() => {
                DbError::InvalidInput(format!("No company: {}", job.company_handle))
            }
            e => e,
        })?;

    Ok(row)
}

/// Build the listing query: every job ordered by title, optionally narrowed
/// by `filter`.
pub(crate) fn find_all_query(filter: Option<&JobFilter>) -> Result<(String, Vec<SqlValue>), DbError> {
    let terms = filter.map(JobFilter::to_terms);
    let clause = compile_filter(terms.as_ref(), &FILTER)?;

    Ok(match clause {
        Some(w) => (format!("SELECT {COLUMNS} FROM jobs {} ORDER BY title, id", w.sql), w.values),
        None => (format!("SELECT {COLUMNS} FROM jobs ORDER BY title, id"), Vec::new()),
    })
}

/// Return all jobs matching `filter`, ordered by title.
///
/// An empty result is reported as `DbError::NotFound`, filtered or not.
pub async fn find_all_jobs(pool: &PgPool, filter: Option<&JobFilter>) -> Result<Vec<JobRow>, DbError> {
    let (sql, values) = find_all_query(filter)?;
    debug!(%sql, params = values.len(), "listing jobs");

    let rows = bind_all(sqlx::query_as::<_, JobRow>(&sql), &values)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound("No jobs match those inputs".into()));
    }
    Ok(rows)
}

/// Fetch a single job by id.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
    let row = sqlx::query_as::<_, JobRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("No job with id: {id}")))?;

    Ok(row)
}

/// Apply a partial update to a job and return the stored result.
#[instrument(skip(pool, changes))]
pub async fn update_job(pool: &PgPool, id: i32, changes: &JobUpdate) -> Result<JobRow, DbError> {
    let update = compile_update(&changes.to_fields(), &[])?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {COLUMNS}",
        update.set_clause,
        update.next_placeholder(),
    );
    debug!(%sql, "updating job");

    let row = bind_all(sqlx::query_as::<_, JobRow>(&sql), &update.values)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("No job with id: {id}")))?;

    Ok(row)
}

/// Permanently delete a job by id.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_job(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("No job with id: {id}")));
    }

    Ok(())
}

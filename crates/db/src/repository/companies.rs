//! Company CRUD operations.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{
    DbError,
    models::{CompanyDetail, CompanyFilter, CompanyRow, CompanyUpdate, NewCompany},
    sql::{compile_filter, compile_update, value::bind_all, Comparison, FilterSpec, FilterTerm, SqlValue, TermMap},
};

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// API field name → column name, for fields whose names differ.
/// Postgres' default names for the `handle` primary key and `name` unique key.
const HANDLE_KEY: &str = "companies_pkey";
const NAME_KEY: &str = "companies_name_key";

const COLUMN_NAMES: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

/// Recognized search terms for [`find_all_companies`].
pub const FILTER: FilterSpec = FilterSpec {
    terms: &[
        FilterTerm { name: "name", column: "name", comparison: Comparison::ContainsInsensitive },
        FilterTerm { name: "minEmployees", column: "num_employees", comparison: Comparison::AtLeast },
        FilterTerm { name: "maxEmployees", column: "num_employees", comparison: Comparison::AtMost },
    ],
    validate: check_employee_range,
};

fn check_employee_range(terms: &TermMap) -> Result<(), DbError> {
    if let (Some(SqlValue::Int(min)), Some(SqlValue::Int(max))) =
        (terms.get("minEmployees"), terms.get("maxEmployees"))
    {
        if min > max {
            return Err(DbError::InvalidInput(
                "minEmployees can't be greater than maxEmployees".into(),
            ));
        }
    }
    Ok(())
}

/// Insert a new company.
///
/// Returns `DbError::Conflict` if the handle is already taken. The primary
/// key is what actually guarantees uniqueness; the lookup beforehand only
/// saves a round trip through a failed insert.
#[instrument(skip(pool, company), fields(handle = %company.handle))]
pub async fn create_company(pool: &PgPool, company: &NewCompany) -> Result<CompanyRow, DbError> {
    let duplicate = || DbError::Conflict(format!("Duplicate company: {}", company.handle));

    let existing: Option<String> = sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
        .bind(&company.handle)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(duplicate());
    }

    let sql = format!(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, CompanyRow>(&sql)
        .bind(&company.handle)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.num_employees)
        .bind(&company.logo_url)
        .fetch_one(pool)
        .await
        .map_err(|e| match DbError::from(e) {
            e if e.is_unique_violation() && e.constraint() == Some(HANDLE_KEY) => duplicate(),
            e if e.is_unique_violation() && e.constraint() == Some(NAME_KEY) => {
                DbError::Conflict(format!("Duplicate company name: {}", company.name))
            }
            e => e,
        })?;

    Ok(row)
}

/// Build the listing query: every company ordered by name, optionally
/// narrowed by `filter`.
pub(crate) fn find_all_query(filter: Option<&CompanyFilter>) -> Result<(String, Vec<SqlValue>), DbError> {
    let terms = filter.map(CompanyFilter::to_terms);
    let clause = compile_filter(terms.as_ref(), &FILTER)?;

    Ok(match clause {
        Some(w) => (format!("SELECT {COLUMNS} FROM companies {} ORDER BY name", w.sql), w.values),
        None => (format!("SELECT {COLUMNS} FROM companies ORDER BY name"), Vec::new()),
    })
}

/// Return all companies matching `filter`, ordered by name.
///
/// An empty result is reported as `DbError::NotFound`, filtered or not.
pub async fn find_all_companies(
    pool: &PgPool,
    filter: Option<&CompanyFilter>,
) -> Result<Vec<CompanyRow>, DbError> {
    let (sql, values) = find_all_query(filter)?;
    debug!(%sql, params = values.len(), "listing companies");

    let rows = bind_all(sqlx::query_as::<_, CompanyRow>(&sql), &values)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound("No companies match those inputs".into()));
    }
    Ok(rows)
}

/// Fetch a company and its jobs in a single joined query.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DbError> {
    let row = sqlx::query_as::<_, CompanyDetail>(
        r#"
        SELECT c.handle,
               c.name,
               c.description,
               c.num_employees,
               c.logo_url,
               COALESCE(
                   json_agg(
                       json_build_object(
                           'id', j.id,
                           'title', j.title,
                           'salary', j.salary,
                           'equity', j.equity::text,
                           'companyHandle', j.company_handle
                       )
                       ORDER BY j.id
                   ) FILTER (WHERE j.id IS NOT NULL),
                   '[]'
               ) AS jobs
        FROM companies AS c
        LEFT JOIN jobs AS j ON c.handle = j.company_handle
        WHERE c.handle = $1
        GROUP BY c.handle
        "#,
    )
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DbError::NotFound(format!("No company: {handle}")))?;

    Ok(row)
}

/// Apply a partial update to a company and return the stored result.
#[instrument(skip(pool, changes))]
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    changes: &CompanyUpdate,
) -> Result<CompanyRow, DbError> {
    let update = compile_update(&changes.to_fields(), COLUMN_NAMES)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {COLUMNS}",
        update.set_clause,
        update.next_placeholder(),
    );
    debug!(%sql, "updating company");

    let row = bind_all(sqlx::query_as::<_, CompanyRow>(&sql), &update.values)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("No company: {handle}")))?;

    Ok(row)
}

/// Permanently delete a company by handle. Its jobs go with it through the
/// foreign key's `ON DELETE CASCADE`.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_company(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("No company: {handle}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_listing_is_ordered_by_name() {
        let (sql, values) = find_all_query(None).unwrap();
        assert_eq!(sql, format!("SELECT {COLUMNS} FROM companies ORDER BY name"));
        assert!(values.is_empty());

        let (sql, _) = find_all_query(Some(&CompanyFilter::default())).unwrap();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn all_terms_compile_in_declared_order() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let (sql, values) = find_all_query(Some(&filter)).unwrap();

        assert!(sql.ends_with(
            "FROM companies WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3 ORDER BY name"
        ));
        assert_eq!(values, vec![SqlValue::from("%net%"), SqlValue::Int(10), SqlValue::Int(500)]);
    }

    #[test]
    fn inverted_employee_range_is_rejected() {
        let filter = CompanyFilter { min_employees: Some(10), max_employees: Some(5), ..Default::default() };
        let err = find_all_query(Some(&filter)).unwrap_err();

        assert!(matches!(
            err,
            DbError::InvalidInput(msg) if msg == "minEmployees can't be greater than maxEmployees"
        ));
    }

    #[test]
    fn equal_employee_bounds_are_allowed() {
        let filter = CompanyFilter { min_employees: Some(5), max_employees: Some(5), ..Default::default() };
        assert!(find_all_query(Some(&filter)).is_ok());
    }

    #[test]
    fn filter_recognizes_exactly_three_terms() {
        assert_eq!(FILTER.term_names().collect::<Vec<_>>(), vec!["name", "minEmployees", "maxEmployees"]);
    }

    #[tokio::test]
    async fn update_with_no_fields_fails_before_touching_the_store() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://unused@localhost/unused")
            .unwrap();

        let err = update_company(&pool, "c1", &CompanyUpdate::default()).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(msg) if msg == "No data"));
    }

    #[tokio::test]
    async fn inverted_range_fails_before_touching_the_store() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://unused@localhost/unused")
            .unwrap();
        let filter = CompanyFilter { min_employees: Some(10), max_employees: Some(5), ..Default::default() };

        let err = find_all_companies(&pool, Some(&filter)).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));
    }
}

//! Repository tests against a live Postgres.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, built from the
//! fixtures in `tests/fixtures/`. Run with
//! `DATABASE_URL=postgres://… cargo test -p db --features integration`.

#![cfg(feature = "integration")]

use db::models::{CompanyFilter, CompanyUpdate, JobFilter, JobUpdate, NewCompany, NewJob};
use db::repository::{companies, jobs};
use db::DbError;
use rust_decimal::Decimal;
use sqlx::PgPool;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn new_company(handle: &str, name: &str, num_employees: Option<i32>) -> NewCompany {
    NewCompany {
        handle: handle.into(),
        name: name.into(),
        description: None,
        num_employees,
        logo_url: None,
    }
}

// ============================================================
// companies
// ============================================================

#[sqlx::test(fixtures("schema"))]
async fn created_company_comes_back_with_no_jobs(pool: PgPool) {
    let created = companies::create_company(&pool, &new_company("c1", "C1", Some(5))).await.unwrap();
    assert_eq!(created.handle, "c1");
    assert_eq!(created.num_employees, Some(5));

    let detail = companies::get_company(&pool, "c1").await.unwrap();
    assert_eq!(detail.company, created);
    assert!(detail.jobs.is_empty());
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn duplicate_handle_is_a_conflict(pool: PgPool) {
    let err = companies::create_company(&pool, &new_company("c1", "Another", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict(msg) if msg == "Duplicate company: c1"));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn duplicate_name_is_reported_as_a_name_conflict(pool: PgPool) {
    let err = companies::create_company(&pool, &new_company("fresh", "C1", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict(msg) if msg == "Duplicate company name: C1"));
}

#[sqlx::test(fixtures("schema"))]
async fn empty_company_table_is_not_found(pool: PgPool) {
    let err = companies::find_all_companies(&pool, None).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn companies_are_listed_by_name(pool: PgPool) {
    companies::create_company(&pool, &new_company("a0", "A0", None)).await.unwrap();

    let rows = companies::find_all_companies(&pool, None).await.unwrap();
    let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A0", "C1", "C2", "C3"]);
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn company_filters_combine(pool: PgPool) {
    let filter = CompanyFilter { name: Some("c".into()), min_employees: Some(2), max_employees: Some(2) };
    let rows = companies::find_all_companies(&pool, Some(&filter)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].handle, "c2");

    let filter = CompanyFilter { name: Some("nope".into()), ..Default::default() };
    let err = companies::find_all_companies(&pool, Some(&filter)).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn name_filter_treats_wildcards_literally(pool: PgPool) {
    let filter = CompanyFilter { name: Some("%".into()), ..Default::default() };
    let err = companies::find_all_companies(&pool, Some(&filter)).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn company_detail_lists_its_jobs(pool: PgPool) {
    let detail = companies::get_company(&pool, "c1").await.unwrap();
    assert_eq!(detail.jobs.len(), 1);
    assert_eq!(detail.jobs[0].title, "j1");
    assert_eq!(detail.jobs[0].equity, Some(dec("0.1")));
    assert_eq!(detail.jobs[0].company_handle, "c1");
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn partial_company_update_leaves_other_fields(pool: PgPool) {
    let changes = CompanyUpdate { num_employees: Some(9), ..Default::default() };
    let updated = companies::update_company(&pool, "c1", &changes).await.unwrap();

    assert_eq!(updated.num_employees, Some(9));
    assert_eq!(updated.name, "C1");
    assert_eq!(updated.description.as_deref(), Some("Desc1"));
    assert_eq!(updated.logo_url.as_deref(), Some("http://c1.img"));

    let err = companies::update_company(&pool, "missing", &changes).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn removed_company_is_gone_with_its_jobs(pool: PgPool) {
    companies::remove_company(&pool, "c1").await.unwrap();

    let err = companies::get_company(&pool, "c1").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
    assert!(matches!(jobs::get_job(&pool, 1).await, Err(DbError::NotFound(_))));

    let err = companies::remove_company(&pool, "c1").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

// ============================================================
// jobs
// ============================================================

#[sqlx::test(fixtures("schema", "seed"))]
async fn created_job_gets_an_id(pool: PgPool) {
    let job = jobs::create_job(
        &pool,
        &NewJob { title: "newTitle".into(), salary: Some(100), equity: Some(dec("0.1")), company_handle: "c1".into() },
    )
    .await
    .unwrap();

    assert_eq!(job.id, 4);
    assert_eq!(jobs::get_job(&pool, 4).await.unwrap(), job);
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn job_for_unknown_company_is_invalid(pool: PgPool) {
    let err = jobs::create_job(
        &pool,
        &NewJob { title: "t".into(), salary: None, equity: None, company_handle: "nope".into() },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn job_filters_match_case_insensitively(pool: PgPool) {
    let filter = JobFilter { title: Some("J1".into()), ..Default::default() };
    let rows = jobs::find_all_jobs(&pool, Some(&filter)).await.unwrap();
    assert_eq!(rows.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1]);

    let filter = JobFilter { title: Some("J".into()), min_salary: Some(2), has_equity: None };
    let rows = jobs::find_all_jobs(&pool, Some(&filter)).await.unwrap();
    assert_eq!(rows.iter().map(|j| j.id).collect::<Vec<_>>(), vec![2, 3]);
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn has_equity_excludes_zero_equity(pool: PgPool) {
    let filter = JobFilter { has_equity: Some(true), ..Default::default() };
    let rows = jobs::find_all_jobs(&pool, Some(&filter)).await.unwrap();
    assert_eq!(rows.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 2]);

    let filter = JobFilter { has_equity: Some(false), ..Default::default() };
    assert_eq!(jobs::find_all_jobs(&pool, Some(&filter)).await.unwrap().len(), 3);
}

#[sqlx::test(fixtures("schema"))]
async fn empty_job_table_is_not_found(pool: PgPool) {
    let err = jobs::find_all_jobs(&pool, None).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn job_update_returns_new_record(pool: PgPool) {
    let changes = JobUpdate { title: Some("j222".into()), equity: Some(dec("0.222")), salary: None };
    let updated = jobs::update_job(&pool, 2, &changes).await.unwrap();

    assert_eq!(updated.title, "j222");
    assert_eq!(updated.salary, Some(2));
    assert_eq!(updated.equity, Some(dec("0.222")));
    assert_eq!(updated.company_handle, "c2");

    let err = jobs::update_job(&pool, 1000, &changes).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(msg) if msg == "No job with id: 1000"));
}

#[sqlx::test(fixtures("schema", "seed"))]
async fn removed_job_is_gone(pool: PgPool) {
    jobs::remove_job(&pool, 1).await.unwrap();

    let rows = jobs::find_all_jobs(&pool, None).await.unwrap();
    assert_eq!(rows.iter().map(|j| j.id).collect::<Vec<_>>(), vec![2, 3]);
    assert!(matches!(jobs::remove_job(&pool, 1).await, Err(DbError::NotFound(_))));
}

//! Repository functions — one function per database operation.
//!
//! Every function takes a `&PgPool` and returns a `Result<T, DbError>`.
//! Listing and update statements are assembled through [`crate::sql`].

pub mod companies;
pub mod jobs;

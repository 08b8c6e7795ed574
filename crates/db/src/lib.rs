//! `db` crate — persistence layer for companies and jobs.
//!
//! Provides a connection pool, typed row structs, the dynamic SQL compilers
//! and repository functions for both tables. No HTTP concerns live here.

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;
pub mod sql;

pub use error::DbError;
pub use pool::DbPool;

//! Dynamic SQL assembly shared by the repositories.
//!
//! Both compilers produce text containing only column names and `$n`
//! placeholders; the values travel separately as [`SqlValue`]s.

pub mod filter;
pub mod update;
pub mod value;

pub use filter::{compile_filter, Comparison, FilterSpec, FilterTerm, TermMap, WhereClause};
pub use update::{compile_update, FieldMap, PartialUpdate};
pub use value::SqlValue;

//! Table-driven `WHERE` clause compiler shared by every listing query.
//!
//! A resource describes its recognized filter terms once, as a static
//! [`FilterSpec`]. [`compile_filter`] walks that table in declared order and
//! emits one fragment per present term, joined with `AND`. Every value goes
//! through a positional placeholder; nothing is spliced into the SQL text.

use indexmap::IndexMap;

use crate::DbError;
use crate::sql::SqlValue;

/// Insertion-ordered term name → value mapping, as received from a caller.
pub type TermMap = IndexMap<String, SqlValue>;

/// How a term compares against its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Case-insensitive substring match (`ILIKE '%v%'`).
    ContainsInsensitive,
    /// `column >= v`
    AtLeast,
    /// `column <= v`
    AtMost,
    /// Boolean switch: `true` restricts to `column > 0`, `false` is a no-op.
    PositiveWhen,
}

/// One recognized filter term.
#[derive(Debug, Clone, Copy)]
pub struct FilterTerm {
    pub name: &'static str,
    pub column: &'static str,
    pub comparison: Comparison,
}

/// The recognized term set of one resource plus its consistency check.
#[derive(Clone, Copy)]
pub struct FilterSpec {
    pub terms: &'static [FilterTerm],
    /// Runs before any SQL is assembled.
    pub validate: fn(&TermMap) -> Result<(), DbError>,
}

impl FilterSpec {
    /// Names of the recognized terms, in declared order.
    pub fn term_names(&self) -> impl Iterator<Item = &'static str> {
        self.terms.iter().map(|t| t.name)
    }
}

/// Accepts every combination of terms.
pub fn no_validation(_: &TermMap) -> Result<(), DbError> {
    Ok(())
}

/// A compiled `WHERE …` clause and its placeholder values.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Compile `terms` against `spec`.
///
/// Returns `Ok(None)` when there is nothing to filter on: no terms at all,
/// or only terms that contribute no fragment. Terms outside `spec` are
/// skipped; rejecting them is the caller's job.
///
/// # Errors
/// - Whatever `spec.validate` reports.
/// - [`DbError::InvalidInput`] when a value has the wrong kind for its term.
pub fn compile_filter(terms: Option<&TermMap>, spec: &FilterSpec) -> Result<Option<WhereClause>, DbError> {
    let Some(terms) = terms.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    (spec.validate)(terms)?;

    let mut fragments = Vec::new();
    let mut values = Vec::new();

    for term in spec.terms {
        let Some(value) = terms.get(term.name) else {
            continue;
        };

        match (term.comparison, value) {
            (Comparison::ContainsInsensitive, SqlValue::Text(needle)) => {
                values.push(SqlValue::Text(format!("%{}%", escape_like(needle))));
                fragments.push(format!("{} ILIKE ${}", term.column, values.len()));
            }
            (Comparison::AtLeast | Comparison::AtMost, SqlValue::Int(_) | SqlValue::Decimal(_)) => {
                let op = if term.comparison == Comparison::AtLeast { ">=" } else { "<=" };
                values.push(value.clone());
                fragments.push(format!("{} {op} ${}", term.column, values.len()));
            }
            (Comparison::PositiveWhen, SqlValue::Bool(on)) => {
                if *on {
                    fragments.push(format!("{} > 0", term.column));
                }
            }
            (_, other) => {
                return Err(DbError::InvalidInput(format!(
                    "{} can't be a {} value",
                    term.name,
                    other.kind()
                )));
            }
        }
    }

    if fragments.is_empty() {
        return Ok(None);
    }

    Ok(Some(WhereClause {
        sql: format!("WHERE {}", fragments.join(" AND ")),
        values,
    }))
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

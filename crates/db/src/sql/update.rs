//! Partial-update compiler.
//!
//! Turns a sparse set of changed fields into the body of an `UPDATE … SET`
//! statement plus its positional parameters:
//!
//! ```text
//! {numEmployees: 9, name: "C1"}  with  [("numEmployees", "num_employees")]
//!   => "num_employees"=$1, "name"=$2     values = [9, "C1"]
//! ```

use indexmap::IndexMap;

use crate::DbError;
use crate::sql::SqlValue;

/// Insertion-ordered field name → new value mapping.
pub type FieldMap = IndexMap<String, SqlValue>;

/// A compiled `SET` clause and the values for its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_clause: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder number free for the row key of the `WHERE` clause.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Compile `fields` into a `SET` clause.
///
/// `columns` translates field names to column names; fields without an
/// entry are used verbatim. Placeholders follow the map's iteration order
/// starting at `$1`. Values are not type-checked here.
///
/// # Errors
/// [`DbError::InvalidInput`] when `fields` is empty.
pub fn compile_update(fields: &FieldMap, columns: &[(&str, &str)]) -> Result<PartialUpdate, DbError> {
    if fields.is_empty() {
        return Err(DbError::InvalidInput("No data".into()));
    }

    let set_clause = fields
        .keys()
        .enumerate()
        .map(|(idx, field)| {
            let column = columns
                .iter()
                .find(|(name, _)| *name == field.as_str())
                .map_or(field.as_str(), |(_, column)| *column);
            format!("\"{column}\"=${}", idx + 1)
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(PartialUpdate {
        set_clause,
        values: fields.values().cloned().collect(),
    })
}

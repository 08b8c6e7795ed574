//! Typed error type for the db crate.

use thiserror::Error;

/// SQLSTATE raised by Postgres for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised by Postgres for a foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Malformed input, inconsistent filter ranges or an empty update.
    #[error("{0}")]
    InvalidInput(String),

    /// A create collided with an existing unique key.
    #[error("{0}")]
    Conflict(String),

    /// Lookup target absent, or a listing matched no rows.
    #[error("{0}")]
    NotFound(String),
}

impl DbError {
    /// True when the underlying store rejected a write on a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        self.has_sqlstate(UNIQUE_VIOLATION)
    }

    /// True when the underlying store rejected a write on a foreign key.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.has_sqlstate(FOREIGN_KEY_VIOLATION)
    }

    /// Name of the constraint the store reported, if any.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Sqlx(sqlx::Error::Database(db)) => db.constraint(),
            _ => None,
        }
    }

    fn has_sqlstate(&self, code: &str) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(db)) => db.code().as_deref() == Some(code),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_display_their_message() {
        assert_eq!(DbError::NotFound("No company: c9".into()).to_string(), "No company: c9");
        assert_eq!(DbError::InvalidInput("No data".into()).to_string(), "No data");
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        let err = DbError::Sqlx(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(!DbError::Conflict("dup".into()).is_unique_violation());
        assert_eq!(err.constraint(), None);
    }
}

use crate::validation::ValidationErrors;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found: customer {0}")]
    NotFound(i32),

    /// The record was modified since the caller read it
    #[error("the object has been changed")]
    Changed,

    #[error("unknown field to order by: {0:?}")]
    UnknownOrderField(String),

    #[error("Timed out during {operation}")]
    Timeout { operation: &'static str },

    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn storage(operation: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Map a sqlx error, recognising serialization failures as lost races
    pub fn database(operation: impl Into<String>, error: sqlx::Error) -> Self {
        if is_serialization_failure(&error) {
            return Self::Changed;
        }
        Self::storage(operation, error)
    }

    /// Only `Changed` is worth retrying, after the caller refetches
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Changed)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

const SERIALIZATION_FAILURE: &str = "40001";

fn is_serialization_failure(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE)
}

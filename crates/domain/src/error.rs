//! Common error types used across the workspace.
//!
//! Adapters report raw store faults as [`KaddemError::Storage`]. The
//! application layer re-raises them as [`KaddemError::OperationFailed`],
//! naming the operation that failed, while validation and not-found errors
//! pass through untouched.

use std::error::Error as StdError;

/// Boxed, thread-safe error used as the source of store faults.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error for every kaddem operation.
#[derive(Debug, thiserror::Error)]
pub enum KaddemError {
    /// An input precondition was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced identifier does not exist in its store.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A raw fault reported by a storage adapter.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// A store fault surfaced by an application operation.
    #[error("{operation}")]
    OperationFailed {
        /// Human-readable description of the failed operation and its ids.
        operation: String,
        #[source]
        source: BoxError,
    },
}

impl KaddemError {
    /// Wrap an adapter error as a [`KaddemError::Storage`].
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }

    /// Turn a raw [`Storage`](Self::Storage) fault into an
    /// [`OperationFailed`](Self::OperationFailed) carrying `operation`.
    ///
    /// Every other kind is returned unchanged.
    #[must_use]
    pub fn context(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Storage(source) => Self::OperationFailed {
                operation: operation.into(),
                source,
            },
            other => other,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("last name must not be empty")]
    EmptyLastName,

    #[error("first name must not be empty")]
    EmptyFirstName,

    /// A new record already carries a store-assigned identifier.
    #[error("identifier {0} is assigned by the store and must not be set on creation")]
    IdentifierAlreadyAssigned(i64),

    /// An existing record is missing its identifier.
    #[error("identifier is required")]
    MissingIdentifier,

    #[error("contract period is required")]
    MissingContractPeriod,

    #[error("contract ends before it starts")]
    InvalidContractPeriod,
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found with ID: {id}")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Student"`).
    pub entity: &'static str,
    pub id: String,
}

/// A stored or submitted value does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct Boom;

    #[test]
    fn should_convert_storage_into_operation_failed_when_context_added() {
        let err = KaddemError::storage(Boom).context("Failed to retrieve students");
        match err {
            KaddemError::OperationFailed { operation, source } => {
                assert_eq!(operation, "Failed to retrieve students");
                assert_eq!(source.to_string(), "disk on fire");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_keep_not_found_when_context_added() {
        let err = KaddemError::from(NotFoundError {
            entity: "Student",
            id: "7".to_string(),
        })
        .context("Failed to retrieve student 7");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Student not found with ID: 7");
    }

    #[test]
    fn should_keep_validation_when_context_added() {
        let err = KaddemError::from(ValidationError::EmptyLastName).context("Failed to add student");
        assert!(matches!(
            err,
            KaddemError::Validation(ValidationError::EmptyLastName)
        ));
    }

    #[test]
    fn should_expose_source_chain_for_operation_failed() {
        let err = KaddemError::storage(Boom).context("Failed to delete student 1");
        let source = StdError::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk on fire"));
    }
}

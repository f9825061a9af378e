use std::time::Duration;

use comex_catalog::FieldError;
use uuid::Uuid;

use crate::store::BoxedStoreError;

/// Error taxonomy for the catalog core. Every failure path a caller
/// can hit is distinguishable by kind.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Field-level input failures. Resolved before any write; never
    /// reaches the store.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Store-side failure with the opaque cause preserved.
    #[error("store error: {source}")]
    Store {
        #[source]
        source: BoxedStoreError,
    },

    /// A category with this code already exists.
    #[error("category code already exists: {0}")]
    CodeConflict(String),

    /// Row absent. Read paths on `dimensoes` treat this as a valid
    /// empty state; update paths surface it.
    #[error("{collection} row not found: {id}")]
    NotFound {
        collection: &'static str,
        id: Uuid,
    },

    /// A dimension write failed during aggregate creation and the
    /// compensating product delete failed too: an orphan product is
    /// now in the store. Both causes are carried.
    #[error("rollback failed: dimension write failed ({write}); compensating delete failed ({rollback})")]
    RollbackFailed {
        write: BoxedStoreError,
        rollback: BoxedStoreError,
    },

    /// The product patch of an aggregate update was applied but the
    /// dimension write failed, leaving the dimension stale.
    #[error("product {product_id} patched but dimension update failed: {dimension}")]
    PartialUpdate {
        product_id: Uuid,
        #[source]
        dimension: BoxedStoreError,
    },
}

impl CatalogError {
    pub fn store(source: BoxedStoreError) -> Self {
        Self::Store { source }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A store call outlived its deadline. Boxed into `CatalogError::Store`.
#[derive(Debug, thiserror::Error)]
#[error("store call exceeded its {0:?} deadline")]
pub struct DeadlineExceeded(pub Duration);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_failed_message_names_both_causes() {
        let err = CatalogError::RollbackFailed {
            write: "dimension insert refused".into(),
            rollback: "delete timed out".into(),
        };
        let message = err.to_string();
        assert!(message.contains("dimension insert refused"));
        assert!(message.contains("delete timed out"));
    }

    #[test]
    fn deadline_error_is_a_store_error() {
        let err = CatalogError::store(Box::new(DeadlineExceeded(Duration::from_secs(5))));
        assert!(matches!(err, CatalogError::Store { .. }));
        assert!(err.to_string().contains("deadline"));
    }
}

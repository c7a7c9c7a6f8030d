use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found: {0}")]
    NotFound(i64),

    /// A write referenced a sub-category or currency that does not exist.
    /// Raised inside the store transaction, so it also covers the race where
    /// an association disappears between the service's existence check and
    /// the insert.
    #[error("association not found: {0}")]
    AssociationNotFound(String),

    /// A version-checked write matched zero rows. Covers both a missing row
    /// and a stale version; callers re-read and retry with fresh data.
    #[error("edit conflict")]
    EditConflict,

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Anything else, wrapped with a short operation descriptor. The detail
    /// is for logs; transport adapters must not expose it verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

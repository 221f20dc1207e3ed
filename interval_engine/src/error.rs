//! Errors raised by the relation engine.

/// Relation engine errors.
///
/// Missing or partial temporal data is never an error; it makes relations
/// evaluate to `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("cannot check interval relation: {argument} interval identifier is missing")]
    Reference { argument: &'static str },
}

pub type RelationResult<T> = Result<T, RelationError>;

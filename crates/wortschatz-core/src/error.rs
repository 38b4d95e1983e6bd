/// Errors raised by [`SortedIndex`](crate::index::SortedIndex)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Positional writes would bypass the comparator
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),
}

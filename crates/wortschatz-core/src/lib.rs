pub mod collation;
pub mod dictionary;
pub mod entry;
pub mod error;
pub mod filter;
pub mod index;
pub mod preprocess;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use collation::Collation;
pub use entry::Entry;
pub use error::IndexError;
pub use filter::{FilterView, Projection};
pub use index::SortedIndex;
pub use types::{FilterParams, IndexChange, WordType};

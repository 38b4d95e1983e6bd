pub mod collation;

pub use collation::{GermanCollation, NO_TRANSLATION};

pub mod export;
pub mod store;

pub use export::{ExportError, TextExporter};
pub use store::JsonStore;

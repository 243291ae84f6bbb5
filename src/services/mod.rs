pub mod catalog;
pub mod ingest;

pub use catalog::{AskOutcome, CatalogError, CatalogService};
pub use ingest::{IngestError, IngestService, IngestSummary};

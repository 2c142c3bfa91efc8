//! Bulk ingestion of recipe payloads.

pub mod loader;
pub mod normalizer;
pub mod pipeline;

pub use loader::{load, LoadOutcome};
pub use normalizer::{normalize, parse_records};
pub use pipeline::{IngestError, IngestPipeline, IngestStats};

//! Recordgen engine: page fetching, effect execution and CSV export.
mod engine;
mod export;
mod fetch;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use export::{export_csv, records_to_csv, ExportError, ExportSummary, CSV_FILENAME, CSV_MIME};
pub use fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher, DEFAULT_ENDPOINT};
pub use types::{EngineEvent, FailureKind, FetchError};

use crate::{Epoch, PageRequest, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page; the result comes back as `Msg::PageLoaded` with the same epoch.
    FetchPage { epoch: Epoch, request: PageRequest },
    /// Serialize and save the given rows as CSV.
    ExportCsv { rows: Vec<Record> },
}

use crate::{Epoch, Record, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Written { path: String, rows: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub region: Region,
    pub error_count: u8,
    /// Seed sent to the service.
    pub seed: String,
    pub manual_seed: String,
    pub random_seed_active: bool,
    pub rows: Vec<RecordRowView>,
    pub row_count: usize,
    pub is_loading: bool,
    pub has_more: bool,
    pub export_enabled: bool,
    pub epoch: Epoch,
    pub next_page: u32,
    pub last_error: Option<String>,
    pub input_error: Option<String>,
    pub last_export: Option<ExportStatus>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    /// 1-based position in the table.
    pub number: usize,
    pub record: Record,
}

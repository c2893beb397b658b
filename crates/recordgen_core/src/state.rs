use std::fmt;

use crate::controller::LoadController;
use crate::scroll::ScrollTrigger;
use crate::view_model::{AppViewModel, ExportStatus, RecordRowView};
use crate::Record;

/// Identifies one lifetime of a [`LoadState`]; bumped on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Epoch(self.0 + 1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch#{}", self.0)
    }
}

/// Rows and cursor for the current epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState {
    pub(crate) rows: Vec<Record>,
    pub(crate) next_page: u32,
    pub(crate) is_loading: bool,
    pub(crate) has_more: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_page: 1,
            is_loading: false,
            has_more: true,
        }
    }
}

impl LoadState {
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Row count is a whole number of pages, except after a short final page.
    pub fn is_consistent(&self, batch_size: u32) -> bool {
        let full_pages = self.rows.len() % batch_size as usize == 0;
        if self.has_more {
            full_pages
        } else {
            // A short last page, or an empty final page right after full ones.
            self.next_page > 1
        }
    }
}

/// Broad class of a failed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Transport failure, timeout or non-success status.
    Network,
    /// The response was not a sequence of records.
    Protocol,
}

/// A failed page fetch as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub class: FailureClass,
    pub message: String,
}

impl PageFailure {
    pub fn new(class: FailureClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            FailureClass::Network => write!(f, "network error: {}", self.message),
            FailureClass::Protocol => write!(f, "protocol error: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    controller: LoadController,
    scroll: ScrollTrigger,
    input_error: Option<String>,
    last_export: Option<ExportStatus>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(batch_size: u32, scroll_threshold: f64) -> Self {
        Self {
            controller: LoadController::new(batch_size),
            scroll: ScrollTrigger::new(scroll_threshold),
            ..Self::default()
        }
    }

    pub fn controller(&self) -> &LoadController {
        &self.controller
    }

    pub(crate) fn controller_mut(&mut self) -> &mut LoadController {
        &mut self.controller
    }

    pub(crate) fn scroll(&self) -> &ScrollTrigger {
        &self.scroll
    }

    pub(crate) fn set_input_error(&mut self, error: Option<String>) {
        if self.input_error != error {
            self.input_error = error;
            self.dirty = true;
        }
    }

    pub(crate) fn set_last_export(&mut self, status: ExportStatus) {
        self.last_export = Some(status);
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let controller = &self.controller;
        let spec = controller.spec();
        let rows = controller
            .rows()
            .iter()
            .enumerate()
            .map(|(index, record)| RecordRowView {
                number: index + 1,
                record: record.clone(),
            })
            .collect::<Vec<_>>();
        AppViewModel {
            region: spec.region,
            error_count: spec.error_count,
            seed: spec.seed,
            manual_seed: controller.manual_seed().to_string(),
            random_seed_active: !controller.random_seed().is_empty(),
            row_count: rows.len(),
            rows,
            is_loading: controller.is_loading(),
            has_more: controller.has_more(),
            export_enabled: !controller.rows().is_empty(),
            epoch: controller.epoch(),
            next_page: controller.next_page(),
            last_error: controller.last_error().map(ToString::to_string),
            input_error: self.input_error.clone(),
            last_export: self.last_export.clone(),
            dirty: self.dirty,
        }
    }
}

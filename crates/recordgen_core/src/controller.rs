//! Load controller: the single owner of accumulated rows and paging flags.
//!
//! Every transition goes through one of the public operations below and
//! returns the effects the caller must run. Fetches are tagged with the
//! [`Epoch`] they were issued under; a completion whose epoch is no longer
//! current is dropped without touching the rows.
//!
//! There is no timeout here. A fetch that never completes keeps
//! `is_loading` set for the rest of the epoch; the engine bounds this with
//! request timeouts.

use engine_logging::{engine_debug, engine_info, engine_warn};
use rand::Rng;

use crate::seed::random_seed_token;
use crate::state::{Epoch, LoadState, PageFailure};
use crate::{Effect, PageRequest, QuerySpec, Record, Region};

/// Page length requested from the service unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadController {
    spec: QuerySpec,
    manual_seed: String,
    random_seed: String,
    batch_size: u32,
    epoch: Epoch,
    state: LoadState,
    last_error: Option<PageFailure>,
}

impl Default for LoadController {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl LoadController {
    /// Creates an idle controller. Nothing is fetched until the first
    /// [`LoadController::on_spec_changed`].
    pub fn new(batch_size: u32) -> Self {
        Self {
            spec: QuerySpec::default(),
            manual_seed: String::new(),
            random_seed: String::new(),
            batch_size: batch_size.max(1),
            epoch: Epoch::default(),
            state: LoadState::default(),
            last_error: None,
        }
    }

    pub fn spec(&self) -> QuerySpec {
        self.spec.clone()
    }

    pub fn rows(&self) -> &[Record] {
        self.state.rows()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn next_page(&self) -> u32 {
        self.state.next_page()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn manual_seed(&self) -> &str {
        &self.manual_seed
    }

    pub fn random_seed(&self) -> &str {
        &self.random_seed
    }

    pub fn last_error(&self) -> Option<&PageFailure> {
        self.last_error.as_ref()
    }

    /// Starts a new epoch for `spec` and requests its first page.
    ///
    /// A spec equal to the current one still resets, unless the current
    /// epoch already has a fetch in flight: that is a duplicate trigger.
    pub fn on_spec_changed(&mut self, spec: QuerySpec) -> Vec<Effect> {
        if spec == self.spec && self.state.is_loading {
            engine_debug!(
                "Ignoring duplicate spec change while {} is loading",
                self.epoch
            );
            return Vec::new();
        }

        self.spec = spec;
        self.epoch = self.epoch.next();
        self.state = LoadState::default();
        self.last_error = None;
        engine_info!(
            "Starting {} region={} errors={} seed={:?}",
            self.epoch,
            self.spec.region,
            self.spec.error_count,
            self.spec.seed
        );
        self.request_next_page()
    }

    /// Requests the next page of the current epoch, if one is due.
    pub fn request_next_page(&mut self) -> Vec<Effect> {
        if self.state.is_loading || !self.state.has_more {
            return Vec::new();
        }
        self.state.is_loading = true;
        let request = PageRequest {
            spec: self.spec.clone(),
            page: self.state.next_page,
            batch_size: self.batch_size,
        };
        engine_debug!("Requesting page {} for {}", request.page, self.epoch);
        vec![Effect::FetchPage {
            epoch: self.epoch,
            request,
        }]
    }

    /// Applies a finished fetch. Returns `false` when the result was stale
    /// and dropped.
    pub fn page_loaded(
        &mut self,
        epoch: Epoch,
        page: u32,
        result: Result<Vec<Record>, PageFailure>,
    ) -> bool {
        if epoch != self.epoch {
            engine_debug!(
                "Discarding page {} from stale {} (current {})",
                page,
                epoch,
                self.epoch
            );
            return false;
        }
        if !self.state.is_loading || page != self.state.next_page {
            engine_warn!(
                "Discarding unexpected page {} for {} (expected {})",
                page,
                epoch,
                self.state.next_page
            );
            return false;
        }

        self.state.is_loading = false;
        match result {
            Ok(records) => {
                if records.len() < self.batch_size as usize {
                    self.state.has_more = false;
                }
                engine_debug!(
                    "Page {} for {} returned {} records",
                    page,
                    epoch,
                    records.len()
                );
                self.state.rows.extend(records);
                self.state.next_page += 1;
                self.last_error = None;
            }
            Err(failure) => {
                engine_warn!("Fetching page {} for {} failed: {}", page, epoch, failure);
                self.last_error = Some(failure);
            }
        }
        true
    }

    /// Replaces the active random seed with a fresh token and reloads.
    ///
    /// The random seed takes precedence over the manually entered one.
    pub fn generate_random_seed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Effect> {
        self.random_seed = random_seed_token(rng);
        engine_info!("Generated random seed {}", self.random_seed);
        let spec = self.spec_from_inputs(self.spec.region, self.spec.error_count);
        self.on_spec_changed(spec)
    }

    pub fn set_region(&mut self, region: Region) -> Vec<Effect> {
        let spec = self.spec_from_inputs(region, self.spec.error_count);
        self.on_spec_changed(spec)
    }

    pub fn set_error_count(&mut self, error_count: u8) -> Vec<Effect> {
        let spec = self.spec_from_inputs(self.spec.region, error_count);
        self.on_spec_changed(spec)
    }

    pub fn set_manual_seed(&mut self, seed: impl Into<String>) -> Vec<Effect> {
        self.manual_seed = seed.into();
        let spec = self.spec_from_inputs(self.spec.region, self.spec.error_count);
        self.on_spec_changed(spec)
    }

    fn spec_from_inputs(&self, region: Region, error_count: u8) -> QuerySpec {
        let seed = if self.random_seed.is_empty() {
            &self.manual_seed
        } else {
            &self.random_seed
        };
        QuerySpec::new(region, error_count, seed.clone())
    }
}

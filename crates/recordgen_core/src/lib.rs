//! Recordgen core: pure paging state machine and view-model helpers.
mod controller;
mod effect;
mod msg;
mod query;
mod record;
mod scroll;
mod seed;
mod state;
mod update;
mod view_model;

pub use controller::{LoadController, DEFAULT_BATCH_SIZE};
pub use effect::Effect;
pub use msg::Msg;
pub use query::{PageRequest, QuerySpec, Region, SpecError, MAX_ERROR_COUNT};
pub use record::Record;
pub use scroll::{ScrollTrigger, ViewportGeometry, DEFAULT_SCROLL_THRESHOLD};
pub use seed::random_seed_token;
pub use state::{AppState, Epoch, FailureClass, LoadState, PageFailure};
pub use update::update;
pub use view_model::{AppViewModel, ExportStatus, RecordRowView};

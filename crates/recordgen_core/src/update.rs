use engine_logging::engine_warn;

use crate::{AppState, Effect, Msg, QuerySpec};

/// Applies a message to state and returns any effects.
///
/// Runs on a single dispatch loop, so each guard in the controller is checked
/// and set without interleaving.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let spec = state.controller().spec();
            reset(&mut state, |controller| controller.on_spec_changed(spec))
        }
        Msg::RegionSelected(region) => {
            reset(&mut state, |controller| controller.set_region(region))
        }
        Msg::ErrorCountChanged(raw) => match QuerySpec::parse_error_count(&raw) {
            Ok(error_count) => {
                state.set_input_error(None);
                reset(&mut state, |controller| {
                    controller.set_error_count(error_count)
                })
            }
            Err(err) => {
                engine_warn!("Rejected error count input: {}", err);
                state.set_input_error(Some(err.to_string()));
                Vec::new()
            }
        },
        Msg::SeedChanged(seed) => {
            reset(&mut state, |controller| controller.set_manual_seed(seed))
        }
        Msg::GenerateRandomSeedClicked => reset(&mut state, |controller| {
            controller.generate_random_seed(&mut rand::thread_rng())
        }),
        Msg::NextPageRequested => request_page(&mut state),
        Msg::ViewportChanged(geometry) => {
            if state.scroll().evaluate(geometry, state.controller()) {
                request_page(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded {
            epoch,
            page,
            result,
        } => {
            if state.controller_mut().page_loaded(epoch, page, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ExportClicked => {
            // Export stays disabled until at least one row is loaded.
            if state.controller().rows().is_empty() {
                Vec::new()
            } else {
                vec![Effect::ExportCsv {
                    rows: state.controller().rows().to_vec(),
                }]
            }
        }
        Msg::ExportFinished(status) => {
            state.set_last_export(status);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn reset<F>(state: &mut AppState, transition: F) -> Vec<Effect>
where
    F: FnOnce(&mut crate::LoadController) -> Vec<Effect>,
{
    let before = state.controller().epoch();
    let effects = transition(state.controller_mut());
    if state.controller().epoch() != before {
        state.mark_dirty();
    }
    effects
}

fn request_page(state: &mut AppState) -> Vec<Effect> {
    let effects = state.controller_mut().request_next_page();
    if !effects.is_empty() {
        state.mark_dirty();
    }
    effects
}

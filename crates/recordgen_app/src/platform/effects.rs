use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use recordgen_core::{Effect, ExportStatus, Msg, PageFailure};
use recordgen_engine::{export_csv, EngineError, EngineEvent, EngineHandle, FetchSettings};

use super::app::UiEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    output_dir: PathBuf,
    ui_tx: mpsc::Sender<UiEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        output_dir: PathBuf,
        ui_tx: mpsc::Sender<UiEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self {
            engine,
            output_dir,
            ui_tx,
        };
        runner.spawn_event_loop();
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { epoch, request } => {
                    engine_info!(
                        "FetchPage {} page={} region={} errors={}",
                        epoch,
                        request.page,
                        request.spec.region,
                        request.spec.error_count
                    );
                    self.engine.fetch_page(epoch, request);
                }
                Effect::ExportCsv { rows } => {
                    let status = match export_csv(&self.output_dir, &rows) {
                        Ok(summary) => {
                            engine_info!(
                                "Exported {} rows to {:?} ({})",
                                summary.row_count,
                                summary.output_path,
                                summary.mime
                            );
                            ExportStatus::Written {
                                path: summary.output_path.display().to_string(),
                                rows: summary.row_count,
                            }
                        }
                        Err(err) => {
                            engine_warn!("Export to {:?} failed: {}", self.output_dir, err);
                            ExportStatus::Failed(err.to_string())
                        }
                    };
                    let _ = self.ui_tx.send(UiEvent::Msg(Msg::ExportFinished(status)));
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let ui_tx = self.ui_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            let msg = match event {
                EngineEvent::PageFetched {
                    epoch,
                    page,
                    result,
                } => Msg::PageLoaded {
                    epoch,
                    page,
                    result: result.map_err(PageFailure::from),
                },
            };
            if ui_tx.send(UiEvent::Msg(msg)).is_err() {
                break;
            }
        });
    }
}

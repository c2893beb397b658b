use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::engine_debug;
use recordgen_core::{Epoch, PageRequest};
use thiserror::Error;

use crate::fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
use crate::{EngineEvent, FetchError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("http client setup failed: {0}")]
    Client(#[from] FetchError),
    #[error("async runtime failed to start: {0}")]
    Runtime(io::Error),
    #[error("engine thread failed to start: {0}")]
    Thread(io::Error),
}

enum EngineCommand {
    FetchPage { epoch: Epoch, request: PageRequest },
}

/// Runs page fetches on a background tokio runtime.
///
/// Fetches are never aborted. A fetch from an abandoned epoch still reports
/// back and is dropped by the state machine.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = ReqwestPageFetcher::new(settings)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("recordgen-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_page(&self, epoch: Epoch, request: PageRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchPage { epoch, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn PageFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage { epoch, request } => {
            engine_debug!("Fetching page {} for {}", request.page, epoch);
            let result = fetcher.fetch_page(&request).await;
            let _ = event_tx.send(EngineEvent::PageFetched {
                epoch,
                page: request.page,
                result,
            });
        }
    }
}

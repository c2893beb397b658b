use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use recordgen_core::{update, AppState, Epoch, Msg};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::constants::HELP_TEXT;
use super::ui::input::{parse_command, Input};
use super::ui::layout::Viewport;
use super::ui::render::render;

/// Everything the dispatch loop reacts to.
pub enum UiEvent {
    Input(Input),
    InputError(String),
    Msg(Msg),
    /// Stdin reached end of file.
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let destination = if config.log_to_file {
        LogDestination::default_file()
    } else {
        LogDestination::Terminal
    };
    engine_logging::initialize(destination, LevelFilter::Info);
    engine_info!("Starting with endpoint {}", config.endpoint);

    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
    let runner = EffectRunner::new(
        config.fetch_settings(),
        config.output_dir.clone(),
        ui_tx.clone(),
    )?;
    spawn_stdin_reader(ui_tx);

    let mut shell = Shell {
        state: AppState::with_settings(config.batch_size, config.scroll_threshold),
        viewport: Viewport::new(config.viewport_rows),
        runner,
        shown_epoch: Epoch::default(),
    };

    println!("{HELP_TEXT}");
    shell.dispatch(Msg::Started);

    while let Ok(event) = ui_rx.recv() {
        match event {
            UiEvent::Msg(msg) => shell.dispatch(msg),
            UiEvent::Input(Input::Msg(msg)) => shell.dispatch(msg),
            UiEvent::Input(Input::Scroll(lines)) => shell.scroll(lines),
            UiEvent::Input(Input::Show) => shell.redraw(),
            UiEvent::Input(Input::Help) => println!("{HELP_TEXT}"),
            UiEvent::Input(Input::Quit) | UiEvent::Closed => break,
            UiEvent::InputError(message) => eprintln!("{message}"),
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

struct Shell {
    state: AppState,
    viewport: Viewport,
    runner: EffectRunner,
    shown_epoch: Epoch,
}

impl Shell {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        let epoch = self.state.controller().epoch();
        if epoch != self.shown_epoch {
            self.shown_epoch = epoch;
            self.viewport.reset();
        }

        self.runner.run(effects);
        if was_dirty {
            self.redraw();
        }
    }

    fn scroll(&mut self, lines: Option<i64>) {
        let row_count = self.state.controller().rows().len();
        let delta = lines.unwrap_or(self.viewport.rows() as i64);
        self.viewport.scroll_by(delta, row_count);
        self.redraw();
        let geometry = self.viewport.geometry(row_count);
        self.dispatch(Msg::ViewportChanged(geometry));
    }

    fn redraw(&self) {
        let text = render(&self.state.view(), &self.viewport);
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

fn spawn_stdin_reader(ui_tx: mpsc::Sender<UiEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line) {
                Ok(Some(input)) => UiEvent::Input(input),
                Ok(None) => continue,
                Err(err) => UiEvent::InputError(err.to_string()),
            };
            if ui_tx.send(event).is_err() {
                return;
            }
        }
        let _ = ui_tx.send(UiEvent::Closed);
    });
}

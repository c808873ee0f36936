use std::io::{self, Stdout};
use std::sync::{mpsc, Arc};

use anyhow::Context;
use chat_core::{update, AppState, Msg};
use chat_engine::{
    ChatClient, Converter, EngineEvent, EngineHandle, EventSink, Html2MdConverter,
    ReqwestChatClient,
};
use chat_logging::{chat_debug, chat_error, chat_info, set_poll_cycle};

use super::config::ClientConfig;
use super::effects::{map_engine_event, map_messages, EffectRunner, EngineCommands};
use super::input::spawn_stdin_reader;
use super::ui::render::TerminalUi;
use super::ui::Ui;

/// Everything the controller loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    Core(Msg),
    Engine(EngineEvent),
    Quit,
}

/// Forwards engine reports into the controller's channel.
struct ControllerSink {
    tx: mpsc::Sender<ControllerEvent>,
}

impl EventSink for ControllerSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(ControllerEvent::Engine(event));
    }
}

/// Owns the state and turns incoming events into effects.
pub struct Controller<E: EngineCommands, U: Ui> {
    state: AppState,
    runner: EffectRunner<E, U>,
    converter: Box<dyn Converter>,
}

impl<E: EngineCommands, U: Ui> Controller<E, U> {
    pub fn new(state: AppState, runner: EffectRunner<E, U>, converter: Box<dyn Converter>) -> Self {
        Self {
            state,
            runner,
            converter,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn runner(&self) -> &EffectRunner<E, U> {
        &self.runner
    }

    /// Returns false once the loop should stop.
    pub fn handle(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::Quit => return false,
            ControllerEvent::Core(msg) => self.dispatch(msg),
            ControllerEvent::Engine(EngineEvent::Bootstrapped(result)) => {
                match result {
                    Ok(history) => {
                        chat_info!("history loaded: {} messages", history.len());
                        let messages = map_messages(history, self.converter.as_ref());
                        self.dispatch(Msg::HistoryLoaded(messages));
                    }
                    Err(err) => {
                        chat_error!("bootstrap failed: {}", err);
                        if let Err(io_err) = self
                            .runner
                            .ui_mut()
                            .show_info(&format!("could not load history: {err}"))
                        {
                            chat_debug!("terminal write failed: {}", io_err);
                        }
                    }
                }
                self.dispatch(Msg::Started);
            }
            ControllerEvent::Engine(event) => {
                if let Some(msg) = map_engine_event(event, self.converter.as_ref()) {
                    self.dispatch(msg);
                }
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        set_poll_cycle(self.state.poll().cycle());
        if self.state.consume_dirty() {
            chat_debug!("state changed: {:?}", self.state.view());
        }
        self.runner.run(effects);
    }
}

pub fn run_app(config: ClientConfig) -> anyhow::Result<()> {
    let client = ReqwestChatClient::new(config.engine_settings())
        .with_context(|| format!("cannot reach {}", config.server_url))?;
    if let Some(cookie) = config.session_cookie.as_deref() {
        client.add_cookie(cookie);
    }

    let (tx, rx) = mpsc::channel();
    let sink = Arc::new(ControllerSink { tx: tx.clone() });
    let client: Arc<dyn ChatClient> = Arc::new(client);
    let engine = EngineHandle::with_client(client, sink).context("failed to start engine")?;

    spawn_stdin_reader(tx).context("failed to start input reader")?;
    engine.bootstrap(config.credentials());

    let state = AppState::with_settings(
        config.core_settings(),
        config.title.clone(),
        config.viewport_rows,
    );
    let ui: TerminalUi<Stdout> = TerminalUi::new(io::stdout());
    let runner = EffectRunner::new(engine, ui);
    let mut controller = Controller::new(state, runner, Box::new(Html2MdConverter));

    while let Ok(event) = rx.recv() {
        if !controller.handle(event) {
            break;
        }
    }
    chat_info!("shutting down");
    Ok(())
}

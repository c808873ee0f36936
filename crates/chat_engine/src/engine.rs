use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::{chat_trace, chat_warn};

use crate::client::{ChatClient, ReqwestChatClient};
use crate::{ClientError, ClientSettings, Credentials, EngineEvent, FailureKind, Wake};

/// Receives everything the engine reports back.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

enum EngineCommand {
    Bootstrap { login: Option<Credentials> },
    FetchUpdates { cursor: Option<String> },
    PostMessage { fields: Vec<(String, String)> },
    Schedule { after: Duration, wake: Wake },
}

/// Runs requests and timers on a background tokio runtime.
///
/// Commands never block the caller. Ordering between requests is the
/// caller's business: the engine runs whatever it is handed.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let client = Arc::new(ReqwestChatClient::new(settings)?);
        Self::with_client(client, sink)
    }

    pub fn with_client(
        client: Arc<dyn ChatClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| ClientError::new(FailureKind::Runtime, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("chat-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), sink.as_ref(), command).await;
                    });
                }
            })
            .map_err(|err| ClientError::new(FailureKind::Runtime, err.to_string()))?;

        Ok(Self { cmd_tx })
    }

    /// Logs in when credentials are given, then loads the page history.
    pub fn bootstrap(&self, login: Option<Credentials>) {
        self.send(EngineCommand::Bootstrap { login });
    }

    pub fn fetch_updates(&self, cursor: Option<String>) {
        self.send(EngineCommand::FetchUpdates { cursor });
    }

    pub fn post_message(&self, fields: Vec<(String, String)>) {
        self.send(EngineCommand::PostMessage { fields });
    }

    /// Emits `EngineEvent::TimerFired(wake)` once `after` has elapsed.
    pub fn schedule(&self, after: Duration, wake: Wake) {
        self.send(EngineCommand::Schedule { after, wake });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(client: &dyn ChatClient, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::Bootstrap { login } => {
            let result = bootstrap(client, login).await;
            sink.emit(EngineEvent::Bootstrapped(result));
        }
        EngineCommand::FetchUpdates { cursor } => {
            chat_trace!("fetching updates after {:?}", cursor);
            let result = client.fetch_updates(cursor.as_deref()).await;
            sink.emit(EngineEvent::UpdatesFetched(result));
        }
        EngineCommand::PostMessage { fields } => {
            let result = client.post_message(&fields).await;
            sink.emit(EngineEvent::MessagePosted(result));
        }
        EngineCommand::Schedule { after, wake } => {
            // A zero delay still yields to the runtime before firing.
            tokio::time::sleep(after).await;
            sink.emit(EngineEvent::TimerFired(wake));
        }
    }
}

async fn bootstrap(
    client: &dyn ChatClient,
    login: Option<Credentials>,
) -> Result<Vec<crate::ChatMessage>, ClientError> {
    if let Some(credentials) = login {
        client.login(&credentials.nick, &credentials.email).await?;
    }
    client.load_history().await
}

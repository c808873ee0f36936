use std::fmt;
use std::time::Duration;

/// A message as the server sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub html: String,
}

/// Decoded reply of the updates endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatesReply {
    Batch {
        messages: Vec<ChatMessage>,
        cursor: Option<String>,
    },
    TryAgain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub nick: String,
    pub email: String,
}

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Poll,
    Waiting { cycle: u64 },
    ScrollTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Login (if requested) finished and the page history was read.
    Bootstrapped(Result<Vec<ChatMessage>, ClientError>),
    UpdatesFetched(Result<UpdatesReply, ClientError>),
    MessagePosted(Result<ChatMessage, ClientError>),
    TimerFired(Wake),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Protocol, message)
    }

    /// True when a response arrived but its content was unusable.
    pub fn is_protocol(&self) -> bool {
        matches!(self.kind, FailureKind::Protocol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Protocol,
    LoginRejected,
    Runtime,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Protocol => write!(f, "bad response"),
            FailureKind::LoginRejected => write!(f, "login rejected"),
            FailureKind::Runtime => write!(f, "runtime error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Must outlast the server's long-poll hold.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8888/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(150),
            max_bytes: 1024 * 1024,
        }
    }
}

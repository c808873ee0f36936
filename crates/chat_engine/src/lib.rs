//! Chat engine: HTTP transport, wire decoding and timers for the chat client.
mod client;
mod convert;
mod cookies;
mod engine;
mod history;
mod protocol;
mod types;

pub use client::{
    ChatClient, ReqwestChatClient, INDEX_PATH, LOGIN_PATH, NEW_MESSAGE_PATH, UPDATES_PATH,
    XSRF_FIELD,
};
pub use convert::{display_rows, Converter, Html2MdConverter};
pub use cookies::get_cookie;
pub use engine::{EngineHandle, EventSink};
pub use history::extract_inbox;
pub use protocol::{parse_message, parse_updates};
pub use types::{
    ChatMessage, ClientError, ClientSettings, Credentials, EngineEvent, FailureKind, UpdatesReply,
    Wake,
};

//! Strict decoding of the chat server's JSON replies.
//!
//! Anything that does not match the expected shape is a protocol failure;
//! payloads are only ever parsed as data.

use serde::Deserialize;

use crate::{ChatMessage, ClientError, UpdatesReply};

const STATUS_OK: &str = "ok";
const STATUS_TRY_AGAIN: &str = "try again";

/// Ids arrive as uuid strings from the reference server but may be numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: WireId,
    html: String,
}

impl From<WireMessage> for ChatMessage {
    fn from(wire: WireMessage) -> Self {
        ChatMessage {
            id: wire.id.into_string(),
            html: wire.html,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireEnvelope {
    status: Option<String>,
    #[serde(default)]
    messages: Option<Vec<WireMessage>>,
    #[serde(default)]
    cursor: Option<WireId>,
}

pub fn parse_updates(body: &[u8]) -> Result<UpdatesReply, ClientError> {
    let envelope: WireEnvelope =
        serde_json::from_slice(body).map_err(|err| ClientError::protocol(err.to_string()))?;

    match envelope.status.as_deref() {
        Some(STATUS_OK) => Ok(UpdatesReply::Batch {
            messages: envelope
                .messages
                .unwrap_or_default()
                .into_iter()
                .map(ChatMessage::from)
                .collect(),
            cursor: envelope.cursor.map(WireId::into_string),
        }),
        Some(STATUS_TRY_AGAIN) => Ok(UpdatesReply::TryAgain),
        Some(other) => Err(ClientError::protocol(format!("unexpected status {other:?}"))),
        None => Err(ClientError::protocol("missing status")),
    }
}

/// Decodes the new-message endpoint reply: one message object.
pub fn parse_message(body: &[u8]) -> Result<ChatMessage, ClientError> {
    serde_json::from_slice::<WireMessage>(body)
        .map(ChatMessage::from)
        .map_err(|err| ClientError::protocol(err.to_string()))
}

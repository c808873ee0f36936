//! Chat core: pure state machine for the long-polling client.
mod effect;
mod focus;
mod form;
mod message;
mod msg;
mod poll;
mod settings;
mod sink;
mod state;
mod update;
mod view_model;
mod viewport;

pub use effect::Effect;
pub use focus::FocusState;
pub use form::{form_to_dict, is_blank_body, FormFields};
pub use message::{Cursor, Message, MessageId};
pub use msg::Msg;
pub use poll::{retry_notice, Backoff, FailureClass, PollFailure, PollReply, PollState};
pub use settings::ClientSettings;
pub use sink::MessageSink;
pub use state::AppState;
pub use update::update;
pub use view_model::AppViewModel;
pub use viewport::Viewport;

use chat_core::{Effect, Message, MessageId, Msg, PollFailure, PollReply};
use chat_engine::{
    display_rows, ChatMessage, ClientError, Converter, EngineEvent, EngineHandle, UpdatesReply,
    Wake,
};
use chat_logging::{chat_cycle_info, chat_debug, chat_warn};

use super::ui::Ui;

/// Where engine work goes. `EngineHandle` in the app, a recorder in tests.
pub trait EngineCommands {
    fn fetch_updates(&self, cursor: Option<String>);
    fn post_message(&self, fields: Vec<(String, String)>);
    fn schedule(&self, after: std::time::Duration, wake: Wake);
}

impl EngineCommands for EngineHandle {
    fn fetch_updates(&self, cursor: Option<String>) {
        EngineHandle::fetch_updates(self, cursor);
    }

    fn post_message(&self, fields: Vec<(String, String)>) {
        EngineHandle::post_message(self, fields);
    }

    fn schedule(&self, after: std::time::Duration, wake: Wake) {
        EngineHandle::schedule(self, after, wake);
    }
}

pub struct EffectRunner<E: EngineCommands, U: Ui> {
    engine: E,
    ui: U,
}

impl<E: EngineCommands, U: Ui> EffectRunner<E, U> {
    pub fn new(engine: E, ui: U) -> Self {
        Self { engine, ui }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    fn run_one(&mut self, effect: Effect) {
        let result = match effect {
            Effect::FetchUpdates { cursor } => {
                chat_cycle_info!("polling for updates, cursor {:?}", cursor);
                self.engine
                    .fetch_updates(cursor.map(|id| id.as_str().to_string()));
                Ok(())
            }
            Effect::SchedulePoll { after } => {
                self.engine.schedule(after, Wake::Poll);
                Ok(())
            }
            Effect::ArmWaitingTimer { cycle, after } => {
                self.engine.schedule(after, Wake::Waiting { cycle });
                Ok(())
            }
            Effect::ScheduleScrollTick { after } => {
                self.engine.schedule(after, Wake::ScrollTick);
                Ok(())
            }
            Effect::SubmitMessage { fields } => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                self.engine.post_message(fields);
                Ok(())
            }
            Effect::RenderMessage(message) => self.ui.render_message(&message),
            Effect::SetTitle(title) => self.ui.set_title(&title),
            Effect::ShowInfo(text) => self.ui.show_info(&text),
            Effect::HideInfo => self.ui.hide_info(),
            Effect::ScrollTo(row) => self.ui.scroll_to(row),
            Effect::SetComposerEnabled(enabled) => self.ui.set_composer_enabled(enabled),
            Effect::ClearComposer => self.ui.clear_composer(),
        };
        if let Err(err) = result {
            chat_warn!("terminal write failed: {}", err);
        }
    }
}

/// Translates an engine report into the core message it stands for.
/// `Bootstrapped` is handled by the controller and maps to nothing here.
pub fn map_engine_event(event: EngineEvent, converter: &dyn Converter) -> Option<Msg> {
    match event {
        EngineEvent::UpdatesFetched(Ok(UpdatesReply::Batch { messages, cursor })) => {
            Some(Msg::PollSucceeded(PollReply::Batch {
                messages: map_messages(messages, converter),
                cursor: cursor.map(MessageId::new),
            }))
        }
        EngineEvent::UpdatesFetched(Ok(UpdatesReply::TryAgain)) => {
            Some(Msg::PollSucceeded(PollReply::TryAgain))
        }
        EngineEvent::UpdatesFetched(Err(err)) => Some(Msg::PollFailed(map_failure(&err))),
        EngineEvent::MessagePosted(Ok(message)) => {
            Some(Msg::SubmitSucceeded(map_message(message, converter)))
        }
        EngineEvent::MessagePosted(Err(err)) => Some(Msg::SubmitFailed(err.to_string())),
        EngineEvent::TimerFired(Wake::Poll) => Some(Msg::PollDue),
        EngineEvent::TimerFired(Wake::Waiting { cycle }) => {
            Some(Msg::WaitingThresholdElapsed { cycle })
        }
        EngineEvent::TimerFired(Wake::ScrollTick) => Some(Msg::ScrollTick),
        EngineEvent::Bootstrapped(_) => {
            chat_debug!("bootstrap result reached the generic mapper; ignored");
            None
        }
    }
}

pub fn map_messages(messages: Vec<ChatMessage>, converter: &dyn Converter) -> Vec<Message> {
    messages
        .into_iter()
        .map(|message| map_message(message, converter))
        .collect()
}

fn map_message(message: ChatMessage, converter: &dyn Converter) -> Message {
    let rows = display_rows(&converter.to_text(&message.html));
    Message::new(MessageId::new(message.id), message.html).with_rows(rows)
}

fn map_failure(err: &ClientError) -> PollFailure {
    if err.is_protocol() {
        PollFailure::protocol(err.to_string())
    } else {
        PollFailure::transport(err.to_string())
    }
}

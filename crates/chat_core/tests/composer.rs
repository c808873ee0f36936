use std::sync::Once;

use chat_core::{update, AppState, Effect, FormFields, Message, Msg, PollReply};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn form(body: &str) -> FormFields {
    FormFields::new().with("body", body).with("next", "/")
}

#[test]
fn submit_strips_next_and_disables_composer() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitRequested(form("hello")));

    assert_eq!(
        effects,
        vec![
            Effect::SetComposerEnabled(false),
            Effect::SubmitMessage {
                fields: FormFields::new().with("body", "hello"),
            },
        ]
    );
    assert!(!state.view().composer_enabled);
}

#[test]
fn blank_body_is_not_sent() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitRequested(form("   \t")));

    assert!(effects.is_empty());
    assert!(state.view().composer_enabled);
}

#[test]
fn second_submit_while_sending_is_dropped() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SubmitRequested(form("one")));
    let (_, effects) = update(state, Msg::SubmitRequested(form("two")));

    assert!(effects.is_empty());
}

#[test]
fn echoed_message_renders_once_and_reenables_composer() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::SubmitRequested(form("hello")));
    let mine = Message::new("abc", "<div id=mabc>hello</div>");

    let (state, effects) = update(state, Msg::SubmitSucceeded(mine.clone()));
    assert_eq!(
        effects,
        vec![
            Effect::RenderMessage(mine.clone()),
            Effect::ClearComposer,
            Effect::SetComposerEnabled(true),
        ]
    );
    assert!(state.view().composer_enabled);
    assert!(!state.poll().cursor().is_set(), "submit does not move the cursor");

    // The broadcast copy arrives through the poll loop afterwards.
    let (state, effects) = update(
        state,
        Msg::PollSucceeded(PollReply::Batch {
            messages: vec![mine],
            cursor: None,
        }),
    );
    assert!(!effects.iter().any(|e| matches!(e, Effect::RenderMessage(_))));
    assert!(state.poll().cursor().is_set());
    assert_eq!(state.view().rendered_count, 1);
}

#[test]
fn own_message_does_not_count_as_unread() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FocusLost);
    let (state, _) = update(state, Msg::SubmitRequested(form("hi")));
    let (state, _) = update(state, Msg::SubmitSucceeded(Message::new(1, "hi")));

    assert_eq!(state.focus().unread(), 0);
}

#[test]
fn failed_submit_reenables_and_notifies() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SubmitRequested(form("hello")));
    let (state, effects) = update(state, Msg::SubmitFailed("http status 403".to_string()));

    assert_eq!(
        effects,
        vec![
            Effect::ShowInfo("could not send message: http status 403".to_string()),
            Effect::SetComposerEnabled(true),
        ]
    );
    assert!(state.view().composer_enabled);
}

use std::sync::Once;
use std::time::Duration;

use chat_core::{update, AppState, Effect, Message, MessageId, Msg, PollFailure, PollReply};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn started() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    state
}

fn batch(messages: Vec<Message>) -> Msg {
    Msg::PollSucceeded(PollReply::Batch {
        messages,
        cursor: None,
    })
}

fn fail(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::PollFailed(PollFailure::transport("connection refused")))
}

fn poll_due(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::PollDue)
}

#[test]
fn first_cycle_has_no_cursor() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![
            Effect::SetTitle("Chat".to_string()),
            Effect::FetchUpdates { cursor: None },
            Effect::ArmWaitingTimer {
                cycle: 1,
                after: Duration::from_millis(500),
            },
        ]
    );
    assert!(state.poll().in_flight());
}

#[test]
fn ok_batch_advances_cursor_and_next_request_carries_it() {
    init_logging();
    let state = started();
    let message = Message::new(1, "<div id=m1>a</div>");

    let (state, effects) = update(state, batch(vec![message.clone()]));
    assert_eq!(
        effects,
        vec![
            Effect::RenderMessage(message),
            Effect::SchedulePoll {
                after: Duration::ZERO
            },
        ]
    );
    assert_eq!(state.poll().cursor().token(), Some(&MessageId::from(1)));
    assert_eq!(state.view().rendered_count, 1);

    let (_, effects) = poll_due(state);
    assert_eq!(
        effects[0],
        Effect::FetchUpdates {
            cursor: Some(MessageId::from(1))
        }
    );
}

#[test]
fn try_again_reschedules_immediately_without_rendering() {
    init_logging();
    let (state, _) = fail(started());
    let (state, _) = poll_due(state);
    let before = state.poll().cursor().clone();

    let (state, effects) = update(state, Msg::PollSucceeded(PollReply::TryAgain));

    assert_eq!(
        effects,
        vec![
            Effect::HideInfo,
            Effect::SchedulePoll {
                after: Duration::ZERO
            },
        ]
    );
    assert_eq!(state.poll().cursor(), &before);
    assert_eq!(state.poll().backoff(), Duration::from_millis(500));
    assert_eq!(state.view().rendered_count, 0);
}

#[test]
fn two_failures_then_success_follow_backoff_sequence() {
    init_logging();
    let state = started();
    assert_eq!(state.poll().backoff(), Duration::from_millis(500));

    let (state, effects) = fail(state);
    assert_eq!(
        effects,
        vec![
            Effect::ShowInfo("network error; try again in 1s".to_string()),
            Effect::SchedulePoll {
                after: Duration::from_millis(1_000)
            },
        ]
    );
    assert_eq!(state.view().info.as_deref(), Some("network error; try again in 1s"));

    let (state, _) = poll_due(state);
    let (state, effects) = fail(state);
    assert_eq!(state.poll().backoff(), Duration::from_millis(2_000));
    assert!(effects.contains(&Effect::SchedulePoll {
        after: Duration::from_millis(2_000)
    }));

    let (state, _) = poll_due(state);
    let (state, _) = update(state, batch(vec![Message::new(9, "<div id=m9>x</div>")]));
    assert_eq!(state.poll().backoff(), Duration::from_millis(500));
    assert_eq!(state.view().info, None);
}

#[test]
fn backoff_is_capped_after_many_failures() {
    init_logging();
    let mut state = started();
    for k in 1..=10u32 {
        let (next, _) = fail(state);
        let expected = Duration::from_millis((500u64 << k).min(60_000));
        assert_eq!(next.poll().backoff(), expected, "after {k} failures");
        let (next, _) = poll_due(next);
        state = next;
    }
}

#[test]
fn protocol_failure_takes_the_error_path() {
    init_logging();
    let (state, effects) = update(
        started(),
        Msg::PollFailed(PollFailure::protocol("unknown status \"nope\"")),
    );

    assert_eq!(state.poll().backoff(), Duration::from_millis(1_000));
    assert!(!state.poll().in_flight());
    assert!(effects.contains(&Effect::SchedulePoll {
        after: Duration::from_millis(1_000)
    }));
}

#[test]
fn waiting_timer_is_bounded_by_threshold() {
    init_logging();
    let (state, _) = fail(started());
    let (mut state, effects) = poll_due(state);
    assert_eq!(
        effects[1],
        Effect::ArmWaitingTimer {
            cycle: 2,
            after: Duration::from_millis(1_000),
        }
    );

    for _ in 0..3 {
        let (next, _) = fail(state);
        let (next, _) = poll_due(next);
        state = next;
    }
    assert_eq!(state.poll().backoff(), Duration::from_millis(8_000));
    let (_, effects) = poll_due(fail(state).0);
    assert_eq!(
        effects[1],
        Effect::ArmWaitingTimer {
            cycle: 6,
            after: Duration::from_millis(3_000),
        }
    );
}

#[test]
fn waiting_threshold_hides_stale_notice_without_touching_backoff() {
    init_logging();
    let (state, _) = fail(started());
    let (state, _) = poll_due(state);

    let (state, effects) = update(state, Msg::WaitingThresholdElapsed { cycle: 1 });
    assert!(effects.is_empty(), "stale cycle must be ignored");
    assert!(!state.view().waiting);

    let (state, effects) = update(state, Msg::WaitingThresholdElapsed { cycle: 2 });
    assert_eq!(effects, vec![Effect::HideInfo]);
    let view = state.view();
    assert!(view.waiting);
    assert_eq!(view.info, None);
    assert_eq!(view.backoff, Duration::from_millis(1_000));

    let (state, _) = update(state, Msg::PollSucceeded(PollReply::TryAgain));
    assert!(!state.view().waiting);
}

#[test]
fn no_second_request_while_one_is_in_flight() {
    init_logging();
    let state = started();
    let (state, effects) = poll_due(state);

    assert!(effects.is_empty());
    assert_eq!(state.poll().cycle(), 1);
}

#[test]
fn replies_without_a_request_in_flight_are_dropped() {
    init_logging();
    let (state, _) = update(started(), Msg::PollSucceeded(PollReply::TryAgain));
    let snapshot = state.clone();

    let (state, effects) = update(state, batch(vec![Message::new(1, "<div id=m1>a</div>")]));
    assert!(effects.is_empty());
    assert_eq!(state, snapshot);

    let (state, effects) = fail(state);
    assert!(effects.is_empty());
    assert_eq!(state.poll().backoff(), Duration::from_millis(500));
}

#[test]
fn cursor_generation_is_monotonic_across_batches() {
    init_logging();
    let mut state = started();
    let batches = vec![
        vec![Message::new(1, "a"), Message::new(2, "b")],
        vec![],
        vec![Message::new(3, "c")],
        vec![Message::new(3, "c"), Message::new(4, "d"), Message::new(5, "e")],
    ];
    let expected = [Some("2"), Some("2"), Some("3"), Some("5")];

    let mut last_generation = 0;
    for (messages, expected) in batches.into_iter().zip(expected) {
        let (next, _) = update(state, batch(messages));
        let cursor = next.poll().cursor();
        assert!(cursor.generation() >= last_generation);
        assert_eq!(cursor.token().map(MessageId::as_str), expected);
        last_generation = cursor.generation();
        let (next, _) = poll_due(next);
        state = next;
    }
    assert_eq!(last_generation, 3);
}

#[test]
fn empty_batch_ignores_envelope_cursor() {
    init_logging();
    let (state, effects) = update(
        started(),
        Msg::PollSucceeded(PollReply::Batch {
            messages: Vec::new(),
            cursor: Some(MessageId::from("77")),
        }),
    );

    assert!(!state.poll().cursor().is_set());
    assert_eq!(
        effects,
        vec![Effect::SchedulePoll {
            after: Duration::ZERO
        }]
    );
}

#[test]
fn last_message_id_wins_over_envelope_cursor() {
    init_logging();
    let (state, _) = update(
        started(),
        Msg::PollSucceeded(PollReply::Batch {
            messages: vec![Message::new("a1", "x"), Message::new("b2", "y")],
            cursor: Some(MessageId::from("a1")),
        }),
    );

    assert_eq!(state.poll().cursor().token(), Some(&MessageId::from("b2")));
}

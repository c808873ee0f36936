use chat_core::{update, AppState, Msg};

#[test]
fn waiting_timer_without_request_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::WaitingThresholdElapsed { cycle: 1 });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn scroll_tick_without_animation_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ScrollTick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

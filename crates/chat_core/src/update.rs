use std::time::Duration;

use chat_logging::{chat_debug, chat_info, chat_warn};

use crate::{
    form_to_dict, is_blank_body, retry_notice, AppState, Effect, FormFields, Message, Msg,
    PollFailure, PollReply,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let title_before = state.focus.title();

    let mut effects = match msg {
        Msg::Started => {
            let mut effects = vec![Effect::SetTitle(title_before.clone())];
            effects.extend(begin_poll(&mut state));
            effects.extend(start_scroll(&mut state));
            effects
        }
        Msg::HistoryLoaded(messages) => {
            let mut effects = Vec::with_capacity(messages.len());
            let shown = show_messages(&mut state, messages, &mut effects);
            chat_info!("restored {} messages from page history", shown);
            effects
        }
        Msg::PollDue => begin_poll(&mut state),
        Msg::PollSucceeded(reply) => on_poll_success(&mut state, reply),
        Msg::PollFailed(failure) => on_poll_failure(&mut state, failure),
        Msg::WaitingThresholdElapsed { cycle } => {
            if !state.poll.in_flight || cycle != state.poll.cycle {
                return (state, Vec::new());
            }
            state.poll.waiting = true;
            state.mark_dirty();
            // A request that pends this long reached the server; the error is stale.
            match state.info.take() {
                Some(_) => vec![Effect::HideInfo],
                None => Vec::new(),
            }
        }
        Msg::SubmitRequested(fields) => submit(&mut state, fields),
        Msg::SubmitSucceeded(message) => {
            let mut effects = Vec::new();
            show_messages(&mut state, vec![message], &mut effects);
            state.composer_enabled = true;
            state.mark_dirty();
            effects.push(Effect::ClearComposer);
            effects.push(Effect::SetComposerEnabled(true));
            effects
        }
        Msg::SubmitFailed(detail) => {
            chat_warn!("message submit failed: {}", detail);
            let notice = format!("could not send message: {detail}");
            state.composer_enabled = true;
            state.info = Some(notice.clone());
            state.mark_dirty();
            vec![Effect::ShowInfo(notice), Effect::SetComposerEnabled(true)]
        }
        Msg::FocusLost => {
            state.focus.blur();
            Vec::new()
        }
        Msg::FocusGained => {
            if state.viewport.distance_from_bottom() <= state.settings.focus_threshold {
                state.focus.focus();
            }
            Vec::new()
        }
        Msg::Scrolled { scroll_y } => {
            state.viewport.scroll_to(scroll_y);
            apply_scroll_focus(&mut state);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Resized { client_rows } => {
            state.viewport.resize(client_rows);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScrollTick => {
            if !state.scrolling {
                return (state, Vec::new());
            }
            scroll_tick(&mut state)
        }
    };

    let title_after = state.focus.title();
    if title_after != title_before {
        state.mark_dirty();
        effects.push(Effect::SetTitle(title_after));
    }

    (state, effects)
}

fn begin_poll(state: &mut AppState) -> Vec<Effect> {
    if state.poll.in_flight {
        chat_debug!("poll requested while cycle {} in flight; ignored", state.poll.cycle);
        return Vec::new();
    }
    let cycle = state.poll.begin_cycle();
    let after = state.settings.waiting_threshold.min(state.poll.backoff());
    vec![
        Effect::FetchUpdates {
            cursor: state.poll.cursor.token().cloned(),
        },
        Effect::ArmWaitingTimer { cycle, after },
    ]
}

fn on_poll_success(state: &mut AppState, reply: PollReply) -> Vec<Effect> {
    if !state.poll.in_flight {
        chat_warn!("poll reply arrived with no request in flight; dropped");
        return Vec::new();
    }
    state.poll.end_cycle();
    state.poll.backoff.reset();
    state.mark_dirty();

    let mut effects = Vec::new();
    if state.info.take().is_some() {
        effects.push(Effect::HideInfo);
    }
    match reply {
        PollReply::Batch { messages, cursor } => {
            if let Some(envelope) = cursor {
                chat_debug!("envelope cursor {} superseded by batch", envelope);
            }
            effects.extend(ingest(state, messages));
        }
        PollReply::TryAgain => chat_debug!("server asked to poll again"),
    }
    effects.push(Effect::SchedulePoll {
        after: Duration::ZERO,
    });
    effects
}

fn on_poll_failure(state: &mut AppState, failure: PollFailure) -> Vec<Effect> {
    if !state.poll.in_flight {
        chat_warn!("poll failure arrived with no request in flight; dropped");
        return Vec::new();
    }
    state.poll.end_cycle();
    let delay = state.poll.backoff.fail();
    chat_warn!("{}; retrying in {:?}", failure, delay);

    let notice = retry_notice(delay);
    state.info = Some(notice.clone());
    state.mark_dirty();
    vec![Effect::ShowInfo(notice), Effect::SchedulePoll { after: delay }]
}

/// Applies one polled batch: cursor, idempotent render, unread accounting.
fn ingest(state: &mut AppState, messages: Vec<Message>) -> Vec<Effect> {
    let Some(last) = messages.last() else {
        return Vec::new();
    };
    state.poll.cursor.advance(last.id.clone());

    let total = messages.len();
    let mut effects = Vec::with_capacity(total);
    let pinned = state.viewport.pinned_to_bottom();
    let shown = render_new(state, messages, &mut effects);
    // Counted against the focus the batch arrived with, before any catch-up.
    state.focus.record_arrivals(shown);
    if shown > 0 && pinned {
        effects.extend(start_scroll(state));
    }
    chat_info!(
        "{} new messages ({} shown), cursor: {}",
        total,
        shown,
        last_cursor(state)
    );
    effects
}

fn last_cursor(state: &AppState) -> String {
    state
        .poll
        .cursor
        .token()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Renders messages not yet on screen, following the bottom if the view was pinned there.
fn show_messages(state: &mut AppState, messages: Vec<Message>, effects: &mut Vec<Effect>) -> u32 {
    let pinned = state.viewport.pinned_to_bottom();
    let shown = render_new(state, messages, effects);
    if shown > 0 && pinned {
        effects.extend(start_scroll(state));
    }
    shown
}

/// Emits a render for each id not seen before and returns how many there were.
fn render_new(state: &mut AppState, messages: Vec<Message>, effects: &mut Vec<Effect>) -> u32 {
    let mut shown = 0;
    for message in messages {
        if !state.sink.admit(&message.id) {
            chat_debug!("message {} already rendered; skipped", message.id);
            continue;
        }
        state.viewport.append(message.rows);
        effects.push(Effect::RenderMessage(message));
        shown += 1;
    }
    if shown > 0 {
        state.mark_dirty();
    }
    shown
}

fn submit(state: &mut AppState, fields: FormFields) -> Vec<Effect> {
    if !state.composer_enabled {
        chat_debug!("submit ignored while a message is being sent");
        return Vec::new();
    }
    if is_blank_body(&fields) {
        return Vec::new();
    }
    let fields = form_to_dict(fields.iter());
    state.composer_enabled = false;
    state.mark_dirty();
    vec![
        Effect::SetComposerEnabled(false),
        Effect::SubmitMessage { fields },
    ]
}

fn start_scroll(state: &mut AppState) -> Vec<Effect> {
    if state.scrolling {
        return Vec::new();
    }
    scroll_tick(state)
}

fn scroll_tick(state: &mut AppState) -> Vec<Effect> {
    let step = state
        .viewport
        .catch_up_step(state.settings.scroll_divisor, state.settings.min_scroll_step);
    match step {
        None => {
            state.scrolling = false;
            Vec::new()
        }
        Some(y) => {
            // Catch-up steps are not user scrolls and leave focus alone.
            state.scrolling = true;
            state.viewport.scroll_to(y);
            state.mark_dirty();
            vec![
                Effect::ScrollTo(y),
                Effect::ScheduleScrollTick {
                    after: state.settings.scroll_tick,
                },
            ]
        }
    }
}

/// A user scroll away from the bottom counts as losing focus; returning to it reads everything.
fn apply_scroll_focus(state: &mut AppState) {
    if state.viewport.distance_from_bottom() > state.settings.focus_threshold {
        state.focus.blur();
    } else {
        state.focus.focus();
    }
}

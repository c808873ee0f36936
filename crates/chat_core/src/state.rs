use crate::view_model::AppViewModel;
use crate::{Backoff, ClientSettings, FocusState, MessageId, MessageSink, PollState, Viewport};

const DEFAULT_TITLE: &str = "Chat";
const DEFAULT_CLIENT_ROWS: u32 = 24;

/// Everything the client tracks for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) settings: ClientSettings,
    pub(crate) poll: PollState,
    pub(crate) focus: FocusState,
    pub(crate) viewport: Viewport,
    pub(crate) sink: MessageSink,
    pub(crate) info: Option<String>,
    pub(crate) composer_enabled: bool,
    pub(crate) scrolling: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(ClientSettings::default(), DEFAULT_TITLE, DEFAULT_CLIENT_ROWS)
    }

    pub fn with_settings(
        settings: ClientSettings,
        original_title: impl Into<String>,
        client_rows: u32,
    ) -> Self {
        let backoff = Backoff::new(settings.backoff_floor, settings.backoff_cap);
        Self {
            poll: PollState::new(backoff),
            focus: FocusState::new(original_title),
            viewport: Viewport::new(client_rows),
            sink: MessageSink::new(),
            info: None,
            composer_enabled: true,
            scrolling: false,
            dirty: false,
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn poll(&self) -> &PollState {
        &self.poll
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_rendered(&self, id: &MessageId) -> bool {
        self.sink.contains(id)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            title: self.focus.title(),
            unread: self.focus.unread(),
            has_focus: self.focus.has_focus(),
            info: self.info.clone(),
            waiting: self.poll.waiting,
            cursor: self.poll.cursor().token().cloned(),
            cursor_generation: self.poll.cursor().generation(),
            backoff: self.poll.backoff(),
            in_flight: self.poll.in_flight(),
            rendered_count: self.sink.len(),
            composer_enabled: self.composer_enabled,
            scroll_y: self.viewport.scroll_y(),
            max_y: self.viewport.max_y(),
            scrolling: self.scrolling,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

use std::time::Duration;

use crate::MessageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub title: String,
    pub unread: u32,
    pub has_focus: bool,
    pub info: Option<String>,
    pub waiting: bool,
    pub cursor: Option<MessageId>,
    pub cursor_generation: u64,
    pub backoff: Duration,
    pub in_flight: bool,
    pub rendered_count: usize,
    pub composer_enabled: bool,
    pub scroll_y: u32,
    pub max_y: u32,
    pub scrolling: bool,
    pub dirty: bool,
}

use std::time::Duration;

/// Tunables for the poll loop, the status line and the viewport model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Backoff after a success or soft retry.
    pub backoff_floor: Duration,
    /// Upper bound for the error backoff.
    pub backoff_cap: Duration,
    /// How long a request may pend before the status line treats it as healthy.
    pub waiting_threshold: Duration,
    /// Delay between smooth scroll steps.
    pub scroll_tick: Duration,
    /// Each scroll step covers `1 / scroll_divisor` of the remaining distance.
    pub scroll_divisor: u32,
    /// Smallest scroll step, in rows.
    pub min_scroll_step: u32,
    /// Rows from the bottom that still count as "at the bottom" for focus.
    pub focus_threshold: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backoff_floor: Duration::from_millis(500),
            backoff_cap: Duration::from_millis(60_000),
            waiting_threshold: Duration::from_millis(3_000),
            scroll_tick: Duration::from_millis(15),
            scroll_divisor: 5,
            min_scroll_step: 5,
            focus_threshold: 5,
        }
    }
}

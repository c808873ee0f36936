/// Scroll geometry of the transcript, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub(crate) scroll_y: u32,
    pub(crate) content_rows: u32,
    pub(crate) client_rows: u32,
}

impl Viewport {
    pub fn new(client_rows: u32) -> Self {
        Self {
            scroll_y: 0,
            content_rows: 0,
            client_rows,
        }
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn content_rows(&self) -> u32 {
        self.content_rows
    }

    pub fn client_rows(&self) -> u32 {
        self.client_rows
    }

    pub fn max_y(&self) -> u32 {
        self.content_rows.saturating_sub(self.client_rows)
    }

    pub fn distance_from_bottom(&self) -> u32 {
        self.max_y().saturating_sub(self.scroll_y)
    }

    /// At the bottom of content that actually scrolls.
    pub(crate) fn pinned_to_bottom(&self) -> bool {
        self.scroll_y == self.max_y() && self.scroll_y != 0
    }

    pub(crate) fn append(&mut self, rows: u32) {
        self.content_rows = self.content_rows.saturating_add(rows);
    }

    pub(crate) fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y.min(self.max_y());
    }

    pub(crate) fn resize(&mut self, client_rows: u32) {
        self.client_rows = client_rows;
        self.scroll_y = self.scroll_y.min(self.max_y());
    }

    /// Next position of the catch-up animation, or `None` once at the bottom.
    pub(crate) fn catch_up_step(&self, divisor: u32, min_step: u32) -> Option<u32> {
        let target = self.max_y();
        if self.scroll_y == target {
            return None;
        }
        if self.scroll_y > target {
            return Some(target);
        }
        let remaining = target - self.scroll_y;
        let step = (remaining / divisor.max(1)).max(min_step).max(1);
        Some(self.scroll_y.saturating_add(step).min(target))
    }
}

/// Window focus and unread bookkeeping. The title is always derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    pub(crate) has_focus: bool,
    pub(crate) unread: u32,
    pub(crate) original_title: String,
}

impl FocusState {
    pub fn new(original_title: impl Into<String>) -> Self {
        Self {
            has_focus: true,
            unread: 0,
            original_title: original_title.into(),
        }
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn unread(&self) -> u32 {
        self.unread
    }

    pub fn original_title(&self) -> &str {
        &self.original_title
    }

    pub fn title(&self) -> String {
        if self.unread > 0 {
            format!("({}) {}", self.unread, self.original_title)
        } else {
            self.original_title.clone()
        }
    }

    pub(crate) fn blur(&mut self) {
        self.has_focus = false;
    }

    pub(crate) fn focus(&mut self) {
        self.has_focus = true;
        self.unread = 0;
    }

    /// Counts newly shown messages while the window is unfocused.
    pub(crate) fn record_arrivals(&mut self, count: u32) {
        if !self.has_focus {
            self.unread = self.unread.saturating_add(count);
        }
    }
}

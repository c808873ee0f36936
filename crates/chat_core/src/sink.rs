use std::collections::HashSet;

use crate::MessageId;

/// Tracks which message ids are already on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSink {
    rendered: HashSet<MessageId>,
}

impl MessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as rendered. Returns false when it already was.
    pub fn admit(&mut self, id: &MessageId) -> bool {
        if self.rendered.contains(id) {
            return false;
        }
        self.rendered.insert(id.clone())
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.rendered.contains(id)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

use std::fmt;

/// Server-issued message identifier. Numeric ids are carried as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One chat message as delivered by the server.
///
/// `html` is opaque pre-rendered markup. `rows` is the display height the host
/// measured for it and only feeds the viewport model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub html: String,
    pub rows: u32,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            rows: 1,
        }
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows.max(1);
        self
    }
}

/// Resume position in the message stream.
///
/// The token is opaque, so ordering is tracked through `generation`, which
/// increases by one on every advance and never goes back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    token: Option<MessageId>,
    generation: u64,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&MessageId> {
        self.token.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_set(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn advance(&mut self, id: MessageId) {
        self.token = Some(id);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_unset() {
        let cursor = Cursor::new();
        assert!(!cursor.is_set());
        assert_eq!(cursor.generation(), 0);
    }

    #[test]
    fn advance_bumps_generation() {
        let mut cursor = Cursor::new();
        cursor.advance(MessageId::from(4));
        cursor.advance(MessageId::from("abc"));
        assert_eq!(cursor.token(), Some(&MessageId::from("abc")));
        assert_eq!(cursor.generation(), 2);
    }

    #[test]
    fn rows_never_drop_below_one() {
        let message = Message::new(1, "<div></div>").with_rows(0);
        assert_eq!(message.rows, 1);
    }
}

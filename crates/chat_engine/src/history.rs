use scraper::{Html, Selector};

use crate::ChatMessage;

/// Pulls the server-rendered messages out of the chat page.
///
/// Each child of `#inbox` with an id of the form `m<id>` is one message; its
/// outer html is kept verbatim.
pub fn extract_inbox(page: &str) -> Vec<ChatMessage> {
    let doc = Html::parse_document(page);
    let Some(selector) = Selector::parse("#inbox > [id]").ok() else {
        return Vec::new();
    };

    doc.select(&selector)
        .filter_map(|node| {
            let id = node.value().id()?.strip_prefix('m')?;
            if id.is_empty() {
                return None;
            }
            Some(ChatMessage {
                id: id.to_string(),
                html: node.html(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_messages_in_page_order() {
        let page = r#"<html><body>
            <div id="inbox">
              <div class="message" id="m1"><b>alice</b>: hi</div>
              <div class="message" id="m2"><b>bob</b>: hey</div>
            </div>
            <div id="input"><form id="messageform"></form></div>
        </body></html>"#;

        let messages = extract_inbox(page);
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(messages[0].html.contains("alice"));
        assert!(messages[0].html.starts_with("<div"));
    }

    #[test]
    fn ignores_children_without_message_ids() {
        let page = r#"<div id="inbox"><p id="note">x</p><div id="m">y</div><div>z</div></div>"#;
        assert!(extract_inbox(page).is_empty());
    }

    #[test]
    fn page_without_inbox_has_no_history() {
        assert!(extract_inbox("<html><body>login</body></html>").is_empty());
    }
}

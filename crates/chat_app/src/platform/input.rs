use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use chat_core::{FormFields, Msg};
use chat_logging::{chat_info, chat_warn};

use super::app::ControllerEvent;

/// What one line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the line as the composer form.
    Submit(FormFields),
    /// Local window/viewport control.
    Local(Msg),
    Quit,
}

/// Lines starting with `:` are local commands; everything else is a message.
/// Server-side commands such as `/online` travel as ordinary messages.
pub fn parse_line(line: &str) -> Option<InputCommand> {
    let Some(command) = line.trim().strip_prefix(':') else {
        let form = FormFields::new().with("body", line).with("next", "/");
        return Some(InputCommand::Submit(form));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().and_then(|value| value.parse::<u32>().ok());
    match (name, arg) {
        ("quit" | "q", _) => Some(InputCommand::Quit),
        ("blur", _) => Some(InputCommand::Local(Msg::FocusLost)),
        ("focus", _) => Some(InputCommand::Local(Msg::FocusGained)),
        ("bottom", _) => Some(InputCommand::Local(Msg::Scrolled { scroll_y: u32::MAX })),
        ("scroll", Some(scroll_y)) => Some(InputCommand::Local(Msg::Scrolled { scroll_y })),
        ("rows", Some(client_rows)) => Some(InputCommand::Local(Msg::Resized { client_rows })),
        _ => {
            chat_warn!("unknown local command {:?}", line.trim());
            None
        }
    }
}

/// Feeds stdin lines to the controller until EOF.
pub fn spawn_stdin_reader(tx: mpsc::Sender<ControllerEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        chat_warn!("stdin read failed: {}", err);
                        break;
                    }
                };
                let event = match parse_line(&line) {
                    Some(InputCommand::Submit(form)) => ControllerEvent::Core(Msg::SubmitRequested(form)),
                    Some(InputCommand::Local(msg)) => ControllerEvent::Core(msg),
                    Some(InputCommand::Quit) => ControllerEvent::Quit,
                    None => continue,
                };
                let quit = matches!(event, ControllerEvent::Quit);
                if tx.send(event).is_err() || quit {
                    return;
                }
            }
            chat_info!("stdin closed");
            let _ = tx.send(ControllerEvent::Quit);
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_becomes_form_with_next_field() {
        let command = parse_line("hello /there").unwrap();
        let InputCommand::Submit(form) = command else {
            panic!("expected submit");
        };
        assert_eq!(form.get("body"), Some("hello /there"));
        assert_eq!(form.get("next"), Some("/"));
    }

    #[test]
    fn local_commands_map_to_messages() {
        assert_eq!(parse_line(":blur"), Some(InputCommand::Local(Msg::FocusLost)));
        assert_eq!(parse_line(" :focus "), Some(InputCommand::Local(Msg::FocusGained)));
        assert_eq!(
            parse_line(":scroll 12"),
            Some(InputCommand::Local(Msg::Scrolled { scroll_y: 12 }))
        );
        assert_eq!(
            parse_line(":rows 40"),
            Some(InputCommand::Local(Msg::Resized { client_rows: 40 }))
        );
        assert_eq!(parse_line(":q"), Some(InputCommand::Quit));
    }

    #[test]
    fn malformed_local_commands_are_dropped() {
        assert_eq!(parse_line(":scroll up"), None);
        assert_eq!(parse_line(":dance"), None);
    }
}

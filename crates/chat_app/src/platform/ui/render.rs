use std::io::{self, Write};

use chat_core::Message;
use chat_engine::{Converter, Html2MdConverter};
use chrono::Local;

use super::Ui;

/// Line-oriented terminal output: one block per message, title via OSC 0.
pub struct TerminalUi<W: Write> {
    out: W,
    converter: Box<dyn Converter>,
    info_visible: bool,
    composer_enabled: bool,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            converter: Box::new(Html2MdConverter),
            info_visible: false,
            composer_enabled: true,
        }
    }

    pub fn composer_enabled(&self) -> bool {
        self.composer_enabled
    }

    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Ui for TerminalUi<W> {
    fn render_message(&mut self, message: &Message) -> io::Result<()> {
        let text = self.converter.to_text(&message.html);
        let stamp = Local::now().format("%H:%M:%S");
        writeln!(self.out, "[{stamp}] {text}")?;
        self.out.flush()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        write!(self.out, "\x1b]0;{title}\x07")?;
        self.out.flush()
    }

    fn show_info(&mut self, text: &str) -> io::Result<()> {
        self.info_visible = true;
        writeln!(self.out, "-- {text} --")?;
        self.out.flush()
    }

    fn hide_info(&mut self) -> io::Result<()> {
        // Printed lines cannot be taken back; only forget the notice.
        self.info_visible = false;
        Ok(())
    }

    fn scroll_to(&mut self, _row: u32) -> io::Result<()> {
        Ok(())
    }

    fn set_composer_enabled(&mut self, enabled: bool) -> io::Result<()> {
        if !enabled && self.composer_enabled {
            writeln!(self.out, "(sending...)")?;
        }
        self.composer_enabled = enabled;
        self.out.flush()
    }

    fn clear_composer(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(ui: TerminalUi<Vec<u8>>) -> String {
        String::from_utf8(ui.into_inner()).unwrap()
    }

    #[test]
    fn message_is_printed_as_text_with_timestamp() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render_message(&Message::new(1, r#"<div class="message" id="m1">hello</div>"#))
            .unwrap();

        let out = output(ui);
        assert!(out.starts_with('['));
        assert!(out.trim_end().ends_with("hello"));
        assert!(!out.contains("<div"));
    }

    #[test]
    fn title_uses_osc_sequence() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.set_title("(2) Chat").unwrap();
        assert_eq!(output(ui), "\x1b]0;(2) Chat\x07");
    }

    #[test]
    fn info_notice_is_printed_and_forgotten() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.show_info("network error; try again in 1s").unwrap();
        assert!(ui.info_visible());
        ui.hide_info().unwrap();
        assert!(!ui.info_visible());
        assert_eq!(output(ui), "-- network error; try again in 1s --\n");
    }

    #[test]
    fn sending_notice_is_printed_once() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.set_composer_enabled(false).unwrap();
        ui.set_composer_enabled(false).unwrap();
        assert!(!ui.composer_enabled());
        ui.set_composer_enabled(true).unwrap();
        assert_eq!(output(ui), "(sending...)\n");
    }
}

pub mod render;

use std::io;

use chat_core::Message;

/// Output surface driven by the effect runner.
pub trait Ui {
    fn render_message(&mut self, message: &Message) -> io::Result<()>;
    fn set_title(&mut self, title: &str) -> io::Result<()>;
    fn show_info(&mut self, text: &str) -> io::Result<()>;
    fn hide_info(&mut self) -> io::Result<()>;
    fn scroll_to(&mut self, row: u32) -> io::Result<()>;
    fn set_composer_enabled(&mut self, enabled: bool) -> io::Result<()>;
    fn clear_composer(&mut self) -> io::Result<()>;
}

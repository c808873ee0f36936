/// Turns message markup into something a terminal can show.
pub trait Converter: Send + Sync {
    fn to_text(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_text(&self, html: &str) -> String {
        html2md::parse_html(html).trim().to_string()
    }
}

/// Rows the text occupies when printed, at least one.
pub fn display_rows(text: &str) -> u32 {
    u32::try_from(text.lines().count()).unwrap_or(u32::MAX).max(1)
}

use typed_builder::TypedBuilder as Builder;

use crate::cleaner;

// conservative margins under Telegram's 4096/1024 hard limits
pub const TEXT_MESSAGE_LIMIT: usize = 3900;
pub const CAPTION_LIMIT: usize = 900;

const FOOTER_DIVIDER: &str = "━━━━━━━━━━━━━━";

#[derive(Builder)]
pub struct MessageRenderer {
    #[builder(setter(into))]
    body: String,
    #[builder(setter(into), default)]
    header: Option<String>,
    #[builder(setter(into), default)]
    footer: String,
}

impl MessageRenderer {
    pub fn render_text(&self) -> String {
        truncate(&self.render(), TEXT_MESSAGE_LIMIT)
    }

    pub fn render_caption(&self) -> String {
        truncate(&self.render(), CAPTION_LIMIT)
    }

    fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(header) = &self.header {
            if !header.is_empty() {
                parts.push(header.clone());
            }
        }

        parts.push(self.body.clone());

        if !self.footer.is_empty() {
            parts.push(format!("{}\n{}", FOOTER_DIVIDER, self.footer));
        }

        cleaner::collapse_blank_runs(parts.join("\n\n").trim())
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => String::from(s),
        Some((idx, _)) => String::from(&s[..idx]),
    }
}

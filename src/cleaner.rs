use htmlescape::decode_html;
use regex::Regex;
use std::sync::OnceLock;

static LINE_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn line_break_re() -> &'static Regex {
    LINE_BREAK_RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap())
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn blank_run_re() -> &'static Regex {
    BLANK_RUN_RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

pub fn clean_markup(text: &str) -> String {
    let decoded = decode_entities(text);
    let with_breaks = line_break_re().replace_all(&decoded, "\n");
    let stripped = tag_re().replace_all(&with_breaks, "");

    collapse_blank_runs(stripped.trim())
}

pub fn decode_entities(text: &str) -> String {
    match decode_html(text) {
        Ok(decoded) => decoded,
        // malformed entities degrade to the input as-is
        Err(_) => text.to_string(),
    }
}

pub fn collapse_blank_runs(text: &str) -> String {
    blank_run_re().replace_all(text, "\n\n").into_owned()
}

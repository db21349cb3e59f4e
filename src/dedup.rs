use regex::Regex;
use std::sync::OnceLock;

use crate::cleaner;

const TRUNCATION_MARKERS: [&str; 4] = ["[...]", "[…]", "...", "…"];

static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_run_re() -> &'static Regex {
    WHITESPACE_RUN_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

// feed-supplied ellipsis endings mean the field was cut short by the source
pub fn is_truncated(text: &str) -> bool {
    let trimmed = text.trim_end();

    TRUNCATION_MARKERS
        .iter()
        .any(|marker| trimmed.ends_with(marker))
}

pub fn combine(title: &str, description: &str, title_truncated: bool) -> String {
    let normalized_title = normalize(title);
    let normalized_description = normalize(description);

    let combined = if title_truncated || normalized_title.is_empty() {
        description.to_string()
    } else if normalized_description.is_empty() {
        title.to_string()
    } else if normalized_description == normalized_title
        || normalized_description.starts_with(&normalized_title)
    {
        description.to_string()
    } else if normalized_title.starts_with(&normalized_description) {
        title.to_string()
    } else if title_matches_lead_line(&normalized_title, description) {
        description.to_string()
    } else {
        format!("{}\n\n{}", title, description)
    };

    cleaner::collapse_blank_runs(combined.trim())
}

fn title_matches_lead_line(normalized_title: &str, description: &str) -> bool {
    let lead_line = description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty());

    match lead_line {
        None => false,
        Some(line) => {
            let lead = normalize(line);

            lead == normalized_title
                || lead.starts_with(normalized_title)
                || normalized_title.starts_with(&lead)
        }
    }
}

fn normalize(text: &str) -> String {
    whitespace_run_re()
        .replace_all(text.trim(), " ")
        .into_owned()
}

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use regex::Regex;
use std::sync::OnceLock;

use crate::cleaner;

const PLATFORM_NAMES: [&str; 6] = [
    "YouTube",
    "Instagram",
    "Facebook",
    "Twitter",
    "Telegram",
    "X",
];

const PROMO_PHRASES: [&str; 7] = [
    "subscribe to our channel",
    "subscribe for more",
    "follow us on",
    "join our channel",
    "click the link",
    "download our app",
    "watch the full video",
];

// lines at least this long are assumed to be prose, not share buttons
const ON_PLATFORM_LINE_LIMIT: usize = 80;

static LINK_RE: OnceLock<Regex> = OnceLock::new();
static EMPTY_PAIR_RE: OnceLock<Regex> = OnceLock::new();
static HORIZONTAL_RUN_RE: OnceLock<Regex> = OnceLock::new();
static ON_PLATFORM_RE: OnceLock<Regex> = OnceLock::new();
static PROMO_MATCHER: OnceLock<AhoCorasick> = OnceLock::new();

pub enum RuleAction {
    Keep,
    Drop,
    Rewrite(String),
}

pub struct LineRule {
    pub name: &'static str,
    pub apply: fn(&str) -> RuleAction,
}

pub const LINE_RULES: [LineRule; 4] = [
    LineRule {
        name: "bare_platform_name",
        apply: drop_bare_platform_names,
    },
    LineRule {
        name: "promo_phrase",
        apply: drop_promo_phrases,
    },
    LineRule {
        name: "on_platform_suffix",
        apply: drop_on_platform_suffixes,
    },
    LineRule {
        name: "glued_platform_prefix",
        apply: strip_glued_platform_prefixes,
    },
];

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:https?://|www\.|t\.me/|telegram\.me/)[^\s()\[\]<>]+").unwrap()
    })
}

fn empty_pair_re() -> &'static Regex {
    EMPTY_PAIR_RE.get_or_init(|| Regex::new(r"\(\s*\)|\[\s*\]").unwrap())
}

fn horizontal_run_re() -> &'static Regex {
    HORIZONTAL_RUN_RE.get_or_init(|| Regex::new(r"[ \t]{2,}").unwrap())
}

fn on_platform_re() -> &'static Regex {
    ON_PLATFORM_RE.get_or_init(|| {
        let names = PLATFORM_NAMES.join("|");

        Regex::new(&format!(r"(?i)\bon ({names})\s*[.!]?\s*$")).unwrap()
    })
}

fn promo_matcher() -> &'static AhoCorasick {
    PROMO_MATCHER.get_or_init(|| {
        AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(PROMO_PHRASES)
    })
}

pub fn strip_noise(text: &str) -> String {
    let without_links = link_re().replace_all(text, "");
    let without_empty_pairs = empty_pair_re().replace_all(&without_links, "");

    let filtered = without_empty_pairs
        .lines()
        .filter_map(filter_line)
        .collect::<Vec<String>>()
        .join("\n");

    let collapsed = horizontal_run_re().replace_all(&filtered, " ");

    cleaner::collapse_blank_runs(collapsed.trim())
}

fn filter_line(line: &str) -> Option<String> {
    let mut current = line.trim().to_string();

    for rule in &LINE_RULES {
        match (rule.apply)(&current) {
            RuleAction::Keep => (),
            RuleAction::Drop => {
                log::debug!("Dropped a line via the {} rule", rule.name);

                return None;
            }
            RuleAction::Rewrite(rewritten) => current = rewritten,
        }
    }

    Some(current)
}

fn drop_bare_platform_names(line: &str) -> RuleAction {
    let is_bare = PLATFORM_NAMES
        .iter()
        .any(|name| line.eq_ignore_ascii_case(name));

    if is_bare {
        RuleAction::Drop
    } else {
        RuleAction::Keep
    }
}

fn drop_promo_phrases(line: &str) -> RuleAction {
    if promo_matcher().is_match(line) {
        RuleAction::Drop
    } else {
        RuleAction::Keep
    }
}

fn drop_on_platform_suffixes(line: &str) -> RuleAction {
    if line.chars().count() < ON_PLATFORM_LINE_LIMIT && on_platform_re().is_match(line) {
        RuleAction::Drop
    } else {
        RuleAction::Keep
    }
}

fn strip_glued_platform_prefixes(line: &str) -> RuleAction {
    for name in PLATFORM_NAMES {
        // single-letter names are too ambiguous to strip from real words
        if name.len() < 2 {
            continue;
        }

        let Some(rest) = line.strip_prefix(name) else {
            continue;
        };

        match rest.chars().next() {
            Some(next) if !next.is_ascii_lowercase() && !next.is_whitespace() => {
                let rest = rest.trim_start_matches([':', '-', '|', '·']).trim_start();

                if !rest.is_empty() {
                    return RuleAction::Rewrite(rest.to_string());
                }
            }
            _ => (),
        }
    }

    RuleAction::Keep
}

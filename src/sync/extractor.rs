use regex::Regex;
use std::sync::OnceLock;

use crate::cleaner;
use crate::dedup;
use crate::filters;
use crate::sync::media;

static ITEM_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_RE: OnceLock<Regex> = OnceLock::new();
static DESCRIPTION_RE: OnceLock<Regex> = OnceLock::new();
static LINK_RE: OnceLock<Regex> = OnceLock::new();
static GUID_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    pub identity: String,
    pub text: String,
    pub media_url: Option<String>,
}

fn item_re() -> &'static Regex {
    ITEM_RE.get_or_init(|| Regex::new(r"(?is)<item\b[^>]*>(.*?)</item>").unwrap())
}

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").unwrap())
}

fn description_re() -> &'static Regex {
    DESCRIPTION_RE.get_or_init(|| Regex::new(r"(?is)<description\b[^>]*>(.*?)</description>").unwrap())
}

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r"(?is)<link\b[^>]*>(.*?)</link>").unwrap())
}

fn guid_re() -> &'static Regex {
    GUID_RE.get_or_init(|| Regex::new(r"(?is)<guid\b[^>]*>(.*?)</guid>").unwrap())
}

pub fn extract_latest(document: &str) -> Option<FeedItem> {
    let captures = match item_re().captures(document) {
        Some(captures) => captures,
        None => {
            log::info!("The feed document contains no item records");

            return None;
        }
    };
    let record = captures.get(1).map_or("", |group| group.as_str());

    let raw_title = field(title_re(), record);
    let raw_description = field(description_re(), record);
    let link = field(link_re(), record);
    let guid = field(guid_re(), record);

    let identity = if guid.is_empty() { link } else { guid };

    if identity.is_empty() {
        log::info!("The latest record has neither guid nor link, skipping it");

        return None;
    }

    let cleaned_title = cleaner::clean_markup(&raw_title);
    let cleaned_description = media::strip_placeholder(&cleaner::clean_markup(&raw_description));

    let title = filters::strip_noise(&cleaned_title);
    let description = filters::strip_noise(&cleaned_description);

    let title_truncated = dedup::is_truncated(&raw_title) || dedup::is_truncated(&cleaned_title);
    let text = dedup::combine(&title, &description, title_truncated);

    if text.is_empty() {
        log::info!("The latest record has no usable content, skipping it");

        return None;
    }

    let decoded_description = cleaner::decode_entities(&raw_description);
    let media_url = media::resolve(record, &decoded_description);

    Some(FeedItem {
        identity,
        text,
        media_url,
    })
}

fn field(re: &Regex, record: &str) -> String {
    match re.captures(record) {
        Some(captures) => strip_cdata(captures[1].trim()).to_string(),
        None => String::new(),
    }
}

fn strip_cdata(value: &str) -> &str {
    value
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .unwrap_or(value)
        .trim()
}

use regex::Regex;
use std::sync::OnceLock;

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

static ENCLOSURE_RE: OnceLock<Regex> = OnceLock::new();
static URL_ATTR_RE: OnceLock<Regex> = OnceLock::new();
static TYPE_ATTR_RE: OnceLock<Regex> = OnceLock::new();
static ANCHOR_RE: OnceLock<Regex> = OnceLock::new();
static IMG_RE: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn enclosure_re() -> &'static Regex {
    ENCLOSURE_RE.get_or_init(|| Regex::new(r"(?i)<enclosure\b[^>]*>").unwrap())
}

fn url_attr_re() -> &'static Regex {
    URL_ATTR_RE.get_or_init(|| Regex::new(r#"(?i)\burl="([^"]+)""#).unwrap())
}

fn type_attr_re() -> &'static Regex {
    TYPE_ATTR_RE.get_or_init(|| Regex::new(r#"(?i)\btype="([^"]+)""#).unwrap())
}

fn anchor_re() -> &'static Regex {
    ANCHOR_RE.get_or_init(|| Regex::new(r#"(?i)<a\b[^>]*\bhref="([^"]+)""#).unwrap())
}

fn img_re() -> &'static Regex {
    IMG_RE.get_or_init(|| Regex::new(r#"(?i)<img\b[^>]*\bsrc="([^"]+)""#).unwrap())
}

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"^\s*\[(?:Photo|Media)\]\s*").unwrap())
}

// an anchor usually points at the full resolution file, an img tag at a thumbnail
pub fn resolve(item_record: &str, description: &str) -> Option<String> {
    find_image_enclosure(item_record)
        .or_else(|| find_full_resolution_anchor(description))
        .or_else(|| find_inline_image(description))
}

pub fn strip_placeholder(text: &str) -> String {
    placeholder_re().replace(text, "").into_owned()
}

fn find_image_enclosure(record: &str) -> Option<String> {
    for tag_match in enclosure_re().find_iter(record) {
        let tag = tag_match.as_str();

        let is_image = type_attr_re()
            .captures(tag)
            .map_or(false, |captures| {
                captures[1].to_ascii_lowercase().starts_with("image/")
            });

        if !is_image {
            continue;
        }

        if let Some(captures) = url_attr_re().captures(tag) {
            return Some(captures[1].to_string());
        }
    }

    None
}

fn find_full_resolution_anchor(description: &str) -> Option<String> {
    anchor_re()
        .captures_iter(description)
        .map(|captures| captures[1].to_string())
        .find(|url| has_image_extension(url))
}

fn find_inline_image(description: &str) -> Option<String> {
    img_re()
        .captures(description)
        .map(|captures| captures[1].to_string())
}

fn has_image_extension(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    let path = lowered
        .split_once('?')
        .map_or(lowered.as_str(), |(path, _)| path);
    let path = path.split_once('#').map_or(path, |(path, _)| path);

    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::{resolve, strip_placeholder};

    #[test]
    fn it_prefers_image_enclosures_over_inline_markup() {
        let record = r#"<enclosure url="https://cdn.example.com/full.jpg" type="image/jpeg" length="48213"/>"#;
        let description = r#"<a href="https://cdn.example.com/other.png">photo</a>"#;

        assert_eq!(
            Some("https://cdn.example.com/full.jpg".to_string()),
            resolve(record, description)
        );
    }

    #[test]
    fn it_ignores_enclosures_with_non_image_types() {
        let record = r#"<enclosure url="https://cdn.example.com/audio.mp3" type="audio/mpeg"/>"#;
        let description = r#"<img src="https://cdn.example.com/thumb.png">"#;

        assert_eq!(
            Some("https://cdn.example.com/thumb.png".to_string()),
            resolve(record, description)
        );
    }

    #[test]
    fn it_prefers_anchors_pointing_at_full_resolution_images() {
        let description = r#"<a href="https://cdn.example.com/full.JPG?size=orig"><img src="https://cdn.example.com/thumb.jpg"></a>"#;

        assert_eq!(
            Some("https://cdn.example.com/full.JPG?size=orig".to_string()),
            resolve("", description)
        );
    }

    #[test]
    fn it_skips_anchors_without_image_targets() {
        let description =
            r#"<a href="https://example.com/article">read</a><img src="https://cdn.example.com/pic.webp">"#;

        assert_eq!(
            Some("https://cdn.example.com/pic.webp".to_string()),
            resolve("", description)
        );
    }

    #[test]
    fn it_returns_none_for_text_only_items() {
        assert_eq!(None, resolve("<title>plain</title>", "Just words"));
    }

    #[test]
    fn it_strips_leading_photo_placeholders() {
        assert_eq!(
            "Sunset over the bay",
            strip_placeholder("[Photo] Sunset over the bay")
        );
        assert_eq!(
            "Crowd at the rally",
            strip_placeholder("[Media] Crowd at the rally")
        );
        assert_eq!(
            "No placeholder here",
            strip_placeholder("No placeholder here")
        );
    }
}

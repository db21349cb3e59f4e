use std::env;
use typed_builder::TypedBuilder;

const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org/bot";
const DEFAULT_MARKER_PATH: &str = "last_posted.txt";

#[derive(Clone, Debug, TypedBuilder)]
pub struct Config {
    #[builder(setter(into))]
    pub feed_url: String,
    #[builder(setter(into))]
    pub telegram_bot_token: String,
    #[builder(setter(into), default = DEFAULT_TELEGRAM_BASE_URL.to_string())]
    pub telegram_base_url: String,
    #[builder(setter(into))]
    pub target_chat: String,
    #[builder(setter(into), default)]
    pub header_text: Option<String>,
    #[builder(setter(into), default)]
    pub footer_text: String,
    #[builder(setter(into), default = DEFAULT_MARKER_PATH.to_string())]
    pub marker_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            feed_url: env::var("FEED_URL").expect("No FEED_URL environment variable found"),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .expect("No TELEGRAM_BOT_TOKEN environment variable found"),
            telegram_base_url: env::var("TELEGRAM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_BASE_URL.to_string()),
            target_chat: env::var("TARGET_CHAT")
                .expect("No TARGET_CHAT environment variable found"),
            header_text: env::var("HEADER_TEXT").ok(),
            footer_text: env::var("FOOTER_TEXT").unwrap_or_default(),
            marker_path: env::var("MARKER_PATH")
                .unwrap_or_else(|_| DEFAULT_MARKER_PATH.to_string()),
        }
    }

    pub fn request_timeout_in_seconds() -> u64 {
        env::var("REQUEST_TIMEOUT_IN_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .expect("REQUEST_TIMEOUT_IN_SECONDS should parse to an integer")
    }
}

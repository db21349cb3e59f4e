use crate::config::Config;
use isahc::config::Configurable;
use isahc::config::RedirectPolicy;
use isahc::HttpClient;
use std::sync::OnceLock;
use std::time::Duration;

const REDIRECT_LIMIT: u32 = 10;

static CLIENT: OnceLock<HttpClient> = OnceLock::new();

pub fn client() -> &'static HttpClient {
    CLIENT.get_or_init(|| {
        HttpClient::builder()
            .redirect_policy(RedirectPolicy::Limit(REDIRECT_LIMIT))
            .timeout(Duration::from_secs(Config::request_timeout_in_seconds()))
            .build()
            .unwrap()
    })
}

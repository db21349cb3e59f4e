use crate::bot::telegram_client;
use crate::bot::telegram_client::{Api, PhotoMessageParams, SimpleMessageParams};
use crate::config::Config;
use crate::deliver::render_message::MessageRenderer;
use crate::marker::{self, MarkerStore, Verdict};
use crate::sync::extractor::{self, FeedItem};
use crate::sync::reader;
use crate::sync::reader::FeedReaderError;

#[derive(Debug)]
pub enum RunOutcome {
    Posted(String),
    Unchanged,
    NothingToPost,
}

#[derive(Debug)]
pub enum RunError {
    FeedUnavailable(FeedReaderError),
    SinkDispatchFailed(telegram_client::Error),
    MarkerStoreFailed(std::io::Error),
}

impl From<FeedReaderError> for RunError {
    fn from(error: FeedReaderError) -> Self {
        RunError::FeedUnavailable(error)
    }
}

impl From<telegram_client::Error> for RunError {
    fn from(error: telegram_client::Error) -> Self {
        RunError::SinkDispatchFailed(error)
    }
}

impl From<std::io::Error> for RunError {
    fn from(error: std::io::Error) -> Self {
        RunError::MarkerStoreFailed(error)
    }
}

pub struct RelayJob {
    config: Config,
}

impl RelayJob {
    pub fn new(config: Config) -> Self {
        RelayJob { config }
    }

    pub fn execute(&self) -> Result<RunOutcome, RunError> {
        log::info!("Started checking {} for updates", self.config.feed_url);

        let document = reader::read_url(&self.config.feed_url)?;

        let Some(item) = extractor::extract_latest(&document) else {
            return Ok(RunOutcome::NothingToPost);
        };

        let store = MarkerStore::new(self.config.marker_path.clone());
        let last_seen = store.read()?;

        if marker::detect(&item.identity, &last_seen) == Verdict::Unchanged {
            log::info!("The latest item {} was already posted", item.identity);

            return Ok(RunOutcome::Unchanged);
        }

        self.dispatch(&item)?;

        // an identity that fails to persist here is re-sent on the next run
        store.write(&item.identity)?;

        log::info!("Successfully posted item {}", item.identity);

        Ok(RunOutcome::Posted(item.identity))
    }

    fn dispatch(&self, item: &FeedItem) -> Result<(), telegram_client::Error> {
        let api = Api::new(&self.config);
        let chat = telegram_client::chat_id(&self.config.target_chat);

        let renderer = MessageRenderer::builder()
            .header(self.config.header_text.clone())
            .body(item.text.clone())
            .footer(self.config.footer_text.clone())
            .build();

        match &item.media_url {
            Some(url) => {
                let params = PhotoMessageParams::builder()
                    .chat(chat)
                    .photo_url(url.clone())
                    .caption(renderer.render_caption())
                    .build();

                api.send_photo_message(&params)
            }
            None => {
                let params = SimpleMessageParams::builder()
                    .chat(chat)
                    .message(renderer.render_text())
                    .build();

                api.send_text_message(&params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RelayJob, RunOutcome};
    use crate::config::Config;
    use mockito::mock;

    const TEXT_FEED_BODY: &str = "<rss><channel><item><title>Reservoir levels recover</title><description>Reservoir levels recovered to seasonal averages this week.</description><link>https://news.example.com/reservoir</link><guid>news-77</guid></item></channel></rss>";

    const PHOTO_FEED_BODY: &str = r#"<rss><channel><item><title>Harvest festival opens</title><description>Harvest festival opened with a record number of stalls.</description><guid>news-78</guid><enclosure url="https://cdn.example.com/festival.jpg" type="image/jpeg"/></item></channel></rss>"#;

    const MESSAGE_RESPONSE: &str =
        r#"{"ok":true,"result":{"message_id":1,"date":0,"chat":{"id":1,"type":"channel"}}}"#;

    fn test_config(feed_path: &str, token: &str, marker_path: &str) -> Config {
        Config::builder()
            .feed_url(format!("{}{}", mockito::server_url(), feed_path))
            .telegram_bot_token(token)
            .telegram_base_url(format!("{}/bot", mockito::server_url()))
            .target_chat("@updates")
            .footer_text("Follow @updates")
            .marker_path(marker_path)
            .build()
    }

    #[test]
    fn it_posts_the_latest_item_once() {
        let feed_path = "/relay_feed";
        let _feed_mock = mock("GET", feed_path)
            .with_status(200)
            .with_body(TEXT_FEED_BODY)
            .create();
        let _telegram_mock = mock("POST", "/botfirst/sendMessage")
            .with_status(200)
            .with_body(MESSAGE_RESPONSE)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let marker_path = dir.path().join("last_posted.txt");
        let config = test_config(feed_path, "first", marker_path.to_str().unwrap());
        let job = RelayJob::new(config);

        assert!(matches!(job.execute().unwrap(), RunOutcome::Posted(_)));
        assert_eq!("news-77", std::fs::read_to_string(&marker_path).unwrap());

        assert!(matches!(job.execute().unwrap(), RunOutcome::Unchanged));
    }

    #[test]
    fn it_keeps_the_marker_untouched_when_the_sink_rejects_the_message() {
        let feed_path = "/relay_feed_rejected";
        let _feed_mock = mock("GET", feed_path)
            .with_status(200)
            .with_body(TEXT_FEED_BODY)
            .create();
        let _telegram_mock = mock("POST", "/botsecond/sendMessage")
            .with_status(400)
            .with_body(
                r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
            )
            .create();

        let dir = tempfile::tempdir().unwrap();
        let marker_path = dir.path().join("last_posted.txt");
        let config = test_config(feed_path, "second", marker_path.to_str().unwrap());
        let job = RelayJob::new(config);

        assert!(job.execute().is_err());
        assert!(!marker_path.exists());
    }

    #[test]
    fn it_posts_photos_with_captions() {
        let feed_path = "/relay_feed_photo";
        let _feed_mock = mock("GET", feed_path)
            .with_status(200)
            .with_body(PHOTO_FEED_BODY)
            .create();
        let telegram_mock = mock("POST", "/botthird/sendPhoto")
            .with_status(200)
            .with_body(MESSAGE_RESPONSE)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let marker_path = dir.path().join("last_posted.txt");
        let config = test_config(feed_path, "third", marker_path.to_str().unwrap());
        let job = RelayJob::new(config);

        assert!(matches!(job.execute().unwrap(), RunOutcome::Posted(_)));

        telegram_mock.assert();
        assert_eq!("news-78", std::fs::read_to_string(&marker_path).unwrap());
    }

    #[test]
    fn it_reports_nothing_to_post_for_empty_feeds() {
        let feed_path = "/relay_feed_empty";
        let _feed_mock = mock("GET", feed_path)
            .with_status(200)
            .with_body("<rss><channel></channel></rss>")
            .create();

        let dir = tempfile::tempdir().unwrap();
        let marker_path = dir.path().join("last_posted.txt");
        let config = test_config(feed_path, "fourth", marker_path.to_str().unwrap());
        let job = RelayJob::new(config);

        assert!(matches!(
            job.execute().unwrap(),
            RunOutcome::NothingToPost
        ));
        assert!(!marker_path.exists());
    }

    #[test]
    fn it_fails_when_the_feed_is_unavailable() {
        let feed_path = "/relay_feed_down";
        let _feed_mock = mock("GET", feed_path).with_status(502).create();

        let dir = tempfile::tempdir().unwrap();
        let marker_path = dir.path().join("last_posted.txt");
        let config = test_config(feed_path, "fifth", marker_path.to_str().unwrap());
        let job = RelayJob::new(config);

        assert!(job.execute().is_err());
    }
}

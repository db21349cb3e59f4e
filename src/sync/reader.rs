use isahc::prelude::*;

use crate::http_client;

#[derive(Debug)]
pub struct FeedReaderError {
    pub msg: String,
}

pub fn read_url(url: &str) -> Result<String, FeedReaderError> {
    let mut response = match http_client::client().get(url) {
        Ok(response) => response,
        Err(error) => {
            let msg = format!("{:?}", error);

            return Err(FeedReaderError { msg });
        }
    };

    if !response.status().is_success() {
        let msg = format!("unexpected status {}", response.status());

        return Err(FeedReaderError { msg });
    }

    match response.text() {
        Ok(body) => Ok(body),
        Err(error) => {
            let msg = format!("{:?}", error);

            Err(FeedReaderError { msg })
        }
    }
}

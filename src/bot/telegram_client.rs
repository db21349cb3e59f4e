use frankenstein::ChatId;
use frankenstein::ErrorResponse;
use frankenstein::FileUpload;
use frankenstein::LinkPreviewOptions;
use frankenstein::SendMessageParams;
use frankenstein::SendPhotoParams;
use frankenstein::TelegramApi;
use isahc::prelude::*;
use isahc::HttpClient;
use isahc::Request;
use std::path::PathBuf;
use typed_builder::TypedBuilder;

use crate::config::Config;
use crate::http_client;

#[derive(Clone, Debug)]
pub struct Api {
    pub api_url: String,
    pub http_client: HttpClient,
}

#[derive(Debug)]
pub enum Error {
    HttpError(HttpError),
    ApiError(ErrorResponse),
}

#[derive(Eq, PartialEq, Debug)]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}

#[derive(TypedBuilder)]
pub struct SimpleMessageParams {
    chat: ChatId,
    #[builder(setter(into))]
    message: String,
    #[builder(default = false)]
    preview_enabled: bool,
}

#[derive(TypedBuilder)]
pub struct PhotoMessageParams {
    chat: ChatId,
    #[builder(setter(into))]
    photo_url: String,
    #[builder(setter(into))]
    caption: String,
}

pub fn chat_id(target: &str) -> ChatId {
    match target.parse::<i64>() {
        Ok(id) => ChatId::Integer(id),
        Err(_) => ChatId::String(target.to_string()),
    }
}

impl Api {
    pub fn new(config: &Config) -> Api {
        let api_url = format!("{}{}", config.telegram_base_url, config.telegram_bot_token);
        let http_client = http_client::client().clone();

        Api {
            api_url,
            http_client,
        }
    }

    pub fn send_text_message(&self, params: &SimpleMessageParams) -> Result<(), Error> {
        let preview_params = LinkPreviewOptions::builder()
            .is_disabled(!params.preview_enabled)
            .build();

        let message_params = SendMessageParams::builder()
            .chat_id(params.chat.clone())
            .text(params.message.clone())
            .link_preview_options(preview_params)
            .build();

        match self.send_message(&message_params) {
            Ok(_) => Ok(()),
            Err(error) => {
                log::error!("Failed to send a message: {:?}", error);

                Err(error)
            }
        }
    }

    pub fn send_photo_message(&self, params: &PhotoMessageParams) -> Result<(), Error> {
        let photo_params = SendPhotoParams::builder()
            .chat_id(params.chat.clone())
            .photo(FileUpload::String(params.photo_url.clone()))
            .caption(params.caption.clone())
            .build();

        match self.send_photo(&photo_params) {
            Ok(_) => Ok(()),
            Err(error) => {
                log::error!("Failed to send a photo: {:?}", error);

                Err(error)
            }
        }
    }
}

impl From<isahc::http::Error> for Error {
    fn from(error: isahc::http::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl From<isahc::Error> for Error {
    fn from(error: isahc::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl TelegramApi for Api {
    type Error = Error;

    fn request<T1: serde::ser::Serialize, T2: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Option<T1>,
    ) -> Result<T2, Error> {
        let url = format!("{}/{method}", self.api_url);

        let request_builder = Request::post(url).header("Content-Type", "application/json");

        let mut response = match params {
            None => {
                let request = request_builder.body(())?;

                self.http_client.send(request)?
            }
            Some(data) => {
                let json = serde_json::to_string(&data)?;
                let request = request_builder.body(json)?;

                self.http_client.send(request)?
            }
        };

        let mut bytes = Vec::new();
        response.copy_to(&mut bytes)?;

        match serde_json::from_slice(&bytes) {
            Ok(result) => Ok(result),
            Err(_) => match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(error_response) => Err(Error::ApiError(error_response)),
                Err(error) => {
                    let message = format!("{:?} {error:?}", std::str::from_utf8(&bytes));

                    let error = HttpError { code: 500, message };

                    Err(Error::HttpError(error))
                }
            },
        }
    }

    // isahc doesn't support multipart uploads, photos are dispatched by URL
    // so form data requests never happen
    fn request_with_form_data<T1: serde::ser::Serialize, T2: serde::de::DeserializeOwned>(
        &self,
        _method: &str,
        _params: T1,
        _files: Vec<(&str, PathBuf)>,
    ) -> Result<T2, Error> {
        let error = HttpError {
            code: 500,
            message: "multipart requests are not supported".to_string(),
        };

        Err(Error::HttpError(error))
    }
}

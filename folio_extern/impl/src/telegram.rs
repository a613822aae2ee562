use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use folio_extern_contracts::telegram::{TelegramApiService, TelegramSendMessageError};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

const API_ENDPOINT: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramApiServiceImpl {
    config: TelegramApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct TelegramApiServiceConfig {
    api_endpoint: Arc<Url>,
    timeout: Option<Duration>,
}

impl TelegramApiServiceConfig {
    pub fn new(api_endpoint_override: Option<Url>, timeout: Option<Duration>) -> Self {
        Self {
            api_endpoint: api_endpoint_override
                .unwrap_or_else(|| Url::parse(API_ENDPOINT).expect("valid telegram api endpoint"))
                .into(),
            timeout,
        }
    }

    /// `{endpoint}/bot{token}/sendMessage`
    fn send_message_url(&self, bot_token: &str) -> anyhow::Result<Url> {
        let mut url = (*self.api_endpoint).clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Telegram api endpoint {} is not a base url", self.api_endpoint))?
            .pop_if_empty()
            .push(&format!("bot{bot_token}"))
            .push("sendMessage");
        Ok(url)
    }
}

impl TelegramApiServiceImpl {
    pub fn new(config: TelegramApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl TelegramApiService for TelegramApiServiceImpl {
    async fn send_message(
        &self,
        bot_token: &str,
        chat_id: &str,
        text: &str,
    ) -> Result<(), TelegramSendMessageError> {
        let url = self.config.send_message_url(bot_token)?;

        let mut request = self
            .client
            .post(url)
            .json(&SendMessageRequest { chat_id, text });
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        // the url contains the bot token and must not end up in error messages
        let response = request
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to telegram bot api")?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            debug!(%status, %details, "telegram bot api rejected message");
            return Err(TelegramSendMessageError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

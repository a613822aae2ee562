use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TelegramApiService: Send + Sync + 'static {
    /// Send a plain text message to the chat `chat_id` using the bot
    /// identified by `bot_token`.
    fn send_message(
        &self,
        bot_token: &str,
        chat_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), TelegramSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum TelegramSendMessageError {
    /// The bot api answered with a non-success status code.
    #[error("Telegram bot api rejected the message with status {status}.")]
    Rejected { status: u16, details: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockTelegramApiService {
    pub fn with_send_message(
        mut self,
        bot_token: String,
        chat_id: String,
        text: String,
        result: Result<(), TelegramSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(bot_token),
                mockall::predicate::eq(chat_id),
                mockall::predicate::eq(text),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }
}

use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_extern_contracts::telegram::{TelegramApiService, TelegramSendMessageError};
use folio_models::{contact::ContactMessage, Sensitive};
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<TelegramApi> {
    telegram_api: TelegramApi,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureConfig {
    pub bot_token: Option<Sensitive<Arc<str>>>,
    pub chat_id: Option<Arc<str>>,
    pub site_name: Option<Arc<str>>,
}

impl ContactFeatureConfig {
    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }

    /// Bot token and chat id, if both are set and non-empty.
    fn credentials(&self) -> Option<(&str, &str)> {
        let bot_token = self.bot_token.as_ref().map(|t| &*t.0).filter(|t| !t.is_empty())?;
        let chat_id = self.chat_id.as_deref().filter(|c| !c.is_empty())?;
        Some((bot_token, chat_id))
    }
}

impl<TelegramApi> ContactFeatureServiceImpl<TelegramApi> {
    pub fn new(telegram_api: TelegramApi, config: ContactFeatureConfig) -> Self {
        Self {
            telegram_api,
            config,
        }
    }
}

impl<TelegramApi> ContactFeatureService for ContactFeatureServiceImpl<TelegramApi>
where
    TelegramApi: TelegramApiService,
{
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let Some((bot_token, chat_id)) = self.config.credentials() else {
            warn!("dropping contact message, telegram bot token or chat id not configured");
            return Err(ContactSendMessageError::NotConfigured);
        };

        let text = format_message(self.config.site_name.as_deref(), &message);

        match self
            .telegram_api
            .send_message(bot_token, chat_id, &text)
            .await
        {
            Ok(()) => Ok(()),
            Err(TelegramSendMessageError::Rejected { status, details }) => {
                error!(status, "failed to relay contact message");
                Err(ContactSendMessageError::Send {
                    details: Some(details),
                })
            }
            Err(TelegramSendMessageError::Other(err)) => {
                error!("failed to relay contact message: {err:#}");
                Err(ContactSendMessageError::Send { details: None })
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }
}

fn format_message(site_name: Option<&str>, message: &ContactMessage) -> String {
    let header = match site_name {
        Some(site_name) => format!("New message from {site_name} contact form"),
        None => "New message from contact form".into(),
    };

    format!(
        "📧 {header}\n\n👤 Name: {}\n📬 Email: {}\n💬 Message: {}",
        *message.author.name, *message.author.email, *message.content
    )
}

use anyhow::{bail, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::contact::{ContactMessage, ContactMessageAuthor};

use crate::environment::Environment;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Relay a test message through the configured telegram bot
    Test {
        /// Name of the sender
        #[arg(long, default_value = "Folio")]
        name: String,
        /// Email address of the sender
        #[arg(long, default_value = "folio@localhost")]
        email: String,
        /// The message to send
        #[arg(default_value = "Contact form relay seems to be working!")]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Test {
                name,
                email,
                message,
            } => test(&config, name, email, message).await,
        }
    }
}

async fn test(
    config: &Config,
    name: String,
    email: String,
    message: String,
) -> anyhow::Result<()> {
    let message = ContactMessage {
        author: ContactMessageAuthor {
            name: name.try_into().context("Invalid name")?,
            email: email.try_into().context("Invalid email")?,
        },
        content: message.try_into().context("Invalid message")?,
    };

    let contact = Environment::new(config).contact_feature()?;

    match contact.send_message(message).await {
        Ok(()) => Ok(()),
        Err(ContactSendMessageError::NotConfigured) => {
            bail!("Telegram bot token or chat id not configured")
        }
        Err(ContactSendMessageError::Send { details }) => {
            bail!(
                "Failed to send message: {}",
                details.as_deref().unwrap_or("no details available")
            )
        }
    }
}

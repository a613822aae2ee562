use std::future::Future;

use folio_models::contact::ContactMessage;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Relay a contact form message to the site owner.
    ///
    /// Every call results in at most one outgoing notification. Calls are not
    /// deduplicated, sending the same message twice notifies twice.
    fn send_message(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;

    /// Whether the credentials needed to relay messages are configured.
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("The contact relay is not configured.")]
    NotConfigured,
    #[error("Failed to send message.")]
    Send { details: Option<String> },
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        message: ContactMessage,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_is_configured(mut self, configured: bool) -> Self {
        self.expect_is_configured().return_const(configured);
        self
    }
}

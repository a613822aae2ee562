use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use folio_core_profile_impl::{ProfileFeatureConfig, ProfileFeatureServiceImpl};
use folio_extern_impl::{
    http::HttpClient,
    telegram::{TelegramApiServiceConfig, TelegramApiServiceImpl},
};
use folio_models::Sensitive;
use types::{ContactFeature, ProfileFeature, RestServer, TelegramApi};

pub mod types;

/// Service configs derived from the [`Config`], used to assemble the services.
#[derive(Debug, Clone)]
pub struct Environment {
    // API
    rest_server_config: RestServerConfig,

    // Extern
    telegram_api_service_config: TelegramApiServiceConfig,

    // Core
    contact_feature_config: ContactFeatureConfig,
    profile_feature_config: ProfileFeatureConfig,
}

impl Environment {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
        };

        // Extern
        let telegram_api_service_config = TelegramApiServiceConfig::new(
            config.telegram.api_endpoint_override.clone(),
            config.telegram.timeout.map(Into::into),
        );

        // Core
        let contact_feature_config = ContactFeatureConfig {
            bot_token: config
                .telegram
                .bot_token
                .as_ref()
                .map(|token| Sensitive(token.as_str().into())),
            chat_id: config.telegram.chat_id.as_deref().map(Into::into),
            site_name: config.contact.site_name.as_deref().map(Into::into),
        };

        let profile_feature_config = ProfileFeatureConfig {
            profile: Arc::new(config.profile.clone()),
        };

        Self {
            rest_server_config,
            telegram_api_service_config,
            contact_feature_config,
            profile_feature_config,
        }
    }

    pub fn is_contact_configured(&self) -> bool {
        self.contact_feature_config.is_complete()
    }

    pub fn telegram_api(&self) -> anyhow::Result<TelegramApi> {
        Ok(TelegramApiServiceImpl::new(
            self.telegram_api_service_config.clone(),
            HttpClient::new()?,
        ))
    }

    pub fn contact_feature(&self) -> anyhow::Result<ContactFeature> {
        Ok(ContactFeatureServiceImpl::new(
            self.telegram_api()?,
            self.contact_feature_config.clone(),
        ))
    }

    pub fn profile_feature(&self) -> ProfileFeature {
        ProfileFeatureServiceImpl::new(self.profile_feature_config.clone())
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        Ok(RestServer::new(
            self.rest_server_config.clone(),
            self.contact_feature()?,
            self.profile_feature(),
        ))
    }
}

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_profile_contracts::ProfileFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact, Profile> {
    config: RestServerConfig,
    contact: Contact,
    profile: Profile,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Contact, Profile> RestServer<Contact, Profile>
where
    Contact: ContactFeatureService,
    Profile: ProfileFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact, profile: Profile) -> Self {
        Self {
            config,
            contact,
            profile,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        info!("Starting http server on {addr}");
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let contact = Arc::new(self.contact);

        let router = Router::new()
            .merge(routes::health::router(Arc::clone(&contact)))
            .merge(routes::contact::router(contact))
            .merge(routes::profile::router(self.profile.into()))
            .fallback(routes::not_found);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

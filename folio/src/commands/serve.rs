use folio_config::Config;
use tracing::{info, warn};

use crate::environment::Environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let environment = Environment::new(&config);

    if !environment.is_contact_configured() {
        warn!(
            "Telegram bot token or chat id missing, contact form submissions will be rejected"
        );
    }

    info!("Serving profile of {:?}", config.profile.name);
    environment.rest_server()?.serve().await
}

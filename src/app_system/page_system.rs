use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::app_system::{Config, SystemError};
use crate::clients::{HttpReservationApi, PageClient, ReservationApi};
use crate::notifications::{NotificationCenter, TracingNotifier, TranslationCatalog};
use crate::page_actor::PageService;

/// A running reservation page and its collaborators.
///
/// Responsible for starting the page actor, wiring the backend and the
/// notification surface into it, and shutting it down.
pub struct PageSystem {
    pub page_client: PageClient,
    handle: tokio::task::JoinHandle<()>,
}

impl PageSystem {
    /// Starts a page that talks HTTP to the configured backend and reports
    /// notifications through the log.
    pub fn from_config(config: &Config) -> Result<Self, SystemError> {
        info!(api_base_url = %config.api_base_url, "Starting page system");

        let api = HttpReservationApi::new(
            &config.api_base_url,
            config.api_token.as_deref(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let mut catalog = TranslationCatalog::english();
        if let Some(path) = &config.translations {
            let loaded = TranslationCatalog::from_file(path)?;
            info!(path = %path.display(), entries = loaded.len(), "Translations loaded");
            catalog = catalog.merge(loaded);
        }

        let notifications = NotificationCenter::new(Arc::new(TracingNotifier), Arc::new(catalog));
        Ok(Self::start(Arc::new(api), notifications, config.mailbox_size))
    }

    pub fn start(
        api: Arc<dyn ReservationApi>,
        notifications: NotificationCenter,
        mailbox_size: usize,
    ) -> Self {
        let (service, page_client) = PageService::new(mailbox_size.max(1), api, notifications);
        let handle = tokio::spawn(service.run());
        Self { page_client, handle }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down page system...");
        // A page that already stopped has closed its mailbox; nothing left to tell it.
        if let Err(e) = self.page_client.shutdown().await {
            info!(reason = %e, "Page already stopped");
        }
        drop(self.page_client);

        if let Err(e) = self.handle.await {
            error!("Page task failed: {:?}", e);
            return Err(SystemError::Join(e));
        }

        info!("Page system shutdown complete.");
        Ok(())
    }
}

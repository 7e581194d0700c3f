mod app_system;
mod clients;
mod domain;
mod messages;
mod navigation;
mod notifications;
mod page_actor;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn, Instrument};

use crate::app_system::{setup_tracing, Config, PageSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::parse();
    setup_tracing(&config.log_level);

    info!("Starting reservation desk");
    let system = PageSystem::from_config(&config)?;
    let page = system.page_client.clone();

    let span = tracing::info_span!("page_entry", id = ?config.id);
    let started = async {
        let started = page.enter(config.id.clone()).await?;
        page.wait_until_settled().await?;
        Ok::<_, anyhow::Error>(started)
    }
    .instrument(span)
    .await?;

    if !started {
        warn!("No usable reservation id given, the page stays empty");
    }

    if let (Some(action), Some(target)) = (config.action, config.target) {
        let span = tracing::info_span!("reservation_action", %action, reservation_id = target);
        async {
            page.dispatch_action(action, target).await?;
            page.wait_until_settled().await?;
            Ok::<_, anyhow::Error>(())
        }
        .instrument(span)
        .await?;
    }

    let view = page.get_view().await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    drop(page);
    system.shutdown().await?;

    info!("Reservation desk finished");
    Ok(())
}

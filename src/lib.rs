pub mod api;
pub mod config;
pub mod console;
pub mod forms;
pub mod manager;
pub mod models;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use api::HttpSessionApi;
use config::ClientConfig;
use log::{info, warn};
use manager::SessionManager;

pub fn run() -> anyhow::Result<()> {
    let config = ClientConfig::load()?;

    // Initialize logging (RUST_LOG still wins for individual modules)
    env_logger::Builder::from_default_env()
        .filter_level(if config.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    info!("TRPG session manager talking to {}", config.api_base);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async move {
        let api = HttpSessionApi::new(&config.api_base)?;
        if let Err(err) = api.health().await {
            warn!("{} is not healthy yet: {}", api.base_url(), err);
        }

        let manager = SessionManager::new(Arc::new(api), config.page_size);
        if let Err(err) = manager.refresh().await {
            warn!("first load failed: {}", err);
        }

        console::run_loop(manager, config.color).await
    })
}

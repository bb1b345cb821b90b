mod app;
mod color;
mod config;
mod data;
mod error;
mod fetch;
mod report;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use app::BikeDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // Load, parse and mapping errors end the session before a window opens.
    let dataset = data::loader::load_dataset(&config.daily_path, &config.hourly_path)
        .inspect_err(|e| log::error!("Failed to load data: {e:#}"))
        .context("loading bike-sharing data")?;

    let image = fetch::fetch_sidebar_image(&config.sidebar_image_url, config.image_timeout());

    let state = AppState::new(dataset, image)
        .inspect_err(|e| log::error!("Data integrity check failed: {e:#}"))
        .context("preparing dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can decode the sidebar png/jpg.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(BikeDashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}

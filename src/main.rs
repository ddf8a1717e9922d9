//! Disaster Bars - Animated bar chart of disaster occurrences
//!
//! Loads a CSV of disaster events, counts them per type and year, and shows
//! one year at a time as an animated, sortable bar chart.

mod charts;
mod cli;
mod config;
mod data;
mod gui;
mod logging;

use clap::Parser;
use cli::Cli;
use config::ChartConfig;
use eframe::egui;
use gui::{DisasterApp, StartupOptions};
use logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format.into()));

    let config = match &cli.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };

    let startup = StartupOptions {
        csv: cli.csv,
        year: cli.year,
        sort_mode: cli.sort.into(),
    };

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Disaster Bars"),
        ..Default::default()
    };

    eframe::run_native(
        "Disaster Bars",
        options,
        Box::new(move |cc| Ok(Box::new(DisasterApp::new(cc, config, startup)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {e}"))
}

//! src/main.rs
//!
//! Entrypoint: install error reporting, load config, start logging, and
//! delegate to `app::run()`.

mod app;
mod config;
mod error;
mod logging;
mod monitor;
mod panels;
mod render;
mod schedule;
mod session;
mod stream;
mod ui;

use std::path::PathBuf;

use crate::config::DashboardConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::load(&path)?,
        None => DashboardConfig::default(),
    };
    logging::init(config.log_file.as_deref())?;

    app::run(config)
}

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

use tracker_console::console::registry::ids;
use tracker_console::console::{
    Mount, NavigationController, Shell, Theme, ThemeVariant, WidgetRegistry,
};
use tracker_console::panels::{
    AprsSetup, DigiSetup, KeySetup, StatusInfo, TrklogSetup, WifiSetup,
};
use tracker_console::store::Store;

#[derive(Parser)]
#[command(name = "tracker-console")]
#[command(about = "Terminal configuration console for an APRS tracking device")]
struct Cli {
    /// Directory holding the configuration store (default: platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use the light theme
    #[arg(long)]
    light: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file (truncated each run); the terminal belongs to the TUI.
    let log_file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("tracker-console.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting tracker-console");

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let store = Store::open(&data_dir.join("console.db")).await?;
    let theme = Theme::new(if cli.light {
        ThemeVariant::Latte
    } else {
        ThemeVariant::Mocha
    });

    // Registration happens exactly once; any failure here is fatal.
    let mut registry = WidgetRegistry::new();
    registry.register(ids::KEY_SETUP, Box::new(KeySetup::new()))?;
    registry.register(ids::STATUS_INFO, Box::new(StatusInfo::new()))?;
    registry.register(ids::WIFI_SETUP, Box::new(WifiSetup::new()))?;
    registry.register(ids::APRS_SETUP, Box::new(AprsSetup::new()))?;
    registry.register(ids::DIGI_SETUP, Box::new(DigiSetup::new()))?;
    registry.register(ids::TRKLOG_SETUP, Box::new(TrklogSetup::new()))?;

    let controller = NavigationController::new(registry, Mount { store });
    Shell::new(controller, theme).run().await
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir,
        None => {
            if cfg!(target_os = "linux") {
                dirs::data_dir()
                    .context("Failed to get XDG data directory")?
                    .join("tracker-console")
            } else {
                dirs::home_dir()
                    .context("Failed to get home directory")?
                    .join(".tracker-console")
            }
        }
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        info!("Created data directory: {}", dir.display());
    }
    Ok(dir)
}

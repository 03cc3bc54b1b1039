use anyhow::Result;
use billboard_demo::{BillboardApp, DemoConfig, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use billboard_engine::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_env()?;
    log::info!("data directory: {}", config.data_dir.display());
    log::info!("controls: W/S zoom, A/D or arrows orbit, up/down height, space auto-rotate, G ground");

    billboard_engine::run_application(
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WINDOW_TITLE,
        BillboardApp::new(config),
    )
}

use std::fs::{self, File};
use std::sync::Mutex;
use time_tracker::{
    backend::{Backend, TallyStore},
    event::EventHandler,
    log_info,
    util::{audio::Chime, log::init_log_dir, notify::Notice},
    App, AppConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config_path = AppConfig::path_from_env();
    let config = AppConfig::load(&config_path)?;

    // Everything goes to files; the terminal belongs to the UI
    init_log_dir(&config.log_dir);
    fs::create_dir_all(&config.log_dir)?;
    let trace_file = File::create(config.log_dir.join("trace.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(trace_file))
        .with_ansi(false)
        .init();

    let store = TallyStore::open(&config.database_path)?;
    let (backend, backend_rx) = Backend::new(store, config.window_days);

    let chime = if config.alert.enabled {
        Chime::new_with_speaker(&config.alert.sound_path, config.alert.volume)
    } else {
        Chime::silent()
    };
    let notice = if config.alert.notify {
        Notice::desktop()
    } else {
        Notice::silent()
    };

    log_info!(
        "Starting with {}-minute blocks (config: {})",
        config.block_minutes,
        config_path.display()
    );

    let terminal = ratatui::init();
    let app = App::new(&config, backend, backend_rx, chime, notice, EventHandler::new());
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}

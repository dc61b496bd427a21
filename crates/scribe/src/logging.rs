use std::path::Path;

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

use crate::config;

/// Log to `<data_dir>/scribe.log`; the terminal belongs to the UI.
///
/// The filter comes from `SCRIBE_LOG_LEVEL`, then `RUST_LOG`, then `info`.
pub fn init(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(config::LOG_FILE.clone());
    let log_file = std::fs::File::create(log_path)?;

    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    let env_filter = builder
        .clone()
        .with_env_var(config::LOG_ENV.clone())
        .try_from_env()
        .unwrap_or_else(|_| builder.from_env_lossy());

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

use clap::Parser;
use color_eyre::Result;
use tracing::{info, warn};

use scribe::{
    app::App,
    cli::{Cli, Cmd},
    config::Config,
    errors, logging, run_check,
    theme::Theme,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = Config::new()?;
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate = tick_rate;
    }
    if let Some(frame_rate) = args.frame_rate {
        config.frame_rate = frame_rate;
    }
    errors::init(&config.config.data_dir)?;
    logging::init(&config.config.data_dir)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if config.sources.is_empty() {
        warn!(
            dir = %config.config.config_dir.display(),
            "no configuration file found, using defaults"
        );
    }
    for source in &config.sources {
        info!(file = %source.display(), "loaded configuration");
    }

    match args.cmd.unwrap_or(Cmd::Run) {
        Cmd::Run => {
            let theme = Theme::from_config(&config.theme);
            let mut app = App::new(config, theme)?;
            app.run().await?;
        }
        Cmd::Check {
            input_field_1,
            select_field_1,
        } => {
            let result = run_check(&input_field_1, &select_field_1)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_valid() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

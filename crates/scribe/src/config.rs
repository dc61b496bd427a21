use std::{
    env,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use crate::theme::ThemeConfig;

const DEFAULT_TICK_RATE: f64 = 4.0;
const DEFAULT_FRAME_RATE: f64 = 30.0;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Config files that were found and merged, in load order.
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            tick_rate: DEFAULT_TICK_RATE,
            frame_rate: DEFAULT_FRAME_RATE,
            theme: ThemeConfig::default(),
            sources: Vec::new(),
        }
    }
}

/// Rates become `1 / rate` second intervals, so only finite values above
/// zero are usable.
pub fn check_rate(name: &str, rate: f64) -> Result<f64, config::ConfigError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(config::ConfigError::Message(format!(
            "{name} must be a finite number above 0, got {rate}"
        )))
    }
}

fn default_tick_rate() -> f64 {
    DEFAULT_TICK_RATE
}

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
    pub static ref PANIC_FILE: String = format!("{}-panic.log", env!("CARGO_PKG_NAME"));
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(&get_config_dir(), &get_data_dir())
    }

    /// Layered load: built-in defaults, then `config.json5`, then
    /// `config.toml` from `config_dir` (both optional, later wins).
    pub fn load(config_dir: &Path, data_dir: &Path) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("tick_rate", DEFAULT_TICK_RATE)?
            .set_default("frame_rate", DEFAULT_FRAME_RATE)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut sources = Vec::new();
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            let source = config::File::from(path.clone())
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if path.exists() {
                sources.push(path);
            }
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        check_rate("tick_rate", cfg.tick_rate)?;
        check_rate("frame_rate", cfg.frame_rate)?;
        cfg.sources = sources;
        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "scribe", env!("CARGO_PKG_NAME"))
}

use std::{env, path::PathBuf};

use color_eyre::Result;
use lazy_static::lazy_static;
use paths::PathContext;
use provisioning::SerializeOptions;
use serde::Deserialize;
use tracing::{debug, info};

use crate::cli::Cli;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Directory the `SEP<MAC>.cnf.xml` file is written into.
    pub output_dir: PathBuf,
    pub escape_values: bool,
    /// Ticks per second.
    pub tick_rate: f64,
    /// Frames per second.
    pub frame_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            escape_values: true,
            tick_rate: 4.0,
            frame_rate: 30.0,
        }
    }
}

/// Prefix of every environment override, e.g. `CNF_WIZARD_OUTPUT_DIR`.
pub const ENV_PREFIX: &str = "CNF_WIZARD";

lazy_static! {
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{ENV_PREFIX}_CONFIG")).ok().map(PathBuf::from);
}

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.toml", config::FileFormat::Toml),
];

impl Config {
    /// Defaults, then config files, then `CNF_WIZARD_*` variables, then CLI flags.
    pub fn new(paths: &PathContext, cli: &Cli) -> Result<Self> {
        let config_dir = get_config_dir(paths);
        let mut config = Self::load(&config_dir)?;
        config.apply_cli(cli);
        info!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn load(config_dir: &std::path::Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("output_dir", defaults.output_dir.to_string_lossy().into_owned())?
            .set_default("escape_values", defaults.escape_values)?
            .set_default("tick_rate", defaults.tick_rate)?
            .set_default("frame_rate", defaults.frame_rate)?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            if path.exists() {
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            debug!(dir = %config_dir.display(), "no configuration file, using defaults");
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if cli.no_escape {
            self.escape_values = false;
        }
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            escape_values: self.escape_values,
        }
    }
}

pub fn get_config_dir(paths: &PathContext) -> PathBuf {
    CONFIG_FOLDER.clone().unwrap_or_else(|| paths.config_dir())
}

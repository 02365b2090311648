use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, env_output_format};
use crate::error::Result;

pub struct AppContext {
    pub working_dir: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let working_dir = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &working_dir)?;

        let output_format = Self::resolve_format(cli, Some(&config));

        Ok(Self {
            working_dir,
            config,
            output_format,
        })
    }

    /// Flags win over config and environment; those only fill in when no
    /// flag was given. Without a loaded config the environment alone decides.
    pub fn resolve_format(cli: &Cli, config: Option<&Config>) -> OutputFormat {
        if cli.format_explicit() {
            return cli.output_format();
        }
        match config {
            Some(config) => config.output.format,
            None => env_output_format().unwrap_or_default(),
        }
    }

    /// Context with default config, for tests and library callers.
    pub fn with_config(config: Config, working_dir: PathBuf) -> Self {
        let output_format = config.output.format;
        Self {
            working_dir,
            config,
            output_format,
        }
    }

    pub fn is_json(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}

//! Config command implementation.
//!
//! Prints the effective configuration as TOML, optionally saving it.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::commands::traits::Command;
use crate::config::Config;
use crate::error::Result;

/// Arguments for the config command.
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Also write the configuration to this path.
    pub save: Option<PathBuf>,
}

/// Config command handler.
pub struct ConfigCommand {
    args: ConfigArgs,
    config: Config,
}

impl Command for ConfigCommand {
    type Args = ConfigArgs;

    fn new(args: Self::Args, config: &Config) -> Self {
        Self {
            args,
            config: config.clone(),
        }
    }

    fn execute(&self, out: &mut dyn Write, _err: &mut dyn Write) -> Result<()> {
        write!(out, "{}", self.config.to_toml()?)?;

        if let Some(path) = &self.args.save {
            self.config.save_to_path(path)?;
            info!("configuration saved to {}", path.display());
        }
        Ok(())
    }

    fn name() -> &'static str {
        "config"
    }
}

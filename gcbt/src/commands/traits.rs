//! Command trait and common types for the gcbt CLI.
//!
//! This module defines the standard command trait that all commands
//! must implement to ensure consistency across the application.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Standard command trait that all gcbt commands must implement.
///
/// Commands write their results to `out` and anything meant for the user's
/// attention (warnings, passthrough output) to `err`, so they can be run
/// against in-memory buffers.
///
/// # Type Parameters
/// * `Args` - The arguments type for this command
pub trait Command {
    /// The arguments type for this command.
    type Args;

    /// Create a new command instance with the given arguments.
    ///
    /// # Arguments
    /// * `args` - Command arguments
    /// * `config` - Loaded application configuration
    fn new(args: Self::Args, config: &Config) -> Self;

    /// Execute the command.
    ///
    /// # Arguments
    /// * `out` - Destination for the command's results
    /// * `err` - Destination for warnings
    fn execute(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<()>;

    /// Get the command name.
    fn name() -> &'static str;
}

/// Run a command against the process's standard streams.
pub fn run_stdio<C: Command>(args: C::Args, config: &Config) -> Result<()> {
    tracing::debug!("running {}", C::name());
    let command = C::new(args, config);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    command.execute(&mut out, &mut err)?;
    out.flush()?;
    Ok(())
}

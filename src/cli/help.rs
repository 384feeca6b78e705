//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name recorded in log events (e.g. "run", "tree").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Tree { .. } => "tree",
        Commands::Check { .. } => "check",
        Commands::Run { .. } => "run",
    }
}

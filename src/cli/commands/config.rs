//! Config command - Configuration inspection

use clap::{Parser, Subcommand};
use std::path::Path;

use super::super::utils::load_config;

/// Configuration inspection
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Action to perform
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,

    /// Print the effective configuration (file + environment), secrets masked
    Show,
}

/// Run the config command.
///
/// `path` never reads the file or the environment.
pub fn run(args: ConfigArgs, path: &Path) -> Result<(), String> {
    match args.action {
        ConfigAction::Path => {
            let note = if path.exists() { "" } else { " (not present)" };
            println!("{}{}", path.display(), note);
        }
        ConfigAction::Show => {
            let rendered = load_config(path)?
                .to_redacted_toml()
                .map_err(|e| format!("Failed to render config: {}", e))?;
            print!("{}", rendered);
        }
    }
    Ok(())
}

//! Utility functions for CLI commands

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::Config;

/// Get input text from various sources (text arg, file, or stdin)
pub fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    if let Some(t) = text {
        Ok(t.clone())
    } else if let Some(f) = file {
        read_input_file(f)
    } else if !positional.is_empty() {
        Ok(positional.join(" "))
    } else {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    }
}

/// Read input from file
pub fn read_input_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {}: {}", path, e))
}

/// Default config file location: `<config dir>/entlist/config.toml`
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(mut dir) => {
            dir.push("entlist");
            dir.push("config.toml");
            dir
        }
        // Fallback to current directory
        None => PathBuf::from(".entlist.toml"),
    }
}

/// Config path from the flag, or the default location
pub fn resolve_config_path(flag: Option<&str>) -> PathBuf {
    flag.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Effective configuration: the file at `path` (if any) plus `ENTLIST_*` overrides
pub fn load_config(path: &Path) -> Result<Config, String> {
    Config::load_or_default(path)
        .and_then(Config::with_env)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_flag_wins() {
        let text = Some("flag text".to_string());
        let positional = vec!["ignored".to_string()];
        assert_eq!(
            get_input_text(&text, None, &positional).unwrap(),
            "flag text"
        );
    }

    #[test]
    fn test_positional_joined() {
        let positional = vec!["the".to_string(), "Louvre".to_string()];
        assert_eq!(get_input_text(&None, None, &positional).unwrap(), "the Louvre");
    }

    #[test]
    fn test_missing_file() {
        let err = read_input_file("/definitely/not/here.txt").unwrap_err();
        assert!(err.contains("Failed to read file"));
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            resolve_config_path(Some("/tmp/x.toml")),
            PathBuf::from("/tmp/x.toml")
        );
        assert!(resolve_config_path(None).ends_with("config.toml")
            || resolve_config_path(None).ends_with(".entlist.toml"));
    }
}

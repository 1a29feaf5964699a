//! Path utilities for haltctl.
//!
//! All local state lives under `~/.haltctl/`:
//! - `~/.haltctl/config.toml` - console configuration

use std::path::PathBuf;

/// Returns the haltctl home directory (`~/.haltctl/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".haltctl")
}

/// Returns the default config file path (`~/.haltctl/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_haltctl_home() {
        let config = default_config();

        assert!(home_dir().ends_with(".haltctl"));
        assert!(config.starts_with(home_dir()));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }
}

//! Console configuration, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConsoleError, Result};

/// Tunables for a console instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Characters the output buffer holds before evicting the oldest.
    pub buffer_capacity: usize,
    /// Suggestions shown beside the input line.
    pub suggestion_count: usize,
    /// Submissions remembered for recall.
    pub history_limit: usize,
    /// Cadence of the consumer tick, in milliseconds.
    pub tick_interval_ms: u64,
    /// Echo each submitted line into the output before running it.
    pub echo_input: bool,
    /// Whether cheat commands may run at startup.
    pub allow_cheats: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 25_000,
            suggestion_count: 5,
            history_limit: 32,
            tick_interval_ms: 16,
            echo_input: true,
            allow_cheats: false,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading console config from {}", path.display());
        Self::from_toml(&text)
    }

    /// Reject values the console cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(ConsoleError::Config(
                "buffer_capacity must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConsoleError::Config(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = ConsoleConfig::from_toml(
            r#"
buffer_capacity = 4096
echo_input = false
"#,
        )
        .unwrap();
        assert_eq!(config.buffer_capacity, 4096);
        assert!(!config.echo_input);
        assert_eq!(config.suggestion_count, 5); // default
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = ConsoleConfig::from_toml("buffer_capacity = 0").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn zero_tick_interval_rejected() {
        assert!(ConsoleConfig::from_toml("tick_interval_ms = 0").is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ConsoleConfig::from_toml("colour = 3").unwrap_err();
        assert!(matches!(err, ConsoleError::TomlParse(_)));
    }

    #[test]
    fn wrong_type_rejected() {
        assert!(ConsoleConfig::from_toml("history_limit = \"many\"").is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ConsoleConfig::load("/nonexistent/devcon.toml").unwrap_err();
        assert!(matches!(err, ConsoleError::Io(_)));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("devcon-config-{}.toml", std::process::id()));
        std::fs::write(&path, "suggestion_count = 8\n").unwrap();
        let config = ConsoleConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.suggestion_count, 8);
    }
}

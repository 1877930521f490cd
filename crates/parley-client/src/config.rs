//! Connection endpoint configuration.
//!
//! The session is agnostic to where `(host, port)` come from; this module
//! is the simple key-value source the application ships with.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// The server endpoint a client should connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server hostname or IP address.
    pub host: String,

    /// Server TCP port.
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50000,
        }
    }
}

impl ClientConfig {
    /// Parses `key=value` text. Blank lines and `#` comments are
    /// ignored; keys not present keep their defaults.
    ///
    /// # Errors
    /// [`ConfigError::MalformedLine`] for a line without `=`,
    /// [`ConfigError::InvalidPort`] for an unparsable port,
    /// [`ConfigError::UnknownKey`] for a key outside `host`/`port`.
    pub fn from_kv(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) =
                line.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
                    line: idx + 1,
                    text: raw.to_string(),
                })?;
            match key.trim() {
                "host" => config.host = value.trim().to_string(),
                "port" => {
                    config.port = value.trim().parse().map_err(|_| {
                        ConfigError::InvalidPort(value.trim().to_string())
                    })?;
                }
                other => {
                    return Err(ConfigError::UnknownKey(other.to_string()));
                }
            }
        }
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, plus everything
    /// [`from_kv`](Self::from_kv) reports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_kv(&text)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 50000);
    }

    #[test]
    fn test_from_kv_reads_host_and_port() {
        let config =
            ClientConfig::from_kv("host=127.0.0.1\nport=50000\n").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 50000);
    }

    #[test]
    fn test_from_kv_ignores_comments_and_blank_lines() {
        let text = "# parley server\n\nhost = chat.example.net\n\nport = 6000\n";
        let config = ClientConfig::from_kv(text).unwrap();
        assert_eq!(config.host, "chat.example.net");
        assert_eq!(config.port, 6000);
    }

    #[test]
    fn test_from_kv_missing_keys_keep_defaults() {
        let config = ClientConfig::from_kv("host=10.0.0.5\n").unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 50000);
    }

    #[test]
    fn test_from_kv_rejects_bad_port() {
        let result = ClientConfig::from_kv("port=fifty-thousand\n");
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));

        let result = ClientConfig::from_kv("port=70000\n");
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn test_from_kv_rejects_unknown_key() {
        let result = ClientConfig::from_kv("hostname=example.net\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnknownKey(key)) if key == "hostname"
        ));
    }

    #[test]
    fn test_from_kv_rejects_line_without_separator() {
        let result = ClientConfig::from_kv("host\n");
        assert!(matches!(
            result,
            Err(ConfigError::MalformedLine { line: 1, .. })
        ));
    }
}

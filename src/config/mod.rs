use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/roost/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed service base URL
    pub service_url: String,
    /// Timeline poll interval in seconds
    pub poll_interval_secs: u64,
    /// Viewer DID (gates author-only actions)
    pub did: String,
    /// Viewer handle (shown in the menu drawer)
    pub handle: String,
    /// Theme name (built-in or custom)
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_SECS,
            did: "did:plc:local".to_string(),
            handle: "you.local".to_string(),
            theme: "default".to_string(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    service_url: Option<String>,
    poll_interval_secs: Option<u64>,
    did: Option<String>,
    handle: Option<String>,
    theme: Option<String>,
}

impl Config {
    /// Load config from ~/.config/roost/config.toml, falling back to
    /// defaults for any missing fields. If the file doesn't exist, returns
    /// pure defaults.
    pub fn load() -> Self {
        Self::load_from(&crate::constants::config_file_path())
    }

    /// Load from an explicit path (separated out for tests).
    pub fn load_from(path: &std::path::Path) -> Self {
        let mut config = Config::default();

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return config, // No config file — use defaults
        };

        let file_config: FileConfig = match toml::from_str(&content) {
            Ok(fc) => fc,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                return config;
            }
        };

        // Merge file values over defaults
        if let Some(v) = file_config.service_url {
            if !v.is_empty() {
                config.service_url = v;
            }
        }
        if let Some(v) = file_config.poll_interval_secs {
            config.poll_interval_secs = v.max(MIN_POLL_SECS);
        }
        if let Some(v) = file_config.did {
            if !v.is_empty() {
                config.did = v;
            }
        }
        if let Some(v) = file_config.handle {
            if !v.is_empty() {
                config.handle = v;
            }
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_from(std::path::Path::new("/no/such/roost/config.toml"));
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"nord\"\nhandle = \"alice.test\"").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.theme, "nord");
        assert_eq!(config.handle, "alice.test");
        // Untouched fields keep defaults
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_SECS);
    }

    #[test]
    fn poll_interval_is_floored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_secs = 1").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.poll_interval_secs, MIN_POLL_SECS);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = [not toml").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn empty_strings_do_not_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service_url = \"\"").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
    }
}

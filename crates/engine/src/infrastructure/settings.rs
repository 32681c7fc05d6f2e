//! Environment-driven configuration.
//!
//! Every setting has a default so both binaries start with an empty
//! environment. Values are read through a lookup function so tests never have
//! to mutate the process environment.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Default upstream model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Default upstream API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default oracle location (the proxy server's default bind).
pub const DEFAULT_ORACLE_BASE_URL: &str = "http://localhost:3000";

pub const DEFAULT_TICK_HZ: u32 = 30;

const STATE_FILE_NAME: &str = "sim-state.json";

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Oracle proxy server
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Option<String>,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("GOOGLE_API_KEY"),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
        }
    }

    /// `abcd...wxyz`, or empty when no key is configured.
    pub fn key_preview(&self) -> String {
        match &self.api_key {
            Some(key) if key.chars().count() > 8 => {
                let head: String = key.chars().take(4).collect();
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("{}...{}", head, tail)
            }
            Some(_) => "****".into(),
            None => String::new(),
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("has_key", &self.api_key.is_some())
            .field("key_preview", &self.key_preview())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

// =============================================================================
// Simulation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSettings {
    pub oracle_base_url: String,
    pub state_path: PathBuf,
    pub tick_hz: u32,
}

impl SimulationSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_hz = lookup("TICK_HZ")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|hz| (1..=240).contains(hz))
            .unwrap_or(DEFAULT_TICK_HZ);
        Self {
            oracle_base_url: lookup("ORACLE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ORACLE_BASE_URL.into()),
            state_path: lookup("CIVICSIM_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_state_path),
            tick_hz,
        }
    }
}

/// Platform data directory, or the working directory if none is available.
pub fn default_state_path() -> PathBuf {
    match ProjectDirs::from("io", "civicsim", "civicsim") {
        Some(dirs) => dirs.data_dir().join(STATE_FILE_NAME),
        None => PathBuf::from(STATE_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn server_defaults() {
        let settings = ServerSettings::from_lookup(lookup(&[]));
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.cors_allowed_origins, None);
    }

    #[test]
    fn api_port_wins_over_port() {
        let settings = ServerSettings::from_lookup(lookup(&[("API_PORT", "8080"), ("PORT", "9000")]));
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn gemini_key_is_masked_in_debug() {
        let settings = GeminiSettings::from_lookup(lookup(&[("GOOGLE_API_KEY", "AIzaSECRETSECRET1234")]));
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("SECRETSECRET"));
        assert_eq!(settings.key_preview(), "AIza...1234");
        assert_eq!(settings.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn invalid_tick_rate_falls_back() {
        let settings = SimulationSettings::from_lookup(lookup(&[("TICK_HZ", "0")]));
        assert_eq!(settings.tick_hz, DEFAULT_TICK_HZ);
        let settings = SimulationSettings::from_lookup(lookup(&[
            ("TICK_HZ", "60"),
            ("CIVICSIM_STATE_PATH", "/tmp/state.json"),
        ]));
        assert_eq!(settings.tick_hz, 60);
        assert_eq!(settings.state_path, PathBuf::from("/tmp/state.json"));
    }
}

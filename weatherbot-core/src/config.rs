use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::Ipv6Addr,
    path::{Path, PathBuf},
};

use crate::provider::{forecast::DEFAULT_FORECAST_URL, geocoding::DEFAULT_GEOCODING_URL};

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Socket address string for binding; IPv6 literals are bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Base URL a local client would use to reach the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_addr())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Browser origins allowed to call the API with credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let allowed_origins = [5173, 5174]
            .into_iter()
            .flat_map(|port| {
                ["localhost", "127.0.0.1"]
                    .into_iter()
                    .map(move |host| format!("http://{host}:{port}"))
            })
            .collect();

        Self { allowed_origins }
    }
}

/// Upstream endpoints. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Every section is optional; a missing file means all defaults.
///
/// Example TOML:
/// [server]
/// host = "127.0.0.1"
/// port = 8000
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_dev_setup() {
        let cfg = Config::default();

        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cfg.server.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            cfg.cors.allowed_origins,
            vec![
                "http://localhost:5173",
                "http://127.0.0.1:5173",
                "http://localhost:5174",
                "http://127.0.0.1:5174",
            ]
        );
        assert_eq!(cfg.providers.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.providers.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let server = ServerConfig {
            host: "::1".into(),
            port: 8000,
        };

        assert_eq!(server.bind_addr(), "[::1]:8000");
        assert_eq!(server.base_url(), "http://[::1]:8000");
        assert!(server.bind_addr().parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn hostname_is_left_alone() {
        let server = ServerConfig {
            host: "localhost".into(),
            port: 8001,
        };
        assert_eq!(server.bind_addr(), "localhost:8001");
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 8001\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.server.port, 8001);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.cors, CorsConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.cors.allowed_origins = vec!["http://example.test".into()];
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub uploads: UploadConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,

    /// File the config was read from; `None` means built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Environment values rejected during load. Reported by
    /// [`Config::log_load_summary`] once tracing is up.
    #[serde(skip)]
    pub ignored_env: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared secret required by the delete endpoint.
    /// An empty key disables deletion entirely.
    pub api_key: String,

    /// Signing secret for browser session cookies.
    /// Must be at least 64 bytes; shorter values fall back to a random key per process.
    pub secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Request body limit for form submissions, including the image upload.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: true,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub upload_dir: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: "static/uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/gyms.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        // A missing .env file is the normal case outside development.
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        match Self::config_paths().into_iter().find(|path| path.exists()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Loading runs before the subscriber exists, so what it found is logged here.
    pub fn log_load_summary(&self) {
        match &self.source {
            Some(path) => info!("Loaded config from: {}", path.display()),
            None => info!("No config file found, using defaults"),
        }
        for message in &self.ignored_env {
            warn!("{}", message);
        }
    }

    /// Environment variables win over the config file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.security.api_key = key;
        }
        if let Some(secret) = lookup("SECRET_KEY") {
            self.security.secret_key = secret;
        }
        if let Some(dir) = lookup("UPLOAD_FOLDER") {
            self.uploads.upload_dir = dir;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_path = url;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => self
                    .ignored_env
                    .push(format!("Ignoring invalid PORT value: {port}")),
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("gymreg").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gymreg").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.uploads.upload_dir.trim().is_empty() {
            anyhow::bail!("Upload directory cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.security.api_key.is_empty() {
            warn!("No API key configured; the delete endpoint will reject every request");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.uploads.upload_dir, "static/uploads");
        assert!(config.security.api_key.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[uploads]"));
        assert!(toml_str.contains("[security]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [security]
            api_key = "TopSecretAPIKey"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.security.api_key, "TopSecretAPIKey");

        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("API_KEY", "from-env"),
            ("UPLOAD_FOLDER", "/tmp/gym-images"),
            ("PORT", "8081"),
        ]);

        let mut config = Config::default();
        config.security.api_key = "from-file".to_string();
        config.apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.security.api_key, "from-env");
        assert_eq!(config.uploads.upload_dir, "/tmp/gym-images");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.general.database_path, "sqlite:data/gyms.db");
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ignored_env, ["Ignoring invalid PORT value: not-a-port"]);
    }

    #[test]
    fn load_from_path_records_source() {
        let path =
            std::env::temp_dir().join(format!("gymreg-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = 6001\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 6001);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert!(config.ignored_env.is_empty());
        assert!(Config::default().source.is_none());

        let saved = toml::to_string_pretty(&config).unwrap();
        assert!(!saved.contains("source"));
    }

    #[test]
    fn validate_rejects_empty_upload_dir() {
        let mut config = Config::default();
        config.uploads.upload_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }
}

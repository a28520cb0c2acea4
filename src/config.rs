use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// System status fetch cadence (seconds).
    pub status_interval_secs: u64,
    /// Container list fetch cadence (seconds).
    pub containers_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path; stdout belongs to the terminal UI.
    pub file: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: 5,
            containers_interval_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "dockdash.log".into(),
        }
    }
}

impl AppConfig {
    /// Load from CONFIG_FILE (default "config.toml"). A missing file yields
    /// built-in defaults; an unreadable or invalid file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("read {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.backend.base_url.starts_with("http://")
                || self.backend.base_url.starts_with("https://"),
            "backend.base_url must start with http:// or https://, got {:?}",
            self.backend.base_url
        );
        anyhow::ensure!(
            self.backend.request_timeout_secs > 0,
            "backend.request_timeout_secs must be > 0, got {}",
            self.backend.request_timeout_secs
        );
        anyhow::ensure!(
            self.polling.status_interval_secs > 0,
            "polling.status_interval_secs must be > 0, got {}",
            self.polling.status_interval_secs
        );
        anyhow::ensure!(
            self.polling.containers_interval_secs > 0,
            "polling.containers_interval_secs must be > 0, got {}",
            self.polling.containers_interval_secs
        );
        anyhow::ensure!(
            !self.logging.file.is_empty(),
            "logging.file must be non-empty"
        );
        Ok(())
    }
}

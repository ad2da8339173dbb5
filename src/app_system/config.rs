use regex::Regex;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

/// Dashboard configuration, normally read from a TOML file.
///
/// ```toml
/// [api]
/// core_url = "${CORE_API_URL:-http://localhost:8089}"
/// payments_url = "http://localhost:8082"
/// timeout_secs = 30
///
/// [pagination]
/// orders = 10
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Gateway serving auth, users, orders, menus, reports and delivery.
    pub core_url: String,
    pub payments_url: String,
    /// Per-request timeout. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            core_url: "http://localhost:8089".to_string(),
            payments_url: "http://localhost:8082".to_string(),
            timeout_secs: None,
        }
    }
}

/// Rows per page for each list view.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub orders: NonZeroUsize,
    pub users: NonZeroUsize,
    pub menu_items: NonZeroUsize,
    pub categories: NonZeroUsize,
    pub payments: NonZeroUsize,
}

const FIVE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};
const SEVEN: NonZeroUsize = match NonZeroUsize::new(7) {
    Some(n) => n,
    None => unreachable!(),
};

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            orders: FIVE,
            users: SEVEN,
            menu_items: FIVE,
            categories: FIVE,
            payments: SEVEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Reads `path`, or returns the defaults when there is no file.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => tokio::fs::read_to_string(path).await?.parse(),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [("api.core_url", &self.api.core_url), ("api.payments_url", &self.api.payments_url)] {
            if url.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{} must start with http:// or https://, got '{}'",
                    name, url
                )));
            }
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Validation("api.timeout_secs must be positive".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level cannot be empty".into()));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let resolved = resolve_env_vars(s)?;
        let config: Config = toml::from_str(&resolved)?;
        config.validate()?;
        Ok(config)
    }
}

/// Replaces `${VAR}` and `${VAR:-default}` with values from the environment.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
        .map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

    let mut missing = None;
    let resolved = re.replace_all(input, |caps: &regex::Captures| {
        let name = &caps[1];
        match (std::env::var(name), caps.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => default.as_str().to_string(),
            (Err(_), None) => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(ConfigError::Validation(format!("Environment variable '{}' not found", name))),
        None => Ok(resolved.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pagination.users.get(), 7);
        assert_eq!(config.pagination.orders.get(), 5);
        assert_eq!(config.api.core_url, "http://localhost:8089");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = "[pagination]\norders = 10\n[api]\ntimeout_secs = 15\n".parse().unwrap();
        assert_eq!(config.pagination.orders.get(), 10);
        assert_eq!(config.pagination.payments.get(), 7);
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.api.payments_url, "http://localhost:8082");
    }

    #[test]
    fn zero_page_size_rejected() {
        assert!(matches!("[pagination]\nusers = 0\n".parse::<Config>(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn bad_url_rejected() {
        let err = "[api]\ncore_url = \"localhost:8089\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn env_placeholders_resolve() {
        std::env::set_var("DASHBOARD_TEST_CORE_URL", "https://api.example.com");
        let config: Config = r#"
            [api]
            core_url = "${DASHBOARD_TEST_CORE_URL}"
            payments_url = "${DASHBOARD_TEST_UNSET_PAYMENTS:-http://payments.local}"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.api.core_url, "https://api.example.com");
        assert_eq!(config.api.payments_url, "http://payments.local");
    }

    #[test]
    fn missing_env_var_is_an_error() {
        let err = resolve_env_vars("level = \"${DASHBOARD_TEST_NEVER_SET}\"").unwrap_err();
        assert!(err.to_string().contains("DASHBOARD_TEST_NEVER_SET"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = Config::load(Some(file.path())).await.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(Config::load(None).await.unwrap(), Config::default());
    }
}

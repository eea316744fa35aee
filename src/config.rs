//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! default paths, probe identity strings, and the status page text. A missing
//! config file is not an error: the service is typically deployed behind a
//! function gateway with no filesystem config, so every setting has a default
//! and the `REGION` / `SECRET_NAME` environment variables take precedence
//! over the file.

use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "upcheck=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Default AWS region for the secret store
pub const DEFAULT_REGION: &str = "us-west-1";

/// Default Secrets Manager secret holding the database credentials
pub const DEFAULT_SECRET_NAME: &str = "rds-db-credentials";

/// Default hostname resolved by the internet connectivity probe
pub const DEFAULT_LOOKUP_HOSTNAME: &str = "google.com";

// =============================================================================
// Status Page Strings
// =============================================================================

/// Overall message shown when every critical probe succeeds
pub const STATUS_OK_MESSAGE: &str = "Connected to private RDS and Internet";

/// Row text for the database probe when the page is in the error state
pub const DATABASE_OFFLINE_DETAIL: &str = "Not connected to RDS";

/// Row text for the DNS probe when resolution fails or is skipped
pub const DNS_OFFLINE_DETAIL: &str = "Not connected to Internet";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Status and liveness responses must never be served stale by upstream
/// caches (Varnish, nginx, CDNs) - a cached "healthy" page defeats the point.
pub const CACHE_CONTROL_STATUS: &str = "no-store";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Secret store settings
    #[serde(default)]
    pub aws: AwsConfig,
    /// Internet connectivity probe settings
    #[serde(default)]
    pub dns: DnsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }
}

/// Secret store settings: which region to call and which secret holds the
/// database credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "AwsConfig::default_region")]
    pub region: String,
    #[serde(default = "AwsConfig::default_secret_name")]
    pub secret_name: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: Self::default_region(),
            secret_name: Self::default_secret_name(),
        }
    }
}

impl AwsConfig {
    fn default_region() -> String {
        DEFAULT_REGION.to_string()
    }

    fn default_secret_name() -> String {
        DEFAULT_SECRET_NAME.to_string()
    }
}

/// Internet connectivity probe settings
#[derive(Debug, Clone, Deserialize)]
pub struct DnsConfig {
    /// Hostname resolved to confirm outbound internet connectivity
    #[serde(default = "DnsConfig::default_hostname")]
    pub hostname: String,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            hostname: Self::default_hostname(),
        }
    }
}

impl DnsConfig {
    fn default_hostname() -> String {
        DEFAULT_LOOKUP_HOSTNAME.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A missing file yields the built-in defaults; any other read failure or
    /// a parse failure is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.as_ref().display(),
                    "No config file found, using defaults"
                );
                AppConfig::default()
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Apply environment-style overrides. `REGION` and `SECRET_NAME` mirror
    /// the variables the deployment gateway sets for this service.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(region) = lookup("REGION") {
            self.aws.region = region;
        }
        if let Some(secret_name) = lookup("SECRET_NAME") {
            self.aws.secret_name = secret_name;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.aws.region.is_empty() {
            return Err(ConfigError::Validation("aws.region must not be empty".to_string()));
        }
        if self.aws.secret_name.is_empty() {
            return Err(ConfigError::Validation(
                "aws.secret_name must not be empty".to_string(),
            ));
        }
        if self.dns.hostname.is_empty() {
            return Err(ConfigError::Validation("dns.hostname must not be empty".to_string()));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.aws.region, DEFAULT_REGION);
        assert_eq!(config.aws.secret_name, DEFAULT_SECRET_NAME);
        assert_eq!(config.dns.hostname, DEFAULT_LOOKUP_HOSTNAME);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn loads_partial_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[http]\nport = 8080\n\n[aws]\nregion = \"eu-central-1\"\n"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.aws.region, "eu-central-1");
        // Unspecified sections keep their defaults
        assert_eq!(config.aws.secret_name, DEFAULT_SECRET_NAME);
        assert_eq!(config.dns.hostname, DEFAULT_LOOKUP_HOSTNAME);
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[http\nport = oops").unwrap();

        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            "REGION" => Some("ap-southeast-2".to_string()),
            "SECRET_NAME" => Some("prod/rds/creds".to_string()),
            _ => None,
        });

        assert_eq!(config.aws.region, "ap-southeast-2");
        assert_eq!(config.aws.secret_name, "prod/rds/creds");
    }

    #[test]
    fn overrides_leave_unset_values_alone() {
        let mut config = AppConfig::default();
        config.apply_overrides(|_| None);

        assert_eq!(config.aws.region, DEFAULT_REGION);
        assert_eq!(config.aws.secret_name, DEFAULT_SECRET_NAME);
    }

    #[test]
    fn validation_rejects_unknown_log_format() {
        let config = AppConfig {
            logging: LoggingConfig {
                format: "xml".to_string(),
            },
            ..AppConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}

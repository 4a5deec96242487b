//! Server configuration loaded from the environment

use std::env;
use std::time::Duration;

use feed_core::{FeedError, FeedResult};
use feed_news::ProviderCredentials;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to listen on (`SERVER_PORT`)
    pub port: u16,
    /// Include error chains in 500 bodies (`APP_ENV` = development/dev/local)
    pub expose_error_details: bool,
    /// Per-provider time budget (`PROVIDER_TIMEOUT_SECS`)
    pub provider_timeout: Duration,
    /// Provider API keys
    pub credentials: ProviderCredentials,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> FeedResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> FeedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| FeedError::config(format!("SERVER_PORT is not a port: '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(FeedError::config(format!(
                        "PROVIDER_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        let expose_error_details = lookup("APP_ENV")
            .map(|v| is_development(&v))
            .unwrap_or(false);

        Ok(Self {
            port,
            expose_error_details,
            provider_timeout: Duration::from_secs(timeout_secs),
            credentials: ProviderCredentials::from_lookup(&lookup),
        })
    }
}

fn is_development(app_env: &str) -> bool {
    matches!(
        app_env.trim().to_lowercase().as_str(),
        "development" | "dev" | "local"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> FeedResult<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert!(!config.expose_error_details);
        assert_eq!(config.provider_timeout, Duration::from_secs(10));
        assert!(config.credentials.gnews_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("APP_ENV", "Development"),
            ("PROVIDER_TIMEOUT_SECS", "4"),
            ("GNEWS_API_KEY", "g-key"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.expose_error_details);
        assert_eq!(config.provider_timeout, Duration::from_secs(4));
        assert_eq!(config.credentials.gnews_api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn test_production_hides_details() {
        let config = config_from(&[("APP_ENV", "production")]).unwrap();
        assert!(!config.expose_error_details);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            config_from(&[("SERVER_PORT", "http")]),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("PROVIDER_TIMEOUT_SECS", "0")]),
            Err(FeedError::Config(_))
        ));
    }
}

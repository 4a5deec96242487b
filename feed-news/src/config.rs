//! Provider credential configuration

use std::env;

use crate::normalize::non_blank;

/// Environment variable holding the GNews API key
pub const GNEWS_API_KEY_VAR: &str = "GNEWS_API_KEY";
/// Environment variable holding the NewsData.io API key
pub const NEWSDATA_API_KEY_VAR: &str = "NEWSDATA_API_KEY";
/// Environment variable holding the MediaStack access key
pub const MEDIASTACK_API_KEY_VAR: &str = "MEDIASTACK_API_KEY";

/// Optional credentials for the paid news providers.
///
/// A missing key is a valid state: that provider simply contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub gnews_api_key: Option<String>,
    pub newsdata_api_key: Option<String>,
    pub mediastack_api_key: Option<String>,
}

impl ProviderCredentials {
    /// Load credentials from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            gnews_api_key: non_blank(lookup(GNEWS_API_KEY_VAR)),
            newsdata_api_key: non_blank(lookup(NEWSDATA_API_KEY_VAR)),
            mediastack_api_key: non_blank(lookup(MEDIASTACK_API_KEY_VAR)),
        }
    }

    /// Presence of each credential, for startup logging
    pub fn presence(&self) -> [(&'static str, bool); 3] {
        [
            (GNEWS_API_KEY_VAR, self.gnews_api_key.is_some()),
            (NEWSDATA_API_KEY_VAR, self.newsdata_api_key.is_some()),
            (MEDIASTACK_API_KEY_VAR, self.mediastack_api_key.is_some()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_blank_keys_are_absent() {
        let vars: HashMap<&str, &str> = [
            (GNEWS_API_KEY_VAR, "abc123"),
            (NEWSDATA_API_KEY_VAR, "   "),
        ]
        .into_iter()
        .collect();

        let creds = ProviderCredentials::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(creds.gnews_api_key.as_deref(), Some("abc123"));
        assert!(creds.newsdata_api_key.is_none());
        assert!(creds.mediastack_api_key.is_none());
    }

    #[test]
    fn test_presence_order() {
        let creds = ProviderCredentials {
            mediastack_api_key: Some("key".to_string()),
            ..Default::default()
        };
        let presence = creds.presence();
        assert_eq!(presence[0], (GNEWS_API_KEY_VAR, false));
        assert_eq!(presence[2], (MEDIASTACK_API_KEY_VAR, true));
    }
}

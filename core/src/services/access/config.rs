//! Access service configuration

/// Configuration for the access service
#[derive(Debug, Clone)]
pub struct AccessServiceConfig {
    /// Replace the session key pair on every refresh.
    ///
    /// Off by default; the session keeps its creation-time keys and only
    /// the refresh token rotates.
    pub rotate_keys_on_refresh: bool,

    /// Minimum accepted password length
    pub min_password_length: usize,

    /// Maximum accepted password length
    pub max_password_length: usize,

    /// Maximum accepted shop name length
    pub max_name_length: usize,
}

impl Default for AccessServiceConfig {
    fn default() -> Self {
        Self {
            rotate_keys_on_refresh: false,
            min_password_length: 8,
            max_password_length: 128,
            max_name_length: 100,
        }
    }
}

impl AccessServiceConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rotate_keys_on_refresh: std::env::var("ROTATE_KEYS_ON_REFRESH")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.rotate_keys_on_refresh),
            min_password_length: std::env::var("MIN_PASSWORD_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_password_length),
            max_password_length: defaults.max_password_length,
            max_name_length: defaults.max_name_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccessServiceConfig::default();
        assert!(!config.rotate_keys_on_refresh);
        assert_eq!(config.min_password_length, 8);
    }
}

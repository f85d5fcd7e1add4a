use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// API key for the place-search/geocoding provider.
    pub places_api_key: String,
    /// Base URL of the place provider; overridable for tests.
    pub places_base_url: String,
    /// Optional YAML override for category query strings.
    pub categories_path: Option<PathBuf>,
    pub search_radius_km: f64,
    /// Timeout for provider search/geocoding requests.
    pub request_timeout_secs: u64,
    /// Timeout for the device position fix.
    pub position_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("categories_path", &self.categories_path)
            .field("search_radius_km", &self.search_radius_km)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("position_timeout_secs", &self.position_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            places_api_key: "super-secret-key".to_string(),
            places_base_url: "https://maps.example.com/api".to_string(),
            categories_path: None,
            search_radius_km: 10.0,
            request_timeout_secs: 15,
            position_timeout_secs: 10,
            user_agent: "nearaid/0.1".to_string(),
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("[redacted]"));
    }
}

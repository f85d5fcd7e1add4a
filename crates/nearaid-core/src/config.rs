use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive finite number, got {raw}"),
            });
        }
        Ok(value)
    };

    let places_api_key = require("NEARAID_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("NEARAID_ENV", "development"));
    let log_level = or_default("NEARAID_LOG_LEVEL", "info");
    let places_base_url = or_default(
        "NEARAID_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api",
    );
    let categories_path = lookup("NEARAID_CATEGORIES_PATH").ok().map(PathBuf::from);

    let search_radius_km = parse_f64("NEARAID_SEARCH_RADIUS_KM", "10")?;
    let request_timeout_secs = parse_u64("NEARAID_REQUEST_TIMEOUT_SECS", "15")?;
    let position_timeout_secs = parse_u64("NEARAID_POSITION_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("NEARAID_USER_AGENT", "nearaid/0.1 (resource-directory)");

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        categories_path,
        search_radius_km,
        request_timeout_secs,
        position_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("NEARAID_PLACES_API_KEY", "test-api-key");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEARAID_PLACES_API_KEY"),
            "expected MissingEnvVar(NEARAID_PLACES_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.places_base_url, "https://maps.googleapis.com/maps/api");
        assert!(cfg.categories_path.is_none());
        assert!((cfg.search_radius_km - 10.0).abs() < f64::EPSILON);
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.position_timeout_secs, 10);
        assert_eq!(cfg.user_agent, "nearaid/0.1 (resource-directory)");
    }

    #[test]
    fn build_app_config_radius_override() {
        let mut map = full_env();
        map.insert("NEARAID_SEARCH_RADIUS_KM", "25.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.search_radius_km - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_radius() {
        let mut map = full_env();
        map.insert("NEARAID_SEARCH_RADIUS_KM", "ten");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARAID_SEARCH_RADIUS_KM"),
            "expected InvalidEnvVar(NEARAID_SEARCH_RADIUS_KM), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_negative_radius() {
        let mut map = full_env();
        map.insert("NEARAID_SEARCH_RADIUS_KM", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARAID_SEARCH_RADIUS_KM"
        ));
    }

    #[test]
    fn build_app_config_timeout_overrides() {
        let mut map = full_env();
        map.insert("NEARAID_REQUEST_TIMEOUT_SECS", "30");
        map.insert("NEARAID_POSITION_TIMEOUT_SECS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.position_timeout_secs, 5);
    }

    #[test]
    fn build_app_config_invalid_timeout() {
        let mut map = full_env();
        map.insert("NEARAID_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEARAID_REQUEST_TIMEOUT_SECS"
        ));
    }

    #[test]
    fn build_app_config_categories_path_override() {
        let mut map = full_env();
        map.insert("NEARAID_CATEGORIES_PATH", "./config/categories.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.categories_path.as_deref(),
            Some(std::path::Path::new("./config/categories.yaml"))
        );
    }
}

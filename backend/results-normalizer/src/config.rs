use serde::Deserialize;
use std::env;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
const DEFAULT_RESULTS_PATH: &str = "candidates/{id}/results";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub retry_attempts: usize,
    /// Path template relative to `api_base_url`; `{id}` is replaced by the candidate id.
    pub results_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            results_path: DEFAULT_RESULTS_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, then the local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env || dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let api_base_url = settings
            .get_string("results_api.url")
            .or_else(|_| env::var("RESULTS_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_token = settings
            .get_string("results_api.token")
            .or_else(|_| env::var("RESULTS_API_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        let request_timeout_secs = settings
            .get_int("results_api.timeout_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .or_else(|| env_parse("RESULTS_API_TIMEOUT_SECS"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        let retry_attempts = settings
            .get_int("results_api.retry_attempts")
            .ok()
            .and_then(|v| usize::try_from(v).ok())
            .or_else(|| env_parse("RESULTS_API_RETRY_ATTEMPTS"))
            .unwrap_or(DEFAULT_RETRY_ATTEMPTS)
            .max(1);

        let results_path = settings
            .get_string("results_api.results_path")
            .or_else(|_| env::var("RESULTS_API_RESULTS_PATH"))
            .unwrap_or_else(|_| DEFAULT_RESULTS_PATH.to_string());

        if api_token.is_none() {
            tracing::debug!("No results API token configured, requests will be anonymous");
        }

        Ok(Config {
            api_base_url,
            api_token,
            request_timeout_secs,
            retry_attempts,
            results_path,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = [
        "RESULTS_API_URL",
        "RESULTS_API_TOKEN",
        "RESULTS_API_TIMEOUT_SECS",
        "RESULTS_API_RETRY_ATTEMPTS",
        "RESULTS_API_RESULTS_PATH",
    ];

    fn isolate_env() {
        env::set_var("SKIP_ROOT_ENV", "1");
        env::set_var("APP_ENV", "unit-test");
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn falls_back_to_defaults() {
        isolate_env();

        let config = Config::load().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(config.results_path, DEFAULT_RESULTS_PATH);
    }

    #[test]
    #[serial]
    fn reads_plain_environment_variables() {
        isolate_env();
        env::set_var("RESULTS_API_URL", "https://results.example.org/v2/");
        env::set_var("RESULTS_API_TOKEN", "secret");
        env::set_var("RESULTS_API_TIMEOUT_SECS", "0");
        env::set_var("RESULTS_API_RETRY_ATTEMPTS", "5");

        let config = Config::load().unwrap();
        assert_eq!(config.api_base_url, "https://results.example.org/v2/");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 1);
        assert_eq!(config.retry_attempts, 5);

        for key in KEYS {
            env::remove_var(key);
        }
    }
}

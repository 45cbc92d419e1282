use crate::config::types::{CallbackConfig, Config, DefaultsConfig, FetcherConfig, ServerConfig};
use crate::{ConfigError, ConfigResult};
use std::net::SocketAddr;
use url::Url;

const MAX_REDIRECTS_LIMIT: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_server_config(&config.server)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_callback_config(&config.callback)?;
    validate_defaults_config(&config.defaults)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> ConfigResult<()> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("bind must be a socket address, got '{}': {}", config.bind, e))
    })?;

    for origin in &config.allowed_origins {
        validate_origin(origin)?;
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_redirects > MAX_REDIRECTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be at most {}, got {}",
            MAX_REDIRECTS_LIMIT, config.max_redirects
        )));
    }

    Ok(())
}

fn validate_callback_config(config: &CallbackConfig) -> ConfigResult<()> {
    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "callback timeout-ms must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_defaults_config(config: &DefaultsConfig) -> ConfigResult<()> {
    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "default concurrency must be >= 1, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_ms < 1 {
        return Err(ConfigError::Validation(
            "default request-timeout-ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// An origin must be an absolute http(s) URL
fn validate_origin(origin: &str) -> ConfigResult<()> {
    let url = Url::parse(origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", origin, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use http or https",
            origin
        )));
    }

    Ok(())
}

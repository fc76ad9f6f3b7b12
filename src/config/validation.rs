use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.domain.is_empty() {
        return Err(ConfigError::Validation(
            "site.domain cannot be empty".to_string(),
        ));
    }

    if config.domain.contains('/') || config.domain.contains(' ') {
        return Err(ConfigError::Validation(format!(
            "site.domain must be a bare hostname, got '{}'",
            config.domain
        )));
    }

    if let Some(base) = &config.base_url {
        let url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "base-url must use http or https, got '{}'",
                url.scheme()
            )));
        }
    }

    // The seed URL must come out parseable, whichever way it was built
    let seed = config.seed_url();
    Url::parse(&seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 64, got {}",
            config.max_concurrent_requests
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent.name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.records_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

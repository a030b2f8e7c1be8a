//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
///
/// The API key is printed as configured, so secret references stay references.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    check(config)?;
    println!("Configuration is valid.");
    Ok(())
}

/// Checks that the calendar settings are complete and the API key resolves.
pub fn check(config: &ClientConfig) -> ClientResult<()> {
    let calendar = &config.calendar;
    calendar.require_calendar_id().map_err(ClientError::Config)?;
    calendar.resolve_api_key().map_err(ClientError::Config)?;
    calendar.require_timeout().map_err(ClientError::Config)?;

    #[cfg(feature = "google")]
    calendar.to_source_config().map_err(ClientError::Config)?;

    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ClientConfig {
        ClientConfig::parse(
            "[calendar]\ncalendar_id = \"community\"\napi_key = \"AIzaSyExample\"\n",
        )
        .unwrap()
    }

    #[test]
    fn complete_config_is_valid() {
        assert!(check(&complete()).is_ok());
    }

    #[test]
    fn missing_calendar_id_is_a_config_error() {
        let mut config = complete();
        config.calendar.calendar_id = None;
        assert!(matches!(check(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = complete();
        config.calendar.timeout = 0;
        let err = check(&config).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }
}

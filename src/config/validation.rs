//! Configuration validation.

use super::Config;

/// Validate the loaded configuration, collecting every problem rather than
/// stopping at the first.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    let mut problems = Vec::new();

    if config.port == 0 {
        problems.push("port must be non-zero".to_string());
    }

    if config.relay.max_message_size == 0 {
        problems.push("relay.max_message_size must be non-zero".to_string());
    }

    if config.relay.max_connections_per_ip == 0 {
        problems.push("relay.max_connections_per_ip must be non-zero".to_string());
    }

    if config.relay.outbound_queue_size == 0 {
        problems.push("relay.outbound_queue_size must be non-zero".to_string());
    }

    if config.relay.cors_origins != "*" {
        let valid_origins = config
            .relay
            .cors_origins
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .count();
        if valid_origins == 0 {
            problems.push(format!(
                "relay.cors_origins '{}' contains no usable origins; use \"*\" or a comma-separated list",
                config.relay.cors_origins
            ));
        }
    }

    if !matches!(
        config.logging.rotation.to_lowercase().as_str(),
        "daily" | "hourly" | "never"
    ) {
        problems.push(format!(
            "logging.rotation '{}' is not one of: daily, hourly, never",
            config.logging.rotation
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(problems.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let mut config = Config::default();
        config.relay.max_message_size = 0;
        config.relay.outbound_queue_size = 0;

        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("max_message_size"));
        assert!(err.contains("outbound_queue_size"));
    }

    #[test]
    fn test_blank_cors_origins_rejected() {
        let mut config = Config::default();
        config.relay.cors_origins = " , ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_rotation_rejected() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        assert!(validate(&config).is_err());
    }
}

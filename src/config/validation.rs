//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every host parses into a node
//! - Validate value ranges (timeouts > 0, backoff bounds ordered)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ClientConfig;
use crate::nodes::Node;
use crate::resilience::backoff::MAX_DEAD_HOST_DELAY;
use crate::transport::headers::parse_default_headers;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.hosts.is_empty() {
        errors.push(ValidationError::new("hosts", "at least one host is required"));
    }
    for (i, host) in config.hosts.iter().enumerate() {
        if let Err(e) = Node::parse(host) {
            errors.push(ValidationError::new(format!("hosts[{}]", i), e.to_string()));
        }
    }

    if let Err(e) = parse_default_headers(&config.default_headers) {
        errors.push(ValidationError::new("default_headers", e.to_string()));
    }

    if config.auth.password.is_some() && config.auth.username.is_none() {
        errors.push(ValidationError::new("auth.password", "password given without username"));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.dead_hosts.base_delay_ms > config.dead_hosts.max_delay_ms {
        errors.push(ValidationError::new(
            "dead_hosts.base_delay_ms",
            format!(
                "base delay {}ms exceeds max delay {}ms",
                config.dead_hosts.base_delay_ms, config.dead_hosts.max_delay_ms
            ),
        ));
    }

    let max_allowed_ms = MAX_DEAD_HOST_DELAY.as_millis();
    if u128::from(config.dead_hosts.max_delay_ms) > max_allowed_ms {
        errors.push(ValidationError::new(
            "dead_hosts.max_delay_ms",
            format!("must not exceed {}ms", max_allowed_ms),
        ));
    }

    if config.health.name.trim().is_empty() {
        errors.push(ValidationError::new("health.name", "must not be empty"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.hosts = vec!["ftp://search-1".into(), "http://".into()];
        config.timeouts.request_secs = 0;
        config.dead_hosts.base_delay_ms = 10_000;
        config.dead_hosts.max_delay_ms = 1_000;
        config.health.name = " ".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "hosts[0]",
                "hosts[1]",
                "timeouts.request_secs",
                "dead_hosts.base_delay_ms",
                "health.name"
            ]
        );
    }

    #[test]
    fn test_empty_hosts_rejected() {
        let mut config = ClientConfig::default();
        config.hosts.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "hosts");
    }

    #[test]
    fn test_max_delay_bounded() {
        let mut config = ClientConfig::default();
        config.dead_hosts.max_delay_ms = u64::MAX;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "dead_hosts.max_delay_ms");
    }

    #[test]
    fn test_password_requires_username() {
        let mut config = ClientConfig::default();
        config.auth.password = Some("secret".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(!errors[0].to_string().contains("secret"));
    }
}

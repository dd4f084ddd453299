//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds in (0, 1], counts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: config → Result<(), Vec<ValidationError>>
//! - Runs at construction time; a misconfigured breaker never reaches
//!   call time

use thiserror::Error;

use crate::config::schema::{CircuitBreakerConfig, ResilienceConfig, RetryConfig};

/// A single semantic problem in a configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("failure_threshold must be in (0, 1], got {0}")]
    FailureThreshold(f64),

    #[error("min_throughput must be greater than zero")]
    MinThroughput,

    #[error("rolling_window_ms must be greater than zero")]
    RollingWindow,

    #[error("open_state_ms must be greater than zero")]
    OpenState,

    #[error("half_open_max_in_flight must be greater than zero")]
    HalfOpenInFlight,

    #[error("success_quorum must be in (0, 1]")]
    SuccessQuorum,

    #[error("base_delay_ms must not exceed max_delay_ms")]
    DelayRange,

    #[error("request_timeout_ms must be greater than zero")]
    RequestTimeout,
}

/// Validate breaker settings, collecting every problem found.
pub fn validate_breaker(config: &CircuitBreakerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !(config.failure_threshold > 0.0 && config.failure_threshold <= 1.0) {
        errors.push(ValidationError::FailureThreshold(config.failure_threshold));
    }
    if config.min_throughput == 0 {
        errors.push(ValidationError::MinThroughput);
    }
    if config.rolling_window_ms == 0 {
        errors.push(ValidationError::RollingWindow);
    }
    if config.open_state_ms == 0 {
        errors.push(ValidationError::OpenState);
    }
    if config.half_open_max_in_flight == 0 {
        errors.push(ValidationError::HalfOpenInFlight);
    }
    if !(config.success_quorum > 0.0 && config.success_quorum <= 1.0) {
        errors.push(ValidationError::SuccessQuorum);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate retry settings.
pub fn validate_retries(config: &RetryConfig) -> Result<(), Vec<ValidationError>> {
    if config.base_delay_ms > config.max_delay_ms {
        Err(vec![ValidationError::DelayRange])
    } else {
        Ok(())
    }
}

/// Validate a full configuration, collecting errors from every section.
pub fn validate_config(config: &ResilienceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(mut e) = validate_breaker(&config.breaker) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_retries(&config.retries) {
        errors.append(&mut e);
    }
    if config.client.request_timeout_ms == 0 {
        errors.push(ValidationError::RequestTimeout);
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
    fn default_config_is_valid() {
        assert!(validate_config(&ResilienceConfig::default()).is_ok());
    }

    #[test]
    fn zero_min_throughput_rejected() {
        let config = CircuitBreakerConfig {
            min_throughput: 0,
            ..Default::default()
        };
        let errors = validate_breaker(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MinThroughput));
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let config = CircuitBreakerConfig {
            failure_threshold: 1.5,
            ..Default::default()
        };
        let errors = validate_breaker(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::FailureThreshold(_)));

        let config = CircuitBreakerConfig {
            failure_threshold: 0.0,
            ..Default::default()
        };
        assert!(validate_breaker(&config).is_err());
    }

    #[test]
    fn all_errors_collected() {
        let config = CircuitBreakerConfig {
            failure_threshold: 0.0,
            min_throughput: 0,
            half_open_max_in_flight: 0,
            ..Default::default()
        };
        let errors = validate_breaker(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn inverted_delay_range_rejected() {
        let config = RetryConfig {
            base_delay_ms: 5000,
            max_delay_ms: 1000,
            ..Default::default()
        };
        assert!(validate_retries(&config).is_err());
    }
}

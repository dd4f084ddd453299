//! Per-service breaker registry.
//!
//! # Responsibilities
//! - Hold one breaker per logical service name
//! - Create breakers on first use with the registry defaults
//! - Stay safe under concurrent first access to the same name
//!
//! # Design Decisions
//! - Explicit injectable object, not a process global, so tests can
//!   construct isolated registries
//! - DashMap entry API gives an atomic get-or-insert per name
//! - Breakers live for the registry's lifetime; never destroyed

use std::sync::Arc;

use dashmap::DashMap;

use crate::breaker::circuit::CircuitBreaker;
use crate::config::{validate_breaker, CircuitBreakerConfig, ConfigError};

/// Registry of circuit breakers keyed by logical service name.
#[derive(Debug)]
pub struct BreakerRegistry {
    defaults: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    /// Build a registry. The default breaker settings are validated
    /// once here, which keeps `get_or_create` infallible.
    pub fn new(defaults: CircuitBreakerConfig) -> Result<Self, ConfigError> {
        validate_breaker(&defaults).map_err(ConfigError::Validation)?;
        Ok(Self {
            defaults,
            breakers: DashMap::new(),
        })
    }

    /// Fetch the breaker for `service`, creating it with the registry
    /// defaults on first use. Atomic under concurrent first access.
    pub fn get_or_create(&self, service: &str) -> Arc<CircuitBreaker> {
        if let Some(existing) = self.breakers.get(service) {
            return existing.value().clone();
        }
        self.breakers
            .entry(service.to_string())
            .or_insert_with(|| {
                tracing::debug!(service = %service, "Creating circuit breaker");
                // Defaults were validated at registry construction.
                let breaker = CircuitBreaker::new(service, self.defaults.clone())
                    .expect("registry defaults validated");
                Arc::new(breaker)
            })
            .clone()
    }

    /// Register a service with non-default settings ahead of first use.
    /// Replaces an existing breaker for the same name.
    pub fn insert(
        &self,
        service: &str,
        config: CircuitBreakerConfig,
    ) -> Result<Arc<CircuitBreaker>, ConfigError> {
        let breaker = Arc::new(CircuitBreaker::new(service, config)?);
        self.breakers.insert(service.to_string(), Arc::clone(&breaker));
        Ok(breaker)
    }

    /// Snapshot of all registered breakers, for reporting.
    pub fn all(&self) -> Vec<Arc<CircuitBreaker>> {
        self.breakers.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_use_creates_then_reuses() {
        let registry = BreakerRegistry::new(CircuitBreakerConfig::default()).unwrap();
        let a = registry.get_or_create("payments");
        let b = registry.get_or_create("payments");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.all().len(), 1);
    }

    #[test]
    fn services_are_isolated() {
        let registry = BreakerRegistry::new(CircuitBreakerConfig::default()).unwrap();
        let a = registry.get_or_create("payments");
        let b = registry.get_or_create("search");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.service(), "payments");
        assert_eq!(b.service(), "search");
    }

    #[test]
    fn invalid_defaults_rejected_up_front() {
        let config = CircuitBreakerConfig {
            min_throughput: 0,
            ..Default::default()
        };
        assert!(BreakerRegistry::new(config).is_err());
    }

    #[test]
    fn insert_overrides_defaults() {
        let registry = BreakerRegistry::new(CircuitBreakerConfig::default()).unwrap();
        let custom = CircuitBreakerConfig {
            min_throughput: 2,
            ..Default::default()
        };
        registry.insert("flaky", custom).unwrap();
        let breaker = registry.get_or_create("flaky");
        assert_eq!(breaker.service(), "flaky");
    }

    #[test]
    fn concurrent_first_access_yields_one_breaker() {
        let registry = Arc::new(BreakerRegistry::new(CircuitBreakerConfig::default()).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get_or_create("svc"))
            })
            .collect();
        let breakers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for breaker in &breakers[1..] {
            assert!(Arc::ptr_eq(&breakers[0], breaker));
        }
    }
}

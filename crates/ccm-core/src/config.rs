//! Consent manager configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the consent cookie
    pub cookie_name: String,
    /// Cookie lifetime in days
    pub cookie_duration: i64,
    /// Optional domain scope for the cookie
    pub cookie_domain: Option<String>,
    /// The fixed universe of consent-gated services, in declared order
    pub services: Vec<String>,
}

impl Config {
    /// Log every malformed service name. Validation never fails; the
    /// configuration is used as given.
    pub fn validate(&self) {
        for service in &self.services {
            if !is_valid_service_name(service) {
                tracing::error!(
                    service = %service,
                    "Invalid service name, only alphanumeric allowed"
                );
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie_name: "ccm".to_string(),
            cookie_duration: 365,
            cookie_domain: None,
            services: Vec::new(),
        }
    }
}

/// Service names are non-empty and ASCII alphanumeric.
pub fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric())
}

//! Cookie jar collaborator
//!
//! The host environment owns the actual cookies. Implementations supply
//! interior mutability so a jar handle can be shared as `Arc<dyn CookieJar>`.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::Result;

/// Write options for a cookie: lifetime in days and optional domain scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub expiry_days: i64,
    pub domain: Option<String>,
}

pub trait CookieJar: Send + Sync {
    fn get(&self, name: &str) -> Result<Option<String>>;

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()>;

    fn remove(&self, name: &str, domain: Option<&str>) -> Result<()>;
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
    domain: Option<String>,
}

/// In-memory reference jar honoring expiry and domain scope.
pub struct MemoryCookieJar {
    cookies: Mutex<HashMap<String, StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            cookies: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let mut cookies = self.cookies.lock();

        if let Some(cookie) = cookies.get(name) {
            if Utc::now() < cookie.expires_at {
                return Ok(Some(cookie.value.clone()));
            }
            cookies.remove(name);
        }

        Ok(None)
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
        let expires_at = Utc::now() + Duration::days(options.expiry_days);

        self.cookies.lock().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at,
                domain: options.domain.clone(),
            },
        );

        Ok(())
    }

    fn remove(&self, name: &str, domain: Option<&str>) -> Result<()> {
        let mut cookies = self.cookies.lock();

        // A domain-scoped removal only clears a cookie set for that domain.
        let matches = cookies
            .get(name)
            .map(|cookie| cookie.domain.as_deref() == domain)
            .unwrap_or(false);

        if matches {
            cookies.remove(name);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let jar = MemoryCookieJar::new();
        let options = CookieOptions {
            expiry_days: 1,
            domain: None,
        };

        jar.set("ccm", "{}", &options).unwrap();
        assert_eq!(jar.get("ccm").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_expired_cookie_is_absent() {
        let jar = MemoryCookieJar::new();
        let options = CookieOptions {
            expiry_days: 0,
            domain: None,
        };

        jar.set("ccm", "{}", &options).unwrap();
        assert_eq!(jar.get("ccm").unwrap(), None);
    }

    #[test]
    fn test_remove_respects_domain_scope() {
        let jar = MemoryCookieJar::new();
        let options = CookieOptions {
            expiry_days: 1,
            domain: Some("example.com".to_string()),
        };

        jar.set("ccm", "{}", &options).unwrap();

        // Wrong scope leaves the cookie in place
        jar.remove("ccm", None).unwrap();
        assert!(jar.get("ccm").unwrap().is_some());

        jar.remove("ccm", Some("example.com")).unwrap();
        assert_eq!(jar.get("ccm").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_prior_value() {
        let jar = MemoryCookieJar::new();
        let options = CookieOptions {
            expiry_days: 1,
            domain: None,
        };

        jar.set("ccm", "old", &options).unwrap();
        jar.set("ccm", "new", &options).unwrap();
        assert_eq!(jar.get("ccm").unwrap().as_deref(), Some("new"));
    }
}

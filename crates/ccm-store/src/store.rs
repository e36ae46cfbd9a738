//! Consent store
//!
//! Reads and writes the consent mapping through the jar collaborator. Jar
//! failures degrade: a failed or malformed read yields an empty mapping, a
//! failed write is logged and dropped, so callers never see a storage error.

use std::sync::Arc;

use crate::jar::{CookieJar, CookieOptions};
use crate::mapping::{ConsentMapping, Decision};

/// Where and for how long the consent cookie lives.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub expiry_days: i64,
    pub domain: Option<String>,
}

pub struct ConsentStore {
    jar: Arc<dyn CookieJar>,
    settings: CookieSettings,
}

impl ConsentStore {
    pub fn new(jar: Arc<dyn CookieJar>, settings: CookieSettings) -> Self {
        Self { jar, settings }
    }

    /// Read the current mapping. Absent, expired, unreadable or malformed
    /// cookies all yield an empty mapping.
    pub fn get_all(&self) -> ConsentMapping {
        let raw = match self.jar.get(&self.settings.name) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ConsentMapping::new(),
            Err(e) => {
                tracing::warn!(cookie = %self.settings.name, error = %e, "Consent cookie read failed");
                return ConsentMapping::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(mapping) => mapping,
            Err(e) => {
                tracing::warn!(cookie = %self.settings.name, error = %e, "Consent cookie payload malformed");
                ConsentMapping::new()
            }
        }
    }

    /// Serialize and write the mapping back, replacing any prior value.
    pub fn set_all(&self, mapping: &ConsentMapping) {
        let payload = match serde_json::to_string(mapping) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(cookie = %self.settings.name, error = %e, "Consent mapping serialization failed");
                return;
            }
        };

        let options = CookieOptions {
            expiry_days: self.settings.expiry_days,
            domain: self.settings.domain.clone(),
        };

        if let Err(e) = self.jar.set(&self.settings.name, &payload, &options) {
            tracing::warn!(cookie = %self.settings.name, error = %e, "Consent cookie write failed");
        }
    }

    /// Remove the persisted mapping entirely.
    pub fn clear(&self) {
        if let Err(e) = self
            .jar
            .remove(&self.settings.name, self.settings.domain.as_deref())
        {
            tracing::warn!(cookie = %self.settings.name, error = %e, "Consent cookie removal failed");
        }
    }

    pub fn is_accepted(&self, service: &str) -> bool {
        self.get_all().is_accepted(service)
    }

    pub fn decision(&self, service: &str) -> Decision {
        self.get_all().decision(service)
    }

    /// True iff every listed service has an explicit decision persisted.
    pub fn is_fully_decided<'a, I>(&self, services: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.get_all().is_fully_decided(services)
    }
}

impl Clone for ConsentStore {
    fn clone(&self) -> Self {
        Self {
            jar: Arc::clone(&self.jar),
            settings: self.settings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jar::MemoryCookieJar;
    use crate::StoreError;

    fn test_store() -> ConsentStore {
        ConsentStore::new(
            Arc::new(MemoryCookieJar::new()),
            CookieSettings {
                name: "ccm".to_string(),
                expiry_days: 365,
                domain: None,
            },
        )
    }

    #[test]
    fn test_missing_cookie_reads_empty() {
        let store = test_store();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let store = test_store();

        let mut mapping = ConsentMapping::new();
        mapping.accept("analytics");
        mapping.refuse("ads");

        store.set_all(&mapping);
        assert_eq!(store.get_all(), mapping);
    }

    #[test]
    fn test_malformed_payload_reads_empty() {
        let jar = Arc::new(MemoryCookieJar::new());
        let options = CookieOptions {
            expiry_days: 365,
            domain: None,
        };
        jar.set("ccm", "not json", &options).unwrap();

        let store = ConsentStore::new(
            jar,
            CookieSettings {
                name: "ccm".to_string(),
                expiry_days: 365,
                domain: None,
            },
        );
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_non_boolean_payload_reads_empty() {
        let jar = Arc::new(MemoryCookieJar::new());
        let options = CookieOptions {
            expiry_days: 365,
            domain: None,
        };
        jar.set("ccm", r#"{"analytics":"yes"}"#, &options).unwrap();

        let store = ConsentStore::new(
            jar,
            CookieSettings {
                name: "ccm".to_string(),
                expiry_days: 365,
                domain: None,
            },
        );
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_clear_removes_cookie() {
        let store = test_store();

        let mut mapping = ConsentMapping::new();
        mapping.accept("analytics");
        store.set_all(&mapping);

        store.clear();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_read_failure_degrades_to_empty() {
        struct FailingJar;

        impl CookieJar for FailingJar {
            fn get(&self, _name: &str) -> crate::Result<Option<String>> {
                Err(StoreError::Jar("unavailable".to_string()))
            }

            fn set(
                &self,
                _name: &str,
                _value: &str,
                _options: &CookieOptions,
            ) -> crate::Result<()> {
                Err(StoreError::Jar("unavailable".to_string()))
            }

            fn remove(&self, _name: &str, _domain: Option<&str>) -> crate::Result<()> {
                Err(StoreError::Jar("unavailable".to_string()))
            }
        }

        let store = ConsentStore::new(
            Arc::new(FailingJar),
            CookieSettings {
                name: "ccm".to_string(),
                expiry_days: 365,
                domain: None,
            },
        );

        assert!(store.get_all().is_empty());

        // Writes and removals are fire-and-forget
        let mut mapping = ConsentMapping::new();
        mapping.accept("analytics");
        store.set_all(&mapping);
        store.clear();
    }

    #[test]
    fn test_decision_read_through() {
        let store = test_store();

        let mut mapping = ConsentMapping::new();
        mapping.accept("a");
        mapping.refuse("b");
        store.set_all(&mapping);

        assert_eq!(store.decision("a"), Decision::Accepted);
        assert_eq!(store.decision("b"), Decision::Refused);
        assert_eq!(store.decision("c"), Decision::Undecided);
        assert!(store.is_accepted("a"));
        assert!(!store.is_accepted("b"));
        assert!(!store.is_fully_decided(["a", "b", "c"]));
        assert!(store.is_fully_decided(["a", "b"]));
    }
}

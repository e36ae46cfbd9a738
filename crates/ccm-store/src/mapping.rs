//! Consent mapping
//!
//! One tri-state decision per service. Only explicit decisions are stored;
//! a service without a key is undecided, never refused.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// User explicitly accepted the service
    Accepted,
    /// User explicitly refused the service
    Refused,
    /// User has not decided yet
    Undecided,
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }

    /// Whether the user made an explicit choice either way
    pub fn is_decided(&self) -> bool {
        !matches!(self, Decision::Undecided)
    }
}

/// Mapping from service name to an explicit accept/refuse decision.
///
/// Serializes transparently as a JSON object, which is the entire payload
/// of the consent cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentMapping {
    decisions: BTreeMap<String, bool>,
}

impl ConsentMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping that accepts every listed service.
    pub fn accept_all<'a, I>(services: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let decisions = services
            .into_iter()
            .map(|service| (service.to_string(), true))
            .collect();
        Self { decisions }
    }

    pub fn accept(&mut self, service: &str) {
        self.decisions.insert(service.to_string(), true);
    }

    pub fn refuse(&mut self, service: &str) {
        self.decisions.insert(service.to_string(), false);
    }

    pub fn decision(&self, service: &str) -> Decision {
        match self.decisions.get(service) {
            Some(true) => Decision::Accepted,
            Some(false) => Decision::Refused,
            None => Decision::Undecided,
        }
    }

    pub fn is_accepted(&self, service: &str) -> bool {
        self.decisions.get(service).copied().unwrap_or(false)
    }

    /// True iff every listed service has an explicit decision.
    pub fn is_fully_decided<'a, I>(&self, services: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        services
            .into_iter()
            .all(|service| self.decisions.contains_key(service))
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }
}

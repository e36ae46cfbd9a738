//! Consent manager
//!
//! Thin composition layer over the store and the view synchronizer. Every
//! public operation is synchronous and runs mutation, view sync, then
//! notification, in that order. Consent state is re-read from the cookie
//! on each operation rather than cached, so a listener that calls back
//! into the manager always observes the current state.

use parking_lot::RwLock;
use std::sync::Arc;

use ccm_store::{ConsentMapping, ConsentStore, CookieJar, CookieSettings, Decision};
use ccm_view::{ConsentDom, ViewSynchronizer};

use crate::config::Config;
use crate::events::{ConsentEvent, EventDispatcher};

pub struct ConsentManager {
    config: Config,
    store: ConsentStore,
    view: ViewSynchronizer,
    dom: Arc<RwLock<dyn ConsentDom + Send + Sync>>,
    events: EventDispatcher,
}

impl ConsentManager {
    /// Construction always succeeds; configuration problems are logged and
    /// the configuration is used as given.
    pub fn new(
        config: Config,
        jar: Arc<dyn CookieJar>,
        dom: Arc<RwLock<dyn ConsentDom + Send + Sync>>,
    ) -> Self {
        config.validate();

        let store = ConsentStore::new(
            jar,
            CookieSettings {
                name: config.cookie_name.clone(),
                expiry_days: config.cookie_duration,
                domain: config.cookie_domain.clone(),
            },
        );

        Self {
            config,
            store,
            view: ViewSynchronizer::new(),
            dom,
            events: EventDispatcher::new(),
        }
    }

    /// Register a notification listener. Listeners run synchronously, in
    /// registration order.
    pub fn on<F>(&self, listener: F)
    where
        F: Fn(&ConsentEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    /// Bring the view in line with the persisted state.
    pub fn init(&self) {
        self.sync_view();
        self.events.emit(&ConsentEvent::Init);
    }

    /// Drop all persisted decisions; every service reverts to undecided.
    pub fn reset(&self) {
        self.store.clear();
        self.sync_view();
        self.events.emit(&ConsentEvent::Clear);
    }

    /// Accept every known service, replacing the whole mapping.
    pub fn accept_all(&self) {
        let mapping = ConsentMapping::accept_all(self.config.services.iter().map(String::as_str));
        self.store.set_all(&mapping);
        self.sync_view();
        self.events.emit(&ConsentEvent::AllConfigured);
    }

    /// Accept one service, leaving the others untouched.
    pub fn accept(&self, service: &str) {
        let mut mapping = self.store.get_all();
        mapping.accept(service);
        self.store.set_all(&mapping);
        self.sync_view();

        self.events.emit(&ConsentEvent::Accept(service.to_string()));
        if self.is_all_configured() {
            self.events.emit(&ConsentEvent::AllConfigured);
        }
    }

    /// Refuse one service, leaving the others untouched.
    pub fn refuse(&self, service: &str) {
        let mut mapping = self.store.get_all();
        mapping.refuse(service);
        self.store.set_all(&mapping);
        self.sync_view();

        self.events.emit(&ConsentEvent::Refuse(service.to_string()));
        if self.is_all_configured() {
            self.events.emit(&ConsentEvent::AllConfigured);
        }
    }

    pub fn is_accepted(&self, service: &str) -> bool {
        self.store.is_accepted(service)
    }

    pub fn decision(&self, service: &str) -> Decision {
        self.store.decision(service)
    }

    /// True iff every known service has an explicit decision.
    pub fn is_all_configured(&self) -> bool {
        self.store
            .is_fully_decided(self.config.services.iter().map(String::as_str))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn sync_view(&self) {
        let mapping = self.store.get_all();
        let mut dom = self.dom.write();
        self.view.sync(&mut *dom, &mapping, &self.config.services);
    }
}

impl Clone for ConsentManager {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            view: self.view,
            dom: Arc::clone(&self.dom),
            events: self.events.clone(),
        }
    }
}

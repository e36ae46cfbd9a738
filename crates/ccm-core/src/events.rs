//! Consent lifecycle notifications
//!
//! Listeners are invoked synchronously, in registration order, every one of
//! them for every event. Emission works off a snapshot of the listener
//! list, so no lock is held while listeners run and a listener may call
//! back into the manager.

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentEvent {
    /// Manager initialized and the view was brought up to date
    Init,
    /// Persisted consent was cleared
    Clear,
    /// Every known service has an explicit decision
    AllConfigured,
    /// One service was accepted
    Accept(String),
    /// One service was refused
    Refuse(String),
}

type Listener = Arc<dyn Fn(&ConsentEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventDispatcher {
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&ConsentEvent) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    pub fn emit(&self, event: &ConsentEvent) {
        let listeners: Vec<Listener> = self.listeners.read().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

impl Clone for EventDispatcher {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            dispatcher.subscribe(move |_event| seen.lock().push(tag));
        }

        dispatcher.emit(&ConsentEvent::Init);
        assert_eq!(*seen.lock(), ["first", "second", "third"]);
    }

    #[test]
    fn test_every_listener_sees_every_event() {
        let dispatcher = EventDispatcher::new();
        let count = Arc::new(Mutex::new(0usize));

        for _ in 0..2 {
            let count = Arc::clone(&count);
            dispatcher.subscribe(move |_event| *count.lock() += 1);
        }

        dispatcher.emit(&ConsentEvent::Accept("a".to_string()));
        dispatcher.emit(&ConsentEvent::Clear);
        assert_eq!(*count.lock(), 4);
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let dispatcher = EventDispatcher::new();
        let inner = dispatcher.clone();
        let fired = Arc::new(Mutex::new(0usize));

        let fired_inner = Arc::clone(&fired);
        dispatcher.subscribe(move |_event| {
            let fired = Arc::clone(&fired_inner);
            inner.subscribe(move |_event| *fired.lock() += 1);
        });

        // The snapshot keeps the new listener out of the current emit
        dispatcher.emit(&ConsentEvent::Init);
        assert_eq!(*fired.lock(), 0);

        dispatcher.emit(&ConsentEvent::Init);
        assert_eq!(*fired.lock(), 1);
    }
}

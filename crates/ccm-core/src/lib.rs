//! CCM Core
//!
//! Cookie consent manager: tracks per-service consent decisions in a single
//! cookie and keeps consent-gated document content in sync with them.

mod config;
mod events;
mod manager;

pub use config::{is_valid_service_name, Config};
pub use events::{ConsentEvent, EventDispatcher};
pub use manager::ConsentManager;

// Re-export core components
pub use ccm_store::{
    ConsentMapping, ConsentStore, CookieJar, CookieOptions, CookieSettings, Decision,
    MemoryCookieJar, StoreError,
};
pub use ccm_view::{
    ConsentDom, NodeId, PageDom, ScriptRef, ViewSynchronizer, CONSENT_ATTR, FALLBACK_ATTR,
    RENDERED_ATTR,
};

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

//! CCM View Synchronization
//!
//! Reconciles consent-gated document nodes against the current consent
//! mapping: accepted services get their gated markup swapped in, everything
//! else shows the original fallback. The document is reached through the
//! [`ConsentDom`] collaborator trait; [`PageDom`] is the bundled in-memory
//! reference implementation.

mod dom;
mod page;
mod sync;

pub use dom::{ConsentDom, NodeId, ScriptRef, CONSENT_ATTR};
pub use page::PageDom;
pub use sync::{ViewSynchronizer, FALLBACK_ATTR, RENDERED_ATTR};

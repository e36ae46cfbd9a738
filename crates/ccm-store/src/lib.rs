//! CCM Consent Storage
//!
//! Persists per-service consent decisions as the JSON payload of a single
//! expiring, domain-scoped cookie. The cookie itself is reached through the
//! [`CookieJar`] collaborator trait; [`MemoryCookieJar`] is the bundled
//! reference implementation.

mod error;
mod jar;
mod mapping;
mod store;

pub use error::StoreError;
pub use jar::{CookieJar, CookieOptions, MemoryCookieJar};
pub use mapping::{ConsentMapping, Decision};
pub use store::{ConsentStore, CookieSettings};

pub type Result<T> = std::result::Result<T, StoreError>;

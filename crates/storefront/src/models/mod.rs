//! Domain models for storefront.

pub mod session;

pub use session::session_keys;

//! Session-related types.
//!
//! The session itself is an anonymous cookie; the only thing stored in it
//! is the visitor's cart ID.

/// Session keys for per-visitor data.
pub mod session_keys {
    /// Key for storing the visitor's cart ID.
    pub const CART_ID: &str = "cart_id";
}

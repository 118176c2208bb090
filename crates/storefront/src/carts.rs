//! In-memory session cart storage.
//!
//! Each visitor's session cookie carries a [`CartId`]; this module maps
//! that ID to the live [`Cart`] and its [`CheckoutFlow`]. Entries live in
//! a TTL-bounded cache so abandoned carts evaporate on their own - there
//! is deliberately no durable store behind this (a cart does not survive
//! a restart, matching the single-page-session lifecycle).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use stepstyle_core::{Cart, CartId, CheckoutFlow};

/// How long an untouched cart sticks around before eviction.
const CART_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Upper bound on concurrently live carts.
const MAX_LIVE_CARTS: u64 = 100_000;

/// One visitor's cart together with its checkout state.
#[derive(Debug, Default)]
pub struct CartSession {
    pub cart: Cart,
    pub checkout: CheckoutFlow,
}

/// Shared handle to one cart session.
///
/// Handlers lock the mutex for the duration of a single mutation, which
/// serializes quantity clicks racing against each other on the same cart.
pub type SessionHandle = Arc<Mutex<CartSession>>;

/// The process-wide map of live cart sessions.
#[derive(Clone)]
pub struct CartSessions {
    carts: Cache<CartId, SessionHandle>,
}

impl CartSessions {
    /// Create an empty session map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carts: Cache::builder()
                .max_capacity(MAX_LIVE_CARTS)
                .time_to_idle(CART_IDLE_TTL)
                .build(),
        }
    }

    /// Fetch the session for `id`, creating an empty one if none exists.
    pub async fn get_or_create(&self, id: CartId) -> SessionHandle {
        self.carts
            .get_with(id, async { Arc::new(Mutex::new(CartSession::default())) })
            .await
    }

    /// Fetch the session for `id` without creating one.
    pub async fn get(&self, id: CartId) -> Option<SessionHandle> {
        self.carts.get(&id).await
    }
}

impl Default for CartSessions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepstyle_core::Product;

    fn shoe() -> Product {
        Product {
            name: "Shoe".to_string(),
            price: "$10".to_string(),
            image: "shoe.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let sessions = CartSessions::new();
        let id = CartId::generate();

        let handle = sessions.get_or_create(id).await;
        handle.lock().await.cart.add_or_increment(&shoe());

        let again = sessions.get_or_create(id).await;
        assert_eq!(again.lock().await.cart.total_quantity(), 1);
    }

    #[tokio::test]
    async fn test_distinct_ids_get_distinct_carts() {
        let sessions = CartSessions::new();
        let a = sessions.get_or_create(CartId::generate()).await;
        let b = sessions.get_or_create(CartId::generate()).await;

        a.lock().await.cart.add_or_increment(&shoe());

        assert!(b.lock().await.cart.is_empty());
    }

    #[tokio::test]
    async fn test_get_without_create() {
        let sessions = CartSessions::new();
        assert!(sessions.get(CartId::generate()).await.is_none());
    }
}

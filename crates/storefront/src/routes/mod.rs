//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Shop page (product grid + contact form)
//!
//! # Cart (HTMX fragments)
//! GET  /cart/popup        - Cart popup fragment (list or empty state)
//! GET  /cart/close        - Empty popup container (client dismiss)
//! POST /cart/add          - Add a catalog product (returns popup fragment)
//! POST /cart/update       - Step a line's quantity (returns popup fragment)
//! GET  /cart/count        - Cart count badge (fragment)
//!
//! # Checkout (HTMX fragments)
//! POST /checkout          - Open the confirmation prompt
//! POST /checkout/cancel   - Dismiss the prompt, cart unchanged
//! POST /checkout/confirm  - Place the order: clear cart, show success
//! GET  /checkout/dismiss  - Clear the success message once expired
//!
//! # Contact
//! POST /contact           - Contact form (JSON response, no real delivery)
//! ```
//!
//! Every cart mutation responds with the popup fragment re-rendered in
//! full from current state, plus an `HX-Trigger: cart-updated` header so
//! the count badge refreshes itself.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/popup", get(cart::popup))
        .route("/close", get(cart::close))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/cancel", post(checkout::cancel))
        .route("/confirm", post(checkout::confirm))
        .route("/dismiss", get(checkout::dismiss))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page
        .route("/", get(home::home))
        // Cart fragments
        .nest("/cart", cart_routes())
        // Checkout flow
        .nest("/checkout", checkout_routes())
        // Contact form
        .route("/contact", post(contact::submit))
}

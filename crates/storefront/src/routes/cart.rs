//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The visitor's cart ID lives in the session cookie and maps to an
//! in-memory cart. Every mutation re-renders the whole popup fragment
//! from current state; the popup is replaced wholesale on each swap, so
//! at most one popup is ever shown and nothing on the page holds a stale
//! view of the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stepstyle_core::{Cart, CartId, Delta, LineId, ProductId, QuantityChange};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart line display data for templates.
///
/// Quantity controls carry the line's stable ID as rendered right now;
/// a control from an older render whose line is gone simply misses.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartPopupView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
}

impl CartPopupView {
    /// View of a cart that doesn't exist yet.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartPopupView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    id: line.id.as_i32(),
                    name: line.name.clone(),
                    price: line.price.clone(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            item_count: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session, if one was assigned.
pub(crate) async fn get_cart_id(session: &Session) -> Result<Option<CartId>> {
    Ok(session.get::<CartId>(session_keys::CART_ID).await?)
}

/// Get the cart ID from the session, assigning a fresh one if missing.
pub(crate) async fn ensure_cart_id(session: &Session) -> Result<CartId> {
    if let Some(id) = session.get::<CartId>(session_keys::CART_ID).await? {
        return Ok(id);
    }

    let id = CartId::generate();
    session.insert(session_keys::CART_ID, id).await?;
    tracing::debug!(cart_id = %id, "Assigned new cart to session");
    Ok(id)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: LineId,
    pub direction: Delta,
}

/// Cart popup fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_popup.html")]
pub struct CartPopupTemplate {
    pub cart: CartPopupView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// The popup container with nothing in it. Returned by `close` and used
/// as the swap target placeholder on the shop page.
const EMPTY_POPUP: &str = "<div id=\"cart-popup\"></div>";

/// Show the cart popup (HTMX).
#[instrument(skip(state, session))]
pub async fn popup(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = match get_cart_id(&session).await? {
        Some(id) => match state.carts().get(id).await {
            Some(handle) => CartPopupView::from(&handle.lock().await.cart),
            None => CartPopupView::empty(),
        },
        None => CartPopupView::empty(),
    };

    Ok(CartPopupTemplate { cart }.into_response())
}

/// Dismiss the cart popup (HTMX).
///
/// Replaces the popup with its empty container; the cart itself is
/// untouched.
#[instrument]
pub async fn close() -> impl IntoResponse {
    Html(EMPTY_POPUP)
}

/// Add a product to the cart (HTMX).
///
/// Creates the cart on first use, merges by product name, and responds
/// with the freshly rendered popup so adding always opens it.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let Some(product) = state.catalog().get(form.product_id) else {
        return Err(AppError::NotFound(format!("product {}", form.product_id)));
    };

    let id = ensure_cart_id(&session).await?;
    let handle = state.carts().get_or_create(id).await;

    let cart = {
        let mut guard = handle.lock().await;
        guard.cart.add_or_increment(&product.to_cart_product());
        CartPopupView::from(&guard.cart)
    };

    tracing::debug!(cart_id = %id, product = %form.product_id, "Added to cart");

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPopupTemplate { cart },
    )
        .into_response())
}

/// Step a line's quantity up or down (HTMX).
///
/// A decrease from quantity 1 removes the line. A stale line ID (already
/// removed by an earlier click) changes nothing; the re-rendered popup
/// shows the real state either way.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let Some(cart_id) = get_cart_id(&session).await? else {
        return Ok(CartPopupTemplate {
            cart: CartPopupView::empty(),
        }
        .into_response());
    };

    let Some(handle) = state.carts().get(cart_id).await else {
        return Ok(CartPopupTemplate {
            cart: CartPopupView::empty(),
        }
        .into_response());
    };

    let cart = {
        let mut guard = handle.lock().await;
        match guard.cart.change_quantity(form.line_id, form.direction) {
            QuantityChange::Updated(quantity) => {
                tracing::debug!(line_id = %form.line_id, quantity, "Quantity updated");
            }
            QuantityChange::Removed => {
                tracing::debug!(line_id = %form.line_id, "Line removed");
            }
            QuantityChange::UnknownLine => {
                tracing::debug!(line_id = %form.line_id, "Stale line id ignored");
            }
        }
        CartPopupView::from(&guard.cart)
    };

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPopupTemplate { cart },
    )
        .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Response> {
    let count = match get_cart_id(&session).await? {
        Some(id) => match state.carts().get(id).await {
            Some(handle) => handle.lock().await.cart.total_quantity(),
            None => 0,
        },
        None => 0,
    };

    Ok(CartCountTemplate { count }.into_response())
}

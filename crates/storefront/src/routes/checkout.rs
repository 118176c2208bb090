//! Checkout route handlers.
//!
//! Checkout is a local confirm/success flow: no payment, no remote order
//! submission. The state machine itself lives in `stepstyle_core`; these
//! handlers drive it under the cart session lock and render the matching
//! fragment for each state.

use std::time::Instant;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use stepstyle_core::{CheckoutFlow, checkout::SUCCESS_DISMISS};

use crate::error::Result;
use crate::routes::cart::{ensure_cart_id, get_cart_id};
use crate::state::AppState;

/// Checkout confirmation fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_confirm.html")]
pub struct CheckoutConfirmTemplate {
    pub total: u32,
}

/// Checkout success fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_success.html")]
pub struct CheckoutSuccessTemplate;

/// Render whatever fragment matches the flow's current state.
fn render_flow(flow: &CheckoutFlow) -> Response {
    match flow {
        CheckoutFlow::Idle => Html("").into_response(),
        CheckoutFlow::ConfirmPending { total } => {
            CheckoutConfirmTemplate { total: *total }.into_response()
        }
        CheckoutFlow::SuccessShown { .. } => CheckoutSuccessTemplate.into_response(),
    }
}

/// Open the checkout confirmation prompt (HTMX).
///
/// Snapshots the cart's total quantity into the prompt. If a prompt or a
/// success message is already showing, that one is re-rendered instead of
/// stacking a second flow.
#[instrument(skip(state, session))]
pub async fn begin(State(state): State<AppState>, session: Session) -> Result<Response> {
    let id = ensure_cart_id(&session).await?;
    let handle = state.carts().get_or_create(id).await;

    let mut guard = handle.lock().await;
    guard.checkout.tick(Instant::now());

    let total = guard.cart.total_quantity();
    if !guard.checkout.begin(total) {
        tracing::debug!(cart_id = %id, "Checkout already in progress");
    }

    Ok(render_flow(&guard.checkout))
}

/// Dismiss the confirmation prompt without ordering (HTMX).
///
/// The cart is left untouched.
#[instrument(skip(state, session))]
pub async fn cancel(State(state): State<AppState>, session: Session) -> Result<Response> {
    if let Some(id) = get_cart_id(&session).await? {
        if let Some(handle) = state.carts().get(id).await {
            let mut guard = handle.lock().await;
            if !guard.checkout.cancel() {
                tracing::debug!(cart_id = %id, "Cancel with no prompt open ignored");
            }
        }
    }

    Ok(Html("").into_response())
}

/// Confirm the order (HTMX).
///
/// Clears the cart, shows the success acknowledgment, and schedules its
/// auto-dismiss. The dismiss is fire-and-forget; `tick` is also applied
/// whenever the flow is rendered, so the success state cannot outlive its
/// deadline even if the task is lost.
#[instrument(skip(state, session))]
pub async fn confirm(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(id) = get_cart_id(&session).await? else {
        return Ok(Html("").into_response());
    };
    let Some(handle) = state.carts().get(id).await else {
        return Ok(Html("").into_response());
    };

    let mut guard = handle.lock().await;
    if guard.checkout.confirm(Instant::now()) {
        guard.cart.reset();
        tracing::info!(cart_id = %id, "Order confirmed, cart cleared");

        let dismiss_handle = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_DISMISS).await;
            dismiss_handle.lock().await.checkout.tick(Instant::now());
        });
    } else {
        tracing::debug!(cart_id = %id, "Confirm with no prompt open ignored");
    }

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        render_flow(&guard.checkout),
    )
        .into_response())
}

/// Clear the success acknowledgment once its deadline has passed (HTMX).
///
/// Polled by the success fragment itself after the dismiss delay. Until
/// the deadline the fragment is re-rendered unchanged.
#[instrument(skip(state, session))]
pub async fn dismiss(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(id) = get_cart_id(&session).await? else {
        return Ok(Html("").into_response());
    };
    let Some(handle) = state.carts().get(id).await else {
        return Ok(Html("").into_response());
    };

    let mut guard = handle.lock().await;
    guard.checkout.tick(Instant::now());

    match guard.checkout {
        CheckoutFlow::SuccessShown { .. } => Ok(render_flow(&guard.checkout)),
        _ => Ok(Html("").into_response()),
    }
}

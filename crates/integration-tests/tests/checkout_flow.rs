//! Checkout flow through the real router: confirmation prompt, cancel,
//! confirm-clears-cart, and the auto-dismissing success message.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use stepstyle_integration_tests::TestApp;

#[tokio::test]
async fn begin_shows_total_quantity() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=2").await;

    let response = app.post_form("/checkout", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Total items: 3"));
}

#[tokio::test]
async fn begin_on_empty_cart_shows_zero() {
    let mut app = TestApp::new();

    let response = app.post_form("/checkout", "").await;
    assert!(response.body.contains("Total items: 0"));
}

#[tokio::test]
async fn cancel_leaves_cart_untouched() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    app.post_form("/checkout", "").await;
    let response = app.post_form("/checkout/cancel", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1<"));
}

#[tokio::test]
async fn confirm_clears_cart_and_shows_success() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=2").await;

    app.post_form("/checkout", "").await;
    let response = app.post_form("/checkout/confirm", "").await;

    assert!(response.body.contains("Success"));
    assert_eq!(
        response.headers.get("HX-Trigger").unwrap(),
        "cart-updated"
    );

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">0<"));

    let popup = app.get("/cart/popup").await;
    assert!(popup.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn confirm_without_prompt_is_a_noop() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.post_form("/checkout/confirm", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Success"));

    // The cart survived the stray confirm.
    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1<"));
}

#[tokio::test]
async fn second_begin_reuses_the_open_prompt() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    app.post_form("/checkout", "").await;
    app.post_form("/cart/add", "product_id=1").await;

    // The prompt keeps the total from when it was opened.
    let response = app.post_form("/checkout", "").await;
    assert!(response.body.contains("Total items: 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn success_message_dismisses_after_deadline() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/checkout", "").await;
    app.post_form("/checkout/confirm", "").await;

    // Still showing before the deadline.
    let response = app.get("/checkout/dismiss").await;
    assert!(response.body.contains("Success"));

    tokio::time::sleep(Duration::from_millis(2200)).await;

    let response = app.get("/checkout/dismiss").await;
    assert!(response.body.is_empty());

    // And the flow is back to Idle: a fresh checkout can begin.
    let response = app.post_form("/checkout", "").await;
    assert!(response.body.contains("Total items: 0"));
}

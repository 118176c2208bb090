//! Contact form submission: presence-only validation and acknowledgments.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use stepstyle_integration_tests::TestApp;

#[tokio::test]
async fn complete_submission_is_acknowledged() {
    let mut app = TestApp::new();

    let response = app
        .post_form(
            "/contact",
            "name=Ada&email=ada%40example.com&message=Love+the+shoes",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Your message has been sent.");
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/contact", "name=Ada&email=ada%40example.com&message=")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let json = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please fill in all fields.");
}

#[tokio::test]
async fn whitespace_only_counts_as_empty() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/contact", "name=+++&email=a%40b.c&message=hi")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submission_never_touches_the_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    app.post_form(
        "/contact",
        "name=Ada&email=ada%40example.com&message=hello",
    )
    .await;

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1<"));
}

//! Contact form route handlers.
//!
//! The form has no delivery backend; a well-formed submission is simply
//! acknowledged. Fields are required to be non-empty and nothing more.

use axum::{Form, Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit the contact form.
///
/// POST /contact
///
/// All three fields must be non-empty after trimming; an incomplete
/// submission gets a blocking "fill in all fields" response.
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Form(form): Form<ContactForm>) -> impl IntoResponse {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Please fill in all fields.".to_string()),
            }),
        );
    }

    // No real submission happens in this storefront.
    tracing::info!(email = %email, "Contact message received");

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: Some("Your message has been sent.".to_string()),
        }),
    )
}

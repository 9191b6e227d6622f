use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types, one per pipeline step.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Inbound payload has no usable email (the dedup key).
    MissingEmail,
    /// Token exchange with the Zoho accounts server failed.
    Auth(String),
    /// Contact search failed (transport or provider error).
    ///
    /// Never surfaces in an HTTP response: the webhook handler collapses
    /// it to "no duplicate found" (fail-open).
    Search(String),
    /// Contact creation was rejected or the response was malformed.
    Create(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingEmail => write!(f, "Missing email in lead payload"),
            AppError::Auth(msg) => write!(f, "Token exchange failed: {}", msg),
            AppError::Search(msg) => write!(f, "Contact search failed: {}", msg),
            AppError::Create(msg) => write!(f, "Contact creation failed: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// The provider error detail is logged but never leaked to the HTTP
    /// caller; every failure maps to a generic French message. Missing
    /// email keeps its historical 500 status for wire compatibility with
    /// the existing form provider.
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingEmail => {
                tracing::warn!("Rejected lead payload without email");
                (StatusCode::INTERNAL_SERVER_ERROR, "Email manquant")
            }
            AppError::Auth(msg) => {
                tracing::error!("Token exchange error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur technique")
            }
            AppError::Search(msg) => {
                // Collapsed in the handler; kept here so the mapping stays total
                tracing::error!("Contact search error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur technique")
            }
            AppError::Create(msg) => {
                tracing::error!("Contact creation error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erreur technique")
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

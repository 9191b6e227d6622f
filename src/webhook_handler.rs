use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::webhook_models::{LeadPayload, WebhookResponse, ZohoContact};
use crate::zoho_client::ZohoClient;

/// Shared application state, built once at startup and read-only per
/// request. There is no per-request mutable state: each webhook fetches
/// its own token and runs its steps sequentially.
pub struct AppState {
    pub config: Config,
    pub zoho: ZohoClient,
}

/// Assembles the application routes. Shared between `main` and the
/// integration tests so both exercise the same router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/webhook/jcdm", post(jcdm_webhook))
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Webhook JCDM OK"
}

/// JCDM lead webhook handler.
///
/// Flow per request (strictly sequential):
/// 1. Validate email presence (the dedup key) before any network call.
/// 2. Exchange the refresh token for a bearer token.
/// 3. Search Zoho contacts by email.
/// 4. Duplicate found: 409, no creation call.
/// 5. Otherwise create the contact and return its Zoho id with 200.
///
/// `Auth` and `Create` failures propagate and map to a generic 500; the
/// search result is collapsed here, at this single call site.
pub async fn jcdm_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadPayload>,
) -> Result<(StatusCode, Json<WebhookResponse>), AppError> {
    let email = payload.email().ok_or(AppError::MissingEmail)?;

    tracing::info!("Received JCDM lead for {}", email);

    let token = state.zoho.fetch_access_token().await?;

    // Fail-open: a transient search failure must not block lead creation,
    // at the cost of a possible duplicate while Zoho search is down.
    let exists = match state.zoho.contact_exists(email, &token).await {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!("Duplicate check failed, proceeding as new lead: {}", e);
            false
        }
    };

    if exists {
        tracing::info!("Duplicate lead for {}, skipping creation", email);
        return Ok((StatusCode::CONFLICT, Json(WebhookResponse::duplicate())));
    }

    let contact = ZohoContact::from_lead(&payload, email);
    let contact_id = state.zoho.create_contact(&contact, &token).await?;

    tracing::info!("Lead {} created as Zoho contact {}", email, contact_id);

    Ok((StatusCode::OK, Json(WebhookResponse::created(contact_id))))
}

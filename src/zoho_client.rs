use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::webhook_models::ZohoContact;

/// Client for the Zoho accounts server (token exchange) and the Zoho
/// CRM REST API (contact search and creation).
///
/// Tokens are fetched fresh for every webhook and never cached; only the
/// underlying connection pool is shared between requests.
#[derive(Clone)]
pub struct ZohoClient {
    client: reqwest::Client,
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl ZohoClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Outbound calls get a hard 30s ceiling instead of transport defaults
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create Zoho HTTP client: {}", e))?;

        Ok(Self {
            client,
            accounts_url: config.zoho_accounts_url.clone(),
            api_url: config.zoho_api_url.clone(),
            client_id: config.zoho_client_id.clone(),
            client_secret: config.zoho_client_secret.clone(),
            refresh_token: config.zoho_refresh_token.clone(),
        })
    }

    /// Exchanges the long-lived refresh token for a short-lived bearer token.
    ///
    /// One network call per invocation, no caching. Zoho's token endpoint
    /// takes the whole grant as query parameters.
    pub async fn fetch_access_token(&self) -> Result<String, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/oauth/v2/token", self.accounts_url),
            &[
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ],
        )
        .map_err(|e| AppError::Auth(format!("Failed to build token URL: {}", e)))?;

        // Redact credentials from logs
        tracing::debug!("Requesting access token from {}/oauth/v2/token", self.accounts_url);

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Auth(format!(
                "Token endpoint returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))?;

        body.get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Auth("Token response missing 'access_token' field".to_string())
            })
    }

    /// Searches Zoho contacts by exact email match.
    ///
    /// Returns `Ok(true)` iff the result set is non-empty. Errors are
    /// returned to the caller; the webhook handler decides what a failed
    /// search means for the flow.
    pub async fn contact_exists(&self, email: &str, token: &str) -> Result<bool, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/crm/v2/Contacts/search", self.api_url),
            &[("criteria", format!("(Email:equals:{})", email))],
        )
        .map_err(|e| AppError::Search(format!("Failed to build search URL: {}", e)))?;

        tracing::info!("Searching Zoho contacts for {}", email);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Zoho-oauthtoken {}", token))
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Contact search request failed: {}", e)))?;

        // Zoho answers 204 with an empty body when nothing matches
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(false);
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Search(format!(
                "Zoho search returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        let found = body
            .get("data")
            .and_then(|d| d.as_array())
            .map(|contacts| !contacts.is_empty())
            .unwrap_or(false);

        Ok(found)
    }

    /// Creates the contact in Zoho CRM and returns its store-assigned id.
    ///
    /// The id is taken from `data[0].details.id` of the creation response;
    /// anything else is a malformed response and an error.
    pub async fn create_contact(
        &self,
        contact: &ZohoContact,
        token: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/crm/v2/Contacts", self.api_url);
        tracing::info!("Creating Zoho contact for {}", contact.email);

        let body = json!({ "data": [contact] });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Zoho-oauthtoken {}", token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Create(format!("Contact creation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Create(format!(
                "Zoho returned {}: {}",
                status, error_text
            )));
        }

        let response_data: Value = response
            .json()
            .await
            .map_err(|e| AppError::Create(format!("Failed to parse creation response: {}", e)))?;

        // Zoho usually returns the id as a string, occasionally as a number
        let details = response_data
            .get("data")
            .and_then(|d| d.get(0))
            .and_then(|item| item.get("details"));

        let contact_id = if let Some(id) = details.and_then(|d| d.get("id")).and_then(|i| i.as_str())
        {
            id.to_string()
        } else if let Some(id) = details.and_then(|d| d.get("id")).and_then(|i| i.as_i64()) {
            id.to_string()
        } else {
            tracing::warn!("Unexpected Zoho creation response: {:?}", response_data);
            return Err(AppError::Create(
                "Creation response missing 'data[0].details.id'".to_string(),
            ));
        };

        tracing::info!("Zoho contact created: {}", contact_id);
        Ok(contact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = Config {
            zoho_client_id: "id".to_string(),
            zoho_client_secret: "secret".to_string(),
            zoho_refresh_token: "refresh".to_string(),
            zoho_accounts_url: "https://accounts.zoho.eu".to_string(),
            zoho_api_url: "https://www.zohoapis.eu".to_string(),
            port: 3000,
        };
        assert!(ZohoClient::new(&config).is_ok());
    }
}

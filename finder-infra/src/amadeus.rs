use async_trait::async_trait;
use finder_core::{FlightSearchProvider, OfferQuery, ProviderError, RawOffer};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::app_config::AmadeusConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(10);

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct FlightOffersResponse {
    #[serde(default)]
    data: Vec<RawOffer>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    status: Option<u16>,
    title: Option<String>,
    detail: Option<String>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn new(value: String, expires_in: u64, issued_at: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        Self {
            value,
            expires_at: issued_at + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

// ============================================================================
// Client
// ============================================================================

/// Amadeus Self-Service client for the Flight Offers Search API.
///
/// Holds one OAuth2 client-credentials token and reuses it until shortly
/// before it expires.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AccessToken>>,
}

impl AmadeusClient {
    pub fn new(config: &AmadeusConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(Instant::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another request may have refreshed it while we waited for the lock.
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Instant::now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<AccessToken, ProviderError> {
        let issued_at = Instant::now();
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Auth(describe_error_body(status.as_u16(), &body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Auth(format!("Failed to parse token response: {}", e)))?;

        info!("Obtained Amadeus access token, valid for {}s", token.expires_in);
        Ok(AccessToken::new(token.access_token, token.expires_in, issued_at))
    }

    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl FlightSearchProvider for AmadeusClient {
    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, ProviderError> {
        let token = self.access_token().await?;
        let adults = query.adults.to_string();
        let max = query.max.to_string();
        let params = [
            ("originLocationCode", query.origin.as_str()),
            ("destinationLocationCode", query.destination.as_str()),
            ("departureDate", query.departure_date.as_str()),
            ("adults", adults.as_str()),
            ("max", max.as_str()),
        ];

        debug!(
            "GET {} {} -> {} on {}",
            FLIGHT_OFFERS_PATH, query.origin, query.destination, query.departure_date
        );

        let response = self
            .http
            .get(format!("{}{}", self.base_url, FLIGHT_OFFERS_PATH))
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.invalidate_token().await;
            }
            let detail = describe_error_body(status.as_u16(), &body);
            warn!("Amadeus flight search failed: {}", detail);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        decode_offers(&body)
    }
}

fn decode_offers(body: &str) -> Result<Vec<RawOffer>, ProviderError> {
    serde_json::from_str::<FlightOffersResponse>(body)
        .map(|response| response.data)
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Turns an Amadeus error body into one line per reported error.
///
/// Falls back to the raw text when the body is not the usual `errors` document.
pub fn describe_error_body(status: u16, body: &str) -> String {
    let entries = serde_json::from_str::<ErrorResponse>(body)
        .map(|response| response.errors)
        .unwrap_or_default();

    if entries.is_empty() {
        let text = body.trim();
        return if text.is_empty() {
            format!("[{}]", status)
        } else {
            format!("[{}] {}", status, text)
        };
    }

    entries
        .iter()
        .map(|entry| {
            let code = entry.status.unwrap_or(status);
            match (entry.title.as_deref(), entry.detail.as_deref()) {
                (Some(title), Some(detail)) => format!("[{}] {}: {}", code, title, detail),
                (Some(text), None) | (None, Some(text)) => format!("[{}] {}", code, text),
                (None, None) => format!("[{}]", code),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

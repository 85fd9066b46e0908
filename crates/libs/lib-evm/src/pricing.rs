//! # Indicative Price Client
//!
//! Fetches the displayed exchange ratio for a token pair from the price
//! service. Stateless; safe to call concurrently for different pairs. The
//! caller is responsible for discarding superseded responses - this client
//! does no de-duplication.

use crate::types::{PriceQuote, PriceResponse};
use alloy_primitives::Address;
use chrono::Utc;
use lib_core::error::{Result, SwapError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the indicative price service.
pub struct PriceClient {
    http: Client,
    base_url: String,
}

impl PriceClient {
    /// Create a new client with its own connection pool.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch the indicative ratio for one pair.
    ///
    /// Any transport, status, or body failure is surfaced as
    /// [`SwapError::PriceUnavailable`]; the caller clears the displayed
    /// estimate rather than showing a stale value.
    pub async fn fetch_ratio(&self, sell_token: Address, buy_token: Address) -> Result<PriceQuote> {
        let url = ratio_url(&self.base_url, sell_token, buy_token);
        debug!("price request: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!("price request failed: {}", e);
                SwapError::PriceUnavailable(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            warn!("price service returned {}", response.status());
            return Err(SwapError::PriceUnavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let body: PriceResponse = response.json().await.map_err(|e| {
            warn!("price response parse failed: {}", e);
            SwapError::PriceUnavailable(format!("malformed body: {e}"))
        })?;

        debug!(
            "ratio {} -> {}: {:.6}",
            sell_token, buy_token, body.ratio
        );

        Ok(PriceQuote {
            ratio: body.ratio,
            fetched_at: Utc::now(),
            sell_token,
            buy_token,
        })
    }
}

/// Build the price request URL for a pair.
fn ratio_url(base: &str, sell_token: Address, buy_token: Address) -> String {
    format!("{base}/tokenPrice?addressOne={sell_token}&addressTwo={buy_token}")
}

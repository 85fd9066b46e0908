//! # Aggregator Quote Client
//!
//! Fetches executable trade quotes from the liquidity-aggregation service.
//! Quotes carry execution-specific calldata and amounts and may expire, so
//! there is no caching: every execution attempt fetches a fresh one.

use crate::types::TradeQuote;
use alloy_primitives::{Address, U256};
use lib_core::error::{Result, SwapError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the aggregator quote API.
pub struct AggregatorClient {
    http: Client,
    base_url: String,
}

impl AggregatorClient {
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

    /// Fetch an executable quote for one concrete trade.
    ///
    /// `sell_amount` is already scaled to the sell token's base units;
    /// `slippage_fraction` is a fraction (0.025 for 2.5%). Insufficient
    /// liquidity, rate limiting, and malformed parameters all surface as
    /// [`SwapError::QuoteFailed`] with the service's reason; there is no
    /// automatic retry.
    pub async fn fetch_trade_quote(
        &self,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        taker: Address,
        slippage_fraction: f64,
    ) -> Result<TradeQuote> {
        let url = quote_url(
            &self.base_url,
            sell_token,
            buy_token,
            sell_amount,
            taker,
            slippage_fraction,
        );
        debug!("trade quote request: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("trade quote request failed: {}", e);
            SwapError::QuoteFailed(format!("request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            warn!("aggregator returned {}: {}", status, reason);
            return Err(SwapError::QuoteFailed(reason));
        }

        let quote: TradeQuote = response.json().await.map_err(|e| {
            warn!("trade quote parse failed: {}", e);
            SwapError::QuoteFailed(format!("malformed body: {e}"))
        })?;

        debug!(
            "trade quote: sell {} -> buy {} via {}",
            quote.sell_amount, quote.buy_amount, quote.to
        );

        Ok(quote)
    }
}

/// Build the aggregator quote URL for one trade.
fn quote_url(
    base: &str,
    sell_token: Address,
    buy_token: Address,
    sell_amount: U256,
    taker: Address,
    slippage_fraction: f64,
) -> String {
    format!(
        "{base}/swap/v1/quote?sellToken={sell_token}&buyToken={buy_token}&sellAmount={sell_amount}&takerAddress={taker}&slippagePercentage={slippage_fraction}"
    )
}

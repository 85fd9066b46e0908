//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//! The live implementations are the HTTP clients in `lib-evm`; tests inject
//! scripted doubles.

use async_trait::async_trait;
use lib_core::Result;
use lib_evm::{Address, AggregatorClient, PriceClient, PriceQuote, TradeQuote, U256};

/// Trait for the indicative price service.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Fetch the displayed exchange ratio for one pair.
    async fn fetch_ratio(&self, sell_token: Address, buy_token: Address) -> Result<PriceQuote>;
}

#[async_trait]
impl PriceService for PriceClient {
    async fn fetch_ratio(&self, sell_token: Address, buy_token: Address) -> Result<PriceQuote> {
        PriceClient::fetch_ratio(self, sell_token, buy_token).await
    }
}

/// Trait for the liquidity-aggregator quote service.
#[async_trait]
pub trait AggregatorService: Send + Sync {
    /// Fetch a fresh executable quote for one concrete trade.
    async fn fetch_trade_quote(
        &self,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        taker: Address,
        slippage_fraction: f64,
    ) -> Result<TradeQuote>;
}

#[async_trait]
impl AggregatorService for AggregatorClient {
    async fn fetch_trade_quote(
        &self,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        taker: Address,
        slippage_fraction: f64,
    ) -> Result<TradeQuote> {
        AggregatorClient::fetch_trade_quote(
            self,
            sell_token,
            buy_token,
            sell_amount,
            taker,
            slippage_fraction,
        )
        .await
    }
}

//! # Wire and Domain Types
//!
//! Type definitions for the token catalog, the price service, and the
//! aggregator quote API.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the static token catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
}

/// Ordered (sell, buy) token selection.
///
/// The two sides may temporarily hold the same token while the user is
/// picking; the duplicate pair is rejected at execution time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub sell: Token,
    pub buy: Token,
}

impl TokenPair {
    pub fn new(sell: Token, buy: Token) -> Self {
        Self { sell, buy }
    }

    /// The same pair with sides exchanged.
    pub fn swapped(self) -> Self {
        Self {
            sell: self.buy,
            buy: self.sell,
        }
    }

    /// True when both sides resolve to the same on-chain asset.
    pub fn is_degenerate(&self) -> bool {
        self.sell.address == self.buy.address
    }
}

/// Indicative exchange ratio for one pair, as reported by the price service.
///
/// Replaced wholesale on every successful fetch; cleared entirely on failure
/// or pair change. Never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Units of buy-token obtainable per one unit of sell-token.
    pub ratio: f64,
    pub fetched_at: DateTime<Utc>,
    pub sell_token: Address,
    pub buy_token: Address,
}

/// Response body of the price service.
#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    pub ratio: f64,
}

/// Executable swap quote from the aggregator.
///
/// Valid for a single execution attempt. Amounts are base-unit decimal
/// strings, exactly as the aggregator returns them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TradeQuote {
    #[serde(rename = "sellTokenAddress")]
    pub sell_token: Address,
    #[serde(rename = "buyTokenAddress")]
    pub buy_token: Address,
    #[serde(rename = "sellAmount")]
    pub sell_amount: String,
    #[serde(rename = "buyAmount")]
    pub buy_amount: String,
    /// Contract that must be approved to pull the sell token.
    #[serde(rename = "allowanceTarget")]
    pub allowance_target: Address,
    /// Execution target contract.
    pub to: Address,
    /// Calldata for the swap transaction, 0x-prefixed hex.
    pub data: String,
    /// Gas estimate as a decimal string; the node estimates when absent.
    pub gas: Option<String>,
}

/// Confirmed on-chain transaction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn token(addr: &str, symbol: &str, decimals: u8) -> Token {
        Token {
            address: Address::from_str(addr).unwrap(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals,
            logo_uri: None,
        }
    }

    #[test]
    fn swapped_twice_restores_pair() {
        let weth = token("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "WETH", 18);
        let usdc = token("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC", 6);
        let pair = TokenPair::new(weth, usdc);
        assert_eq!(pair.clone().swapped().swapped(), pair);
    }

    #[test]
    fn degenerate_pair_detected() {
        let weth = token("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "WETH", 18);
        let pair = TokenPair::new(weth.clone(), weth);
        assert!(pair.is_degenerate());
    }

    #[test]
    fn trade_quote_parses_aggregator_body() {
        let body = r#"{
            "sellTokenAddress": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "buyTokenAddress": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "sellAmount": "1000000000000000000",
            "buyAmount": "3000000000",
            "allowanceTarget": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
            "to": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
            "data": "0xd9627aa4",
            "gas": "111000"
        }"#;
        let quote: TradeQuote = serde_json::from_str(body).unwrap();
        assert_eq!(quote.sell_amount, "1000000000000000000");
        assert_eq!(quote.gas.as_deref(), Some("111000"));
        assert_eq!(
            quote.allowance_target,
            Address::from_str("0xDef1C0ded9bec7F1a1670819833240f027b25EfF").unwrap()
        );
    }
}
